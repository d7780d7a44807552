//! Text → store import pipeline.
//!
//! One store write at a time: each record's commit is awaited before the
//! next request is submitted, so a created group is visible before the
//! events that reference it.

use std::io::BufRead;

use commhist_lib::{HistoryStore, PendingCommit};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::reassemble::LogicalLines;
use crate::record::{CallRecord, SmsRecord};
use crate::transfer::groups::GroupResolver;

/// Counters reported by an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub added: usize,
    pub skipped: usize,
}

/// Import SMS records, reassembling soft-wrapped bodies.
///
/// Malformed records and rejected writes are logged and skipped; the run
/// continues.
///
/// # Errors
///
/// Returns an error only for read failures on the input; per-record
/// problems never abort the run.
pub fn import_sms<S: HistoryStore + ?Sized>(
    store: &mut S,
    resolver: &mut GroupResolver,
    local_uid: &str,
    reader: impl BufRead,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for logical in LogicalLines::new(reader) {
        let line = logical?;
        let record = match SmsRecord::parse(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!("invalid message: {line:?}: {e}");
                stats.skipped += 1;
                continue;
            }
        };

        let remote_uid = record.remote_uid.clone();
        let group_id = resolver.resolve(store, &remote_uid);
        let event = record.into_event(local_uid, group_id);

        match store.add_event(&event).and_then(PendingCommit::wait) {
            Ok(_) => {
                debug!("message from/for {remote_uid} added");
                stats.added += 1;
            }
            Err(e) => {
                warn!("could not add message {line:?}: {e}");
                stats.skipped += 1;
            }
        }
    }

    info!("imported {} sms, skipped {}", stats.added, stats.skipped);
    Ok(stats)
}

/// Import call records, one physical line per record.
///
/// # Errors
///
/// Returns an error only for read failures on the input; per-record
/// problems never abort the run.
pub fn import_calls<S: HistoryStore + ?Sized>(
    store: &mut S,
    local_uid: &str,
    reader: impl BufRead,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for physical in reader.lines() {
        let line = physical?;
        if line.is_empty() {
            continue;
        }
        let record = match CallRecord::parse(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!("invalid call: {line:?}: {e}");
                stats.skipped += 1;
                continue;
            }
        };

        let remote_uid = record.remote_uid.clone();
        let event = record.into_event(local_uid);

        match store.add_event(&event).and_then(PendingCommit::wait) {
            Ok(_) => {
                debug!("call from/to {remote_uid} added");
                stats.added += 1;
            }
            Err(e) => {
                warn!("could not add call {line:?}: {e}");
                stats.skipped += 1;
            }
        }
    }

    info!("imported {} calls, skipped {}", stats.added, stats.skipped);
    Ok(stats)
}
