//! Store → text export pipeline.

use std::io::Write;

use commhist_lib::{Event, EventKind, HistoryStore, SortOrder};
use tracing::{info, warn};

use crate::error::Result;
use crate::record::{CallRecord, SmsRecord};

/// Counters reported by an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub written: usize,
    pub skipped: usize,
}

/// Export all SMS events in store query order.
///
/// Rows that are not SMS events are logged and skipped, never written.
///
/// # Errors
///
/// Returns an error if the store query or a write fails. Nothing is written
/// before the query has succeeded.
pub fn export_sms<S: HistoryStore + ?Sized>(store: &S, out: &mut impl Write) -> Result<ExportStats> {
    let events = store.query_events(EventKind::Sms, SortOrder::Insertion)?;
    info!("exporting {} sms event(s)", events.len());

    let mut stats = ExportStats::default();
    for event in &events {
        match SmsRecord::from_event(event) {
            Ok(record) => {
                writeln!(out, "{}", record.to_line())?;
                stats.written += 1;
            }
            Err(e) => {
                warn!("skipping event {:?}: {e}", event.id);
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

/// Export all call events, fetched in ascending time order.
///
/// With `newest_last` (the default) rows are written as fetched, so a
/// sequential downstream importer sees the most recent call last. Disabling
/// it reverses the output to newest-first.
///
/// # Errors
///
/// Returns an error if the store query or a write fails. Nothing is written
/// before the query has succeeded.
pub fn export_calls<S: HistoryStore + ?Sized>(
    store: &S,
    out: &mut impl Write,
    newest_last: bool,
) -> Result<ExportStats> {
    let events = store.query_events(EventKind::Call, SortOrder::ByTime)?;
    info!("exporting {} call event(s)", events.len());

    let mut stats = ExportStats::default();
    let mut write_one = |event: &Event, stats: &mut ExportStats| -> Result<()> {
        match CallRecord::from_event(event) {
            Ok(record) => {
                writeln!(out, "{}", record.to_line())?;
                stats.written += 1;
            }
            Err(e) => {
                warn!("skipping event {:?}: {e}", event.id);
                stats.skipped += 1;
            }
        }
        Ok(())
    };

    if newest_last {
        for event in &events {
            write_one(event, &mut stats)?;
        }
    } else {
        for event in events.iter().rev() {
            write_one(event, &mut stats)?;
        }
    }
    Ok(stats)
}
