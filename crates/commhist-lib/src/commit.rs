//! One-shot commit rendezvous for asynchronous store writes.
//!
//! A write request returns a [`PendingCommit`] ticket; the store keeps the
//! matching [`CommitSignal`] and fires it exactly once when the definitive
//! outcome is known. `wait` consumes the ticket, so a ticket cannot be
//! awaited twice and there is no reset-before-submit race: each request gets
//! a fresh pair.

use std::sync::mpsc;

use crate::error::{HistoryError, Result};

/// Create a linked signal/ticket pair for one store write.
#[must_use]
pub fn commit_channel<T>() -> (CommitSignal<T>, PendingCommit<T>) {
    let (tx, rx) = mpsc::sync_channel(1);
    (CommitSignal { tx }, PendingCommit { rx })
}

/// Store-side half: fired once with the commit outcome.
pub struct CommitSignal<T> {
    tx: mpsc::SyncSender<Result<T>>,
}

impl<T> CommitSignal<T> {
    /// Report the commit outcome. Consumes the signal; a second report is
    /// unrepresentable.
    pub fn complete(self, outcome: Result<T>) {
        // The waiter may already be gone; nothing to do then.
        let _ = self.tx.send(outcome);
    }
}

/// Caller-side half: blocks until the store reports the outcome.
pub struct PendingCommit<T> {
    rx: mpsc::Receiver<Result<T>>,
}

impl<T> PendingCommit<T> {
    /// Block until the commit outcome arrives.
    ///
    /// # Errors
    ///
    /// Returns the store's reported error, or [`HistoryError::CommitDropped`]
    /// if the store discarded its signal without reporting.
    pub fn wait(self) -> Result<T> {
        self.rx.recv().map_err(|_| HistoryError::CommitDropped)?
    }
}
