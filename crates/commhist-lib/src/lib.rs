//! `commhist-lib` — Communication-history event store.
//!
//! Persists SMS and call records grouped into per-contact conversation
//! threads. Reads are synchronous; writes follow a request/commit split in
//! which the definitive outcome arrives through a one-shot commit ticket
//! (see [`commit`]).
//!
//! Two implementations of the [`HistoryStore`] trait are provided:
//! [`SqliteStore`] for on-disk persistence and [`MemoryStore`] for
//! in-process use and tests.
//!
//! # Quick Start
//!
//! ```no_run
//! use commhist_lib::{Group, HistoryStore, SqliteStore};
//!
//! let mut store = SqliteStore::open("history.db").unwrap();
//! let pending = store
//!     .create_group(&Group::peer_to_peer("/acct/local", "5550100"))
//!     .unwrap();
//! let group_id = pending.wait().unwrap();
//! ```

pub mod commit;
pub mod error;
pub mod model;
pub mod sqlite;
pub mod store;

pub use commit::{CommitSignal, PendingCommit, commit_channel};
pub use error::{HistoryError, Result};
pub use model::{Direction, Event, EventId, EventKind, EventStatus, Group, GroupId};
pub use sqlite::SqliteStore;
pub use store::{HistoryStore, MemoryStore, SortOrder};
