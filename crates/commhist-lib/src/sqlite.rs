//! SQLite-backed communication-history store.
//!
//! Schema: `groups` (one row per conversation thread) and `events` (one row
//! per SMS or call). Timestamps are stored as RFC 3339 text so rows remain
//! readable with plain sqlite3.
//!
//! Writes commit synchronously inside the call; the commit ticket is fired
//! before it is returned, which preserves the request/commit contract of
//! [`HistoryStore`] without a second outcome path.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use tracing::debug;

use crate::commit::{PendingCommit, commit_channel};
use crate::error::{HistoryError, Result};
use crate::model::{Event, EventId, EventKind, Group, GroupId};
use crate::store::{HistoryStore, SortOrder};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS groups (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    local_uid   TEXT NOT NULL,
    remote_uid  TEXT NOT NULL,
    chat_type   TEXT NOT NULL DEFAULT 'p2p'
);

CREATE TABLE IF NOT EXISTS events (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    kind        TEXT NOT NULL,
    group_id    INTEGER NOT NULL DEFAULT 0,
    local_uid   TEXT NOT NULL,
    remote_uid  TEXT NOT NULL,
    direction   TEXT NOT NULL,
    status      TEXT NOT NULL,
    is_read     INTEGER NOT NULL DEFAULT 0,
    is_missed   INTEGER NOT NULL DEFAULT 0,
    start_time  TEXT NOT NULL,
    end_time    TEXT NOT NULL,
    body        TEXT
);

CREATE INDEX IF NOT EXISTS idx_events_kind_time ON events (kind, start_time);
";

/// SQLite store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns `Database` if the file cannot be opened or the schema cannot
    /// be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        debug!("opened store at {}", path.as_ref().display());
        Ok(Self { conn })
    }

    /// In-memory database, mainly for tests.
    ///
    /// # Errors
    ///
    /// Returns `Database` if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Number of stored groups.
    ///
    /// # Errors
    ///
    /// Returns `Database` on query failure.
    pub fn group_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM groups", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn event_from_row(row: &Row<'_>) -> rusqlite::Result<RawEvent> {
        Ok(RawEvent {
            id: row.get(0)?,
            kind: row.get(1)?,
            group_id: row.get(2)?,
            local_uid: row.get(3)?,
            remote_uid: row.get(4)?,
            direction: row.get(5)?,
            status: row.get(6)?,
            is_read: row.get(7)?,
            is_missed: row.get(8)?,
            start_time: row.get(9)?,
            end_time: row.get(10)?,
            body: row.get(11)?,
        })
    }
}

/// Row image before token/timestamp decoding.
struct RawEvent {
    id: i64,
    kind: String,
    group_id: i64,
    local_uid: String,
    remote_uid: String,
    direction: String,
    status: String,
    is_read: bool,
    is_missed: bool,
    start_time: String,
    end_time: String,
    body: Option<String>,
}

impl RawEvent {
    fn decode(self) -> Result<Event> {
        Ok(Event {
            id: Some(EventId(self.id)),
            kind: self.kind.parse()?,
            group_id: GroupId(self.group_id),
            local_uid: self.local_uid,
            remote_uid: self.remote_uid,
            direction: self.direction.parse()?,
            status: self.status.parse()?,
            is_read: self.is_read,
            is_missed: self.is_missed,
            start_time: parse_stored_time("start_time", &self.start_time)?,
            end_time: parse_stored_time("end_time", &self.end_time)?,
            body: self.body,
        })
    }
}

fn parse_stored_time(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| HistoryError::corrupt_field(field, value))
}

impl HistoryStore for SqliteStore {
    fn query_events(&self, kind: EventKind, order: SortOrder) -> Result<Vec<Event>> {
        let sql = match order {
            SortOrder::Insertion => {
                "SELECT id, kind, group_id, local_uid, remote_uid, direction, status,
                        is_read, is_missed, start_time, end_time, body
                 FROM events WHERE kind = ?1 ORDER BY id"
            }
            SortOrder::ByTime => {
                "SELECT id, kind, group_id, local_uid, remote_uid, direction, status,
                        is_read, is_missed, start_time, end_time, body
                 FROM events WHERE kind = ?1 ORDER BY start_time, id"
            }
        };

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![kind.as_str()], Self::event_from_row)?;

        let mut events = Vec::new();
        for raw in rows {
            events.push(raw?.decode()?);
        }
        debug!("fetched {} {} event(s)", events.len(), kind);
        Ok(events)
    }

    fn create_group(&mut self, group: &Group) -> Result<PendingCommit<GroupId>> {
        if group.remote_uid.is_empty() {
            return Err(HistoryError::Rejected("group has no remote party".into()));
        }

        let (signal, pending) = commit_channel();
        let outcome = self
            .conn
            .execute(
                "INSERT INTO groups (local_uid, remote_uid) VALUES (?1, ?2)",
                params![group.local_uid, group.remote_uid],
            )
            .map(|_| GroupId(self.conn.last_insert_rowid()))
            .map_err(|e| HistoryError::CommitFailed(e.to_string()));
        signal.complete(outcome);
        Ok(pending)
    }

    fn add_event(&mut self, event: &Event) -> Result<PendingCommit<EventId>> {
        if event.remote_uid.is_empty() {
            return Err(HistoryError::Rejected("event has no remote party".into()));
        }

        let (signal, pending) = commit_channel();
        let outcome = self
            .conn
            .execute(
                "INSERT INTO events (kind, group_id, local_uid, remote_uid, direction,
                                     status, is_read, is_missed, start_time, end_time, body)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    event.kind.as_str(),
                    event.group_id.0,
                    event.local_uid,
                    event.remote_uid,
                    event.direction.as_str(),
                    event.status.as_str(),
                    event.is_read,
                    event.is_missed,
                    event.start_time.to_rfc3339(),
                    event.end_time.to_rfc3339(),
                    event.body,
                ],
            )
            .map(|_| EventId(self.conn.last_insert_rowid()))
            .map_err(|e| HistoryError::CommitFailed(e.to_string()));
        signal.complete(outcome);
        Ok(pending)
    }
}
