//! Store collaborator interface and the in-memory implementation.

use crate::commit::{PendingCommit, commit_channel};
use crate::error::{HistoryError, Result};
use crate::model::{Event, EventId, EventKind, Group, GroupId};

/// Order in which `query_events` returns records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Store insertion order.
    #[default]
    Insertion,
    /// Ascending start time, ties broken by insertion order.
    ByTime,
}

/// Communication-history store.
///
/// Reads are synchronous once issued. Writes follow a request/commit split:
/// the call returns immediately with acceptance (`Ok`) or rejection (`Err`),
/// and the definitive outcome arrives through the returned ticket. Callers
/// are expected to wait on each ticket before submitting the next write, so
/// at most one write is ever outstanding.
pub trait HistoryStore {
    /// Fetch all events of `kind` in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored record is corrupt.
    fn query_events(&self, kind: EventKind, order: SortOrder) -> Result<Vec<Event>>;

    /// Submit a new conversation group. The ticket resolves to the
    /// store-assigned group id.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the store refuses the request up front.
    fn create_group(&mut self, group: &Group) -> Result<PendingCommit<GroupId>>;

    /// Submit a new event. The ticket resolves to the store-assigned
    /// event id.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the store refuses the request up front.
    fn add_event(&mut self, event: &Event) -> Result<PendingCommit<EventId>>;
}

/// Vec-backed store.
///
/// Same contract as the SQLite store, with sequential ids and no
/// persistence. Commits complete before the ticket is handed back.
#[derive(Debug)]
pub struct MemoryStore {
    events: Vec<Event>,
    groups: Vec<Group>,
    next_event_id: i64,
    next_group_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            groups: Vec::new(),
            next_event_id: 1,
            next_group_id: 1,
        }
    }

    /// All stored events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// All stored groups in creation order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }
}

impl HistoryStore for MemoryStore {
    fn query_events(&self, kind: EventKind, order: SortOrder) -> Result<Vec<Event>> {
        let mut matched: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect();
        if order == SortOrder::ByTime {
            matched.sort_by(|a, b| (a.start_time, a.id).cmp(&(b.start_time, b.id)));
        }
        Ok(matched)
    }

    fn create_group(&mut self, group: &Group) -> Result<PendingCommit<GroupId>> {
        if group.remote_uid.is_empty() {
            return Err(HistoryError::Rejected("group has no remote party".into()));
        }

        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        let mut stored = group.clone();
        stored.id = Some(id);
        self.groups.push(stored);

        let (signal, pending) = commit_channel();
        signal.complete(Ok(id));
        Ok(pending)
    }

    fn add_event(&mut self, event: &Event) -> Result<PendingCommit<EventId>> {
        if event.remote_uid.is_empty() {
            return Err(HistoryError::Rejected("event has no remote party".into()));
        }

        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        let mut stored = event.clone();
        stored.id = Some(id);
        self.events.push(stored);

        let (signal, pending) = commit_channel();
        signal.complete(Ok(id));
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, EventStatus};
    use chrono::{TimeZone, Utc};

    fn sms(remote: &str, start_secs: i64) -> Event {
        Event {
            id: None,
            kind: EventKind::Sms,
            group_id: GroupId(1),
            local_uid: "/acct/test".into(),
            remote_uid: remote.into(),
            direction: Direction::Inbound,
            status: EventStatus::Delivered,
            is_read: true,
            is_missed: false,
            start_time: Utc.timestamp_opt(start_secs, 0).unwrap(),
            end_time: Utc.timestamp_opt(start_secs + 1, 0).unwrap(),
            body: Some("hi".into()),
        }
    }

    fn call(remote: &str, start_secs: i64) -> Event {
        Event {
            kind: EventKind::Call,
            group_id: GroupId::NONE,
            is_missed: true,
            body: None,
            ..sms(remote, start_secs)
        }
    }

    #[test]
    fn test_add_and_query_filters_by_kind() {
        let mut store = MemoryStore::new();
        store.add_event(&sms("111", 10)).unwrap().wait().unwrap();
        store.add_event(&call("222", 20)).unwrap().wait().unwrap();

        let smses = store
            .query_events(EventKind::Sms, SortOrder::Insertion)
            .unwrap();
        assert_eq!(smses.len(), 1);
        assert_eq!(smses[0].remote_uid, "111");

        let calls = store
            .query_events(EventKind::Call, SortOrder::ByTime)
            .unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].remote_uid, "222");
    }

    #[test]
    fn test_by_time_sorts_on_start_time() {
        let mut store = MemoryStore::new();
        store.add_event(&call("b", 200)).unwrap().wait().unwrap();
        store.add_event(&call("a", 100)).unwrap().wait().unwrap();

        let calls = store
            .query_events(EventKind::Call, SortOrder::ByTime)
            .unwrap();
        assert_eq!(calls[0].remote_uid, "a");
        assert_eq!(calls[1].remote_uid, "b");
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut store = MemoryStore::new();
        let first = store.add_event(&sms("1", 1)).unwrap().wait().unwrap();
        let second = store.add_event(&sms("2", 2)).unwrap().wait().unwrap();
        assert_eq!(first, EventId(1));
        assert_eq!(second, EventId(2));
    }

    #[test]
    fn test_empty_remote_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.add_event(&sms("", 1)),
            Err(HistoryError::Rejected(_))
        ));
        assert!(matches!(
            store.create_group(&Group::peer_to_peer("/acct/test", "")),
            Err(HistoryError::Rejected(_))
        ));
    }

    #[test]
    fn test_group_ids_assigned() {
        let mut store = MemoryStore::new();
        let id = store
            .create_group(&Group::peer_to_peer("/acct/test", "555"))
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(id, GroupId(1));
        assert_eq!(store.groups()[0].id, Some(id));
    }
}
