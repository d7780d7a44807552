//! Conversation group resolution for SMS import.

use std::collections::HashMap;

use commhist_lib::{Group, GroupId, HistoryStore, PendingCommit};
use tracing::{debug, warn};

/// Maps remote parties to conversation groups, creating each group on first
/// sighting.
///
/// The cache lives for one import run only; a later run re-resolves (and may
/// re-create) groups unless the store deduplicates by remote party itself.
pub struct GroupResolver {
    local_uid: String,
    cache: HashMap<String, GroupId>,
}

impl GroupResolver {
    #[must_use]
    pub fn new(local_uid: impl Into<String>) -> Self {
        Self {
            local_uid: local_uid.into(),
            cache: HashMap::new(),
        }
    }

    /// Resolve `remote_uid` to a group id, creating the group in the store
    /// on a cache miss.
    ///
    /// Creation failure is logged and yields [`GroupId::NONE`]; the failure
    /// is not cached, so a later record for the same party retries.
    pub fn resolve<S: HistoryStore + ?Sized>(&mut self, store: &mut S, remote_uid: &str) -> GroupId {
        if let Some(&id) = self.cache.get(remote_uid) {
            return id;
        }

        let group = Group::peer_to_peer(self.local_uid.clone(), remote_uid);
        let outcome = store.create_group(&group).and_then(PendingCommit::wait);
        match outcome {
            Ok(id) => {
                debug!("created group {id} for {remote_uid}");
                self.cache.insert(remote_uid.to_string(), id);
                id
            }
            Err(e) => {
                warn!("could not add group for {remote_uid}: {e}");
                GroupId::NONE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commhist_lib::{Event, EventId, EventKind, HistoryError, MemoryStore, SortOrder};

    #[test]
    fn test_resolve_creates_group_once() {
        let mut store = MemoryStore::new();
        let mut resolver = GroupResolver::new("/acct/test");

        let first = resolver.resolve(&mut store, "555");
        let second = resolver.resolve(&mut store, "555");

        assert_eq!(first, second);
        assert!(!first.is_none());
        assert_eq!(store.groups().len(), 1);
        assert_eq!(store.groups()[0].remote_uid, "555");
    }

    #[test]
    fn test_distinct_parties_get_distinct_groups() {
        let mut store = MemoryStore::new();
        let mut resolver = GroupResolver::new("/acct/test");

        let a = resolver.resolve(&mut store, "111");
        let b = resolver.resolve(&mut store, "222");

        assert_ne!(a, b);
        assert_eq!(store.groups().len(), 2);
    }

    /// Store that rejects every write.
    struct RejectingStore;

    impl HistoryStore for RejectingStore {
        fn query_events(&self, _: EventKind, _: SortOrder) -> commhist_lib::Result<Vec<Event>> {
            Ok(Vec::new())
        }

        fn create_group(&mut self, _: &Group) -> commhist_lib::Result<PendingCommit<GroupId>> {
            Err(HistoryError::Rejected("store is read-only".into()))
        }

        fn add_event(&mut self, _: &Event) -> commhist_lib::Result<PendingCommit<EventId>> {
            Err(HistoryError::Rejected("store is read-only".into()))
        }
    }

    #[test]
    fn test_failed_creation_yields_sentinel_and_is_not_cached() {
        let mut rejecting = RejectingStore;
        let mut resolver = GroupResolver::new("/acct/test");

        assert_eq!(resolver.resolve(&mut rejecting, "555"), GroupId::NONE);

        // The failure was not cached: a working store gets a real group.
        let mut store = MemoryStore::new();
        let id = resolver.resolve(&mut store, "555");
        assert!(!id.is_none());
        assert_eq!(store.groups().len(), 1);
    }
}
