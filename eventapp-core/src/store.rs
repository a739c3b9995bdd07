//! In-memory event store.
//!
//! The store is the single source of truth a list renders from. It keeps
//! events in first-seen order and guarantees id uniqueness across merges.
//! All operations are synchronous; only the owning feed writes to it.

use std::collections::HashSet;

use crate::models::Event;

/// How a fetched page is folded into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Discard prior contents and install the given sequence.
    Replace,
    /// Insert new records after existing ones, skipping ids already present.
    Append,
}

/// Ordered, id-deduplicated collection of events.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    ids: HashSet<String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a page of events.
    ///
    /// In `Append` mode the first-seen record wins: a later page must not
    /// override a record already merged, since that record may carry local
    /// optimistic edits the page response does not know about.
    pub fn merge(&mut self, incoming: Vec<Event>, mode: MergeMode) {
        if mode == MergeMode::Replace {
            self.events.clear();
            self.ids.clear();
        }
        for event in incoming {
            if self.ids.insert(event.id.clone()) {
                self.events.push(event);
            }
        }
    }

    /// Snapshot of the current contents, in first-seen order.
    pub fn events(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Applies a transform to exactly one record if present.
    ///
    /// Returns the updated record, or `None` when the id is absent.
    pub fn update_one<F>(&mut self, id: &str, transform: F) -> Option<Event>
    where
        F: FnOnce(&mut Event),
    {
        let event = self.events.iter_mut().find(|e| e.id == id)?;
        transform(event);
        Some(event.clone())
    }

    /// Removes a record. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            self.events.retain(|e| e.id != id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            name: format!("Event {}", id),
            description: String::new(),
            date_time: "2026-06-01T19:30:00Z".parse().unwrap(),
            price: 10.0,
            location: "Hall".to_string(),
            organizer_id: "org-1".to_string(),
            available_tickets: 50,
            is_favorite: false,
        }
    }

    fn ids(store: &EventStore) -> Vec<String> {
        store.events().into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_append_keeps_first_seen_order() {
        let mut store = EventStore::new();
        store.merge(vec![event("a"), event("b")], MergeMode::Append);
        store.merge(vec![event("c"), event("d")], MergeMode::Append);
        assert_eq!(ids(&store), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_append_skips_duplicate_ids() {
        let mut store = EventStore::new();
        store.merge(vec![event("a"), event("b")], MergeMode::Append);

        // "a" carries a local edit; the re-delivered copy must not clobber it.
        store.update_one("a", |e| e.is_favorite = true);
        store.merge(vec![event("a"), event("c")], MergeMode::Append);

        assert_eq!(ids(&store), vec!["a", "b", "c"]);
        assert!(store.get("a").unwrap().is_favorite);
    }

    #[test]
    fn test_replace_discards_prior_contents() {
        let mut store = EventStore::new();
        store.merge(vec![event("a"), event("b")], MergeMode::Append);
        store.merge(vec![event("c")], MergeMode::Replace);
        assert_eq!(ids(&store), vec!["c"]);
    }

    #[test]
    fn test_update_one_missing_id_is_noop() {
        let mut store = EventStore::new();
        store.merge(vec![event("a")], MergeMode::Append);
        assert!(store.update_one("zzz", |e| e.is_favorite = true).is_none());
        assert!(!store.get("a").unwrap().is_favorite);
    }

    #[test]
    fn test_remove() {
        let mut store = EventStore::new();
        store.merge(vec![event("a"), event("b")], MergeMode::Append);
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert_eq!(ids(&store), vec!["b"]);

        // A removed id may legitimately come back on a later page.
        store.merge(vec![event("a")], MergeMode::Append);
        assert_eq!(ids(&store), vec!["b", "a"]);
    }
}
