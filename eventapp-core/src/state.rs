//! Observable sync state.
//!
//! A list exposes exactly one [`SyncState`] at a time. Observers subscribe
//! through a watch channel and must tolerate seeing the same value more than
//! once (e.g., after a resubscribe).

use tokio::sync::watch;

use crate::models::Event;

/// Externally observable condition of a paginated list.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncState {
    /// No data yet; a first fetch may be in flight.
    Loading,
    /// Fetch succeeded with zero results.
    Empty,
    /// First page (or full replacement) is available.
    Success(Vec<Event>),
    /// A subsequent page has been merged.
    Append(Vec<Event>),
    /// A fetch failed; the whole list is in an error state.
    Error(String),
}

/// A per-record failure signal for optimistic mutations.
///
/// Scoped to one event; it never replaces the list's [`SyncState`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    pub event_id: String,
    pub message: String,
}

/// Current value plus change notifications, built on `tokio::sync::watch`.
///
/// The cell keeps its own receiver so publishing never fails, even when no
/// external subscriber is attached.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    pub fn set(&self, value: T) {
        // Cannot fail: the cell holds a receiver for the channel's lifetime.
        let _ = self.tx.send(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}
