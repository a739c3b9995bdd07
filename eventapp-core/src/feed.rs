//! Paginated event feed.
//!
//! One [`EventFeed`] instance backs one list on screen. It owns the store and
//! cursor, drives sequential page fetches through the injected gateway, and
//! publishes [`SyncState`] transitions for the UI to render. Mutations are
//! optimistic: applied locally first, reconciled with the server response,
//! rolled back on failure.
//!
//! Multiple feeds (e.g., main list vs. favorites) are fully independent.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::error::{FeedError, GatewayError};
use crate::gateway::EventGateway;
use crate::models::{Event, EventDraft, PurchaseReceipt, SearchQuery};
use crate::page::PageCursor;
use crate::state::{RecordError, StateCell, SyncState};
use crate::store::{EventStore, MergeMode};

/// Buffer for scoped mutation-failure notifications.
const RECORD_ERROR_CAPACITY: usize = 16;

/// Mutable state guarded by the feed's lock.
///
/// The lock is never held across a network await; every async operation
/// snapshots `epoch` before its call and re-checks it before applying the
/// result, so a reset or teardown in between discards the stale outcome.
struct FeedInner {
    store: EventStore,
    cursor: PageCursor,
    /// Next successful merge replaces instead of appending (first page, or
    /// the first page after a reset).
    fresh: bool,
    in_flight: bool,
    epoch: u64,
    closed: bool,
    /// Per-id locks serializing favorite toggles on the same record.
    toggles: HashMap<String, Arc<Mutex<()>>>,
}

/// Synchronized, paginated list of events.
pub struct EventFeed<G> {
    gateway: Arc<G>,
    inner: Mutex<FeedInner>,
    state: StateCell<SyncState>,
    record_errors: broadcast::Sender<RecordError>,
}

impl<G: EventGateway> EventFeed<G> {
    /// Creates a feed over the given gateway. Initial state is `Loading`.
    pub fn new(gateway: Arc<G>, page_size: u32) -> Self {
        let (record_errors, _) = broadcast::channel(RECORD_ERROR_CAPACITY);
        Self {
            gateway,
            inner: Mutex::new(FeedInner {
                store: EventStore::new(),
                cursor: PageCursor::new(page_size),
                fresh: true,
                in_flight: false,
                epoch: 0,
                closed: false,
                toggles: HashMap::new(),
            }),
            state: StateCell::new(SyncState::Loading),
            record_errors,
        }
    }

    /// Current sync state.
    pub fn state(&self) -> SyncState {
        self.state.get()
    }

    /// Subscription to sync-state transitions.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Subscription to scoped per-record mutation failures.
    pub fn subscribe_record_errors(&self) -> broadcast::Receiver<RecordError> {
        self.record_errors.subscribe()
    }

    /// Read-only snapshot of the store, in first-seen order.
    pub async fn events(&self) -> Vec<Event> {
        self.inner.lock().await.store.events()
    }

    /// Fetches the next page and merges it into the store.
    ///
    /// A call while a fetch is already in flight is a no-op, so pages are
    /// requested strictly in order and never concurrently. A failed fetch
    /// publishes `Error` and leaves the cursor in place: the next call
    /// retries the same page, which is safe because appends dedup by id.
    pub async fn load_next(&self) -> Result<(), FeedError> {
        let (cursor, epoch) = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            if inner.in_flight {
                return Ok(());
            }
            inner.in_flight = true;
            (inner.cursor, inner.epoch)
        };

        debug!(page = cursor.page, "loading page");
        let fetched = self.gateway.fetch_page(&cursor).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch || inner.closed {
            // A reset or teardown happened while the request was out. The
            // in-flight flag now belongs to whoever bumped the epoch.
            return Ok(());
        }
        inner.in_flight = false;

        match fetched {
            Ok(events) if events.is_empty() => {
                // End of data: cursor stays frozen.
                if inner.store.is_empty() {
                    self.state.set(SyncState::Empty);
                }
                Ok(())
            }
            Ok(events) => {
                let mode = if inner.fresh {
                    MergeMode::Replace
                } else {
                    MergeMode::Append
                };
                inner.store.merge(events, mode);
                inner.cursor.advance();
                let snapshot = inner.store.events();
                if inner.fresh {
                    inner.fresh = false;
                    self.state.set(SyncState::Success(snapshot));
                } else {
                    self.state.set(SyncState::Append(snapshot));
                }
                Ok(())
            }
            Err(e) => {
                self.state.set(SyncState::Error(e.to_string()));
                Err(FeedError::Gateway(e))
            }
        }
    }

    /// Clears the store and cursor, then immediately fetches a fresh first
    /// page. Any in-flight result from before the reset is discarded.
    pub async fn reset(&self) -> Result<(), FeedError> {
        {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            inner.epoch += 1;
            inner.in_flight = false;
            inner.store.clear();
            inner.cursor.reset();
            inner.fresh = true;
            // In-flight toggles hold their own Arc clones and their results
            // are discarded by the epoch check.
            inner.toggles.clear();
        }
        self.state.set(SyncState::Loading);
        self.load_next().await
    }

    /// Optimistically toggles the favorite flag on a record.
    ///
    /// The flip is visible in the store before the network call resolves. On
    /// success the server-confirmed value wins; on failure the pre-toggle
    /// value is restored and a scoped [`RecordError`] is emitted — the list's
    /// sync state is untouched either way. Toggles on the same id are
    /// serialized; toggles on different ids proceed concurrently.
    pub async fn toggle_favorite(&self, event_id: &str) -> Result<bool, FeedError> {
        let lock = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            if inner.store.get(event_id).is_none() {
                return Err(FeedError::NotFound(event_id.to_string()));
            }
            inner
                .toggles
                .entry(event_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _serialized = lock.lock().await;

        // Re-read under the per-id lock; an earlier toggle may have landed.
        let (epoch, previous) = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            let previous = match inner.store.get(event_id) {
                Some(event) => event.is_favorite,
                None => return Err(FeedError::NotFound(event_id.to_string())),
            };
            let _ = inner.store.update_one(event_id, |e| e.is_favorite = !previous);
            (inner.epoch, previous)
        };

        debug!(event_id, optimistic = !previous, "toggling favorite");
        let result = self.gateway.toggle_favorite(event_id).await;

        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch || inner.closed {
            return result.map_err(FeedError::from);
        }
        match result {
            Ok(confirmed) => {
                let _ = inner.store.update_one(event_id, |e| e.is_favorite = confirmed);
                Ok(confirmed)
            }
            Err(e) => {
                let _ = inner.store.update_one(event_id, |e| e.is_favorite = previous);
                let _ = self.record_errors.send(RecordError {
                    event_id: event_id.to_string(),
                    message: e.to_string(),
                });
                Err(FeedError::Gateway(e))
            }
        }
    }

    /// Creates an event through the gateway and merges the returned record.
    pub async fn create_event(&self, draft: EventDraft) -> Result<Event, FeedError> {
        if let Err(message) = draft.validate() {
            return Err(FeedError::Gateway(GatewayError::Validation(message)));
        }
        let epoch = {
            let inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            inner.epoch
        };

        let created = self.gateway.create_event(&draft).await?;

        let mut inner = self.inner.lock().await;
        if inner.epoch == epoch && !inner.closed {
            let was_empty = inner.store.is_empty();
            inner.store.merge(vec![created.clone()], MergeMode::Append);
            let snapshot = inner.store.events();
            if was_empty {
                self.state.set(SyncState::Success(snapshot));
            } else {
                self.state.set(SyncState::Append(snapshot));
            }
        }
        Ok(created)
    }

    /// Deletes an event. The record leaves the store only after the gateway
    /// acknowledges the deletion.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), FeedError> {
        let epoch = {
            let inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            inner.epoch
        };

        self.gateway.delete_event(event_id).await?;

        let mut inner = self.inner.lock().await;
        if inner.epoch == epoch && !inner.closed && inner.store.remove(event_id) {
            let snapshot = inner.store.events();
            if snapshot.is_empty() {
                self.state.set(SyncState::Empty);
            } else {
                self.state.set(SyncState::Success(snapshot));
            }
        }
        Ok(())
    }

    /// Purchases tickets. On success the local ticket count is decremented;
    /// a failure is scoped to the record and does not disturb the list state.
    pub async fn purchase_ticket(
        &self,
        event_id: &str,
        quantity: u32,
    ) -> Result<PurchaseReceipt, FeedError> {
        if quantity == 0 {
            return Err(FeedError::Gateway(GatewayError::Validation(
                "quantity must be at least 1".to_string(),
            )));
        }
        let epoch = {
            let inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            inner.epoch
        };

        match self.gateway.purchase_ticket(event_id, quantity).await {
            Ok(receipt) => {
                let mut inner = self.inner.lock().await;
                if inner.epoch == epoch && !inner.closed {
                    let _ = inner.store.update_one(event_id, |e| {
                        e.available_tickets = e.available_tickets.saturating_sub(quantity);
                    });
                }
                Ok(receipt)
            }
            Err(e) => {
                let _ = self.record_errors.send(RecordError {
                    event_id: event_id.to_string(),
                    message: e.to_string(),
                });
                Err(FeedError::Gateway(e))
            }
        }
    }

    /// Replaces the list with search results. A query change carries reset
    /// semantics: the cursor rewinds and any in-flight page fetch is
    /// discarded. Search results are a single unpaginated replacement; a
    /// later `load_next` leaves search mode and replaces them with the
    /// first page of the full list.
    pub async fn search(&self, query: SearchQuery) -> Result<(), FeedError> {
        let epoch = {
            let mut inner = self.inner.lock().await;
            if inner.closed {
                return Err(FeedError::Closed);
            }
            inner.epoch += 1;
            inner.in_flight = false;
            inner.cursor.reset();
            inner.fresh = true;
            inner.epoch
        };
        self.state.set(SyncState::Loading);

        match self.gateway.search_events(&query).await {
            Ok(results) => {
                let mut inner = self.inner.lock().await;
                if inner.epoch != epoch || inner.closed {
                    return Ok(());
                }
                inner.store.merge(results, MergeMode::Replace);
                let snapshot = inner.store.events();
                // `fresh` stays set so the next page fetch replaces the
                // results instead of appending the full list onto them.
                if snapshot.is_empty() {
                    self.state.set(SyncState::Empty);
                } else {
                    self.state.set(SyncState::Success(snapshot));
                }
                Ok(())
            }
            Err(e) => {
                self.state.set(SyncState::Error(e.to_string()));
                Err(FeedError::Gateway(e))
            }
        }
    }

    /// Tears the feed down. In-flight results are discarded on arrival and
    /// all further commands return [`FeedError::Closed`].
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        inner.closed = true;
        inner.epoch += 1;
        inner.toggles.clear();
    }
}
