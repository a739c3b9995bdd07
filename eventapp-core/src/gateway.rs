//! Abstract network gateway consumed by the feed.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::{Event, EventDraft, PurchaseReceipt, SearchQuery};
use crate::page::PageCursor;

/// Capability surface the synchronization core requires from the network.
///
/// Transport-agnostic: the shipped implementation binds it to HTTP/JSON
/// ([`HttpGateway`](crate::http::HttpGateway)), tests script it in memory.
/// Implementations own their timeouts; a timeout surfaces as
/// [`GatewayError::Network`] like any other fetch failure.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Fetches the page at the given cursor, in server order.
    async fn fetch_page(&self, cursor: &PageCursor) -> Result<Vec<Event>, GatewayError>;

    /// Toggles the favorite flag; returns the server-confirmed value.
    async fn toggle_favorite(&self, event_id: &str) -> Result<bool, GatewayError>;

    /// Creates an event; the server assigns the id.
    async fn create_event(&self, draft: &EventDraft) -> Result<Event, GatewayError>;

    /// Deletes an event by id.
    async fn delete_event(&self, event_id: &str) -> Result<(), GatewayError>;

    /// Purchases tickets for an event.
    async fn purchase_ticket(
        &self,
        event_id: &str,
        quantity: u32,
    ) -> Result<PurchaseReceipt, GatewayError>;

    /// Searches events by free text and optional filters.
    async fn search_events(&self, query: &SearchQuery) -> Result<Vec<Event>, GatewayError>;
}
