//! EventApp Core Library
//!
//! Shared models and the paginated-list synchronization engine for EventApp
//! clients. The engine is UI-agnostic: a client constructs an
//! [`EventFeed`] over an [`EventGateway`] implementation (the bundled
//! [`HttpGateway`] or a custom one), subscribes to [`SyncState`] transitions,
//! and drives it with `load_next` / `reset` / mutation commands.

pub mod error;
pub mod feed;
pub mod gateway;
pub mod http;
pub mod models;
pub mod page;
pub mod state;
pub mod store;

pub use error::{FeedError, GatewayError};
pub use feed::EventFeed;
pub use gateway::EventGateway;
pub use http::HttpGateway;
pub use models::{Event, EventDraft, PurchaseReceipt, SearchQuery};
pub use page::PageCursor;
pub use state::{RecordError, StateCell, SyncState};
pub use store::{EventStore, MergeMode};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
