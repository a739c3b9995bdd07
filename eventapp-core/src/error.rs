//! Error types for gateway calls and feed operations.

use thiserror::Error;

/// Errors surfaced by a network gateway implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Transport, timeout, or response-parse failure.
    #[error("network error: {0}")]
    Network(String),

    /// The referenced id does not exist on the server.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected a creation payload.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Fewer tickets remain than were requested.
    #[error("insufficient inventory for event {event_id}: requested {requested}")]
    InsufficientInventory { event_id: String, requested: u32 },

    /// Concurrent-modification mismatch reported by the server.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors returned by [`EventFeed`](crate::feed::EventFeed) commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The id is not present in the local store; no network call was made.
    #[error("event not found locally: {0}")]
    NotFound(String),

    /// The feed has been closed; the command was ignored.
    #[error("feed is closed")]
    Closed,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
