//! HTTP/JSON gateway bound to the EventApp backend REST API.
//!
//! ## Endpoints
//!
//! - `GET    {base}/api/events/?page=N&page_size=M`
//! - `POST   {base}/api/events/`
//! - `POST   {base}/api/events/{id}/favorite/`
//! - `DELETE {base}/api/events/{id}/`
//! - `POST   {base}/api/events/{id}/purchase/?quantity=N`
//! - `GET    {base}/api/events/search/?query=...`
//!
//! List responses arrive in an `{"events": [...]}` envelope; error bodies as
//! `{"error": "..."}`. Requests carry a bearer key when one is configured.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::GatewayError;
use crate::gateway::EventGateway;
use crate::models::{Event, EventDraft, PurchaseReceipt, SearchQuery};
use crate::page::PageCursor;

/// Envelope for list responses.
#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    events: Vec<Event>,
}

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// [`EventGateway`] implementation over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpGateway {
    /// Creates a gateway for the given server.
    ///
    /// Accepts URLs with or without a scheme; a missing scheme defaults to
    /// `http://`. A trailing slash is trimmed.
    pub fn new(server_url: impl AsRef<str>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(server_url.as_ref()),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Maps a non-success response to the error taxonomy, preferring the
    /// server's message over the bare status line.
    async fn into_error(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let message = match response.json::<ApiError>().await {
            Ok(body) => body.error,
            Err(_) => format!("server returned status {}", status),
        };
        match status.as_u16() {
            404 => GatewayError::NotFound(message),
            400 => GatewayError::Validation(message),
            409 => GatewayError::Conflict(message),
            _ => GatewayError::Network(message),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::into_error(response).await)
        }
    }
}

#[async_trait]
impl EventGateway for HttpGateway {
    async fn fetch_page(&self, cursor: &PageCursor) -> Result<Vec<Event>, GatewayError> {
        debug!(page = cursor.page, page_size = cursor.page_size, "GET events page");
        let request = self.client.get(self.url("/api/events/")).query(&[
            ("page", cursor.page.to_string()),
            ("page_size", cursor.page_size.to_string()),
        ]);
        let envelope: EventsEnvelope = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(envelope.events)
    }

    async fn toggle_favorite(&self, event_id: &str) -> Result<bool, GatewayError> {
        debug!(event_id, "POST favorite toggle");
        let request = self
            .client
            .post(self.url(&format!("/api/events/{}/favorite/", event_id)));
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, GatewayError> {
        debug!(name = %draft.name, "POST create event");
        let request = self.client.post(self.url("/api/events/")).json(draft);
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), GatewayError> {
        debug!(event_id, "DELETE event");
        let request = self
            .client
            .delete(self.url(&format!("/api/events/{}/", event_id)));
        self.send(request).await?;
        Ok(())
    }

    async fn purchase_ticket(
        &self,
        event_id: &str,
        quantity: u32,
    ) -> Result<PurchaseReceipt, GatewayError> {
        debug!(event_id, quantity, "POST purchase");
        let request = self
            .client
            .post(self.url(&format!("/api/events/{}/purchase/", event_id)))
            .query(&[("quantity", quantity.to_string())]);
        match self.send(request).await {
            Ok(response) => response
                .json()
                .await
                .map_err(|e| GatewayError::Network(e.to_string())),
            // The backend reports an oversold purchase as a conflict.
            Err(GatewayError::Conflict(_)) => Err(GatewayError::InsufficientInventory {
                event_id: event_id.to_string(),
                requested: quantity,
            }),
            Err(e) => Err(e),
        }
    }

    async fn search_events(&self, query: &SearchQuery) -> Result<Vec<Event>, GatewayError> {
        debug!(query = %query.query, "GET event search");
        let mut params = vec![("query", query.query.clone())];
        if let Some(location) = &query.location {
            params.push(("location", location.clone()));
        }
        if let Some(from) = query.date_from {
            params.push(("date_from", from.to_rfc3339()));
        }
        if let Some(to) = query.date_to {
            params.push(("date_to", to.to_rfc3339()));
        }
        let request = self
            .client
            .get(self.url("/api/events/search/"))
            .query(&params);
        let envelope: EventsEnvelope = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(envelope.events)
    }
}

fn normalize_base_url(url: &str) -> String {
    let with_scheme = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    };
    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_status_maps_to_error_taxonomy() {
        let err = HttpGateway::into_error(response(404, r#"{"error": "Event not found"}"#)).await;
        assert_eq!(err, GatewayError::NotFound("Event not found".to_string()));

        let err =
            HttpGateway::into_error(response(400, r#"{"error": "name must not be empty"}"#)).await;
        assert_eq!(err, GatewayError::Validation("name must not be empty".to_string()));

        let err = HttpGateway::into_error(response(409, r#"{"error": "not enough tickets"}"#)).await;
        assert_eq!(err, GatewayError::Conflict("not enough tickets".to_string()));
    }

    #[tokio::test]
    async fn test_unparseable_error_body_falls_back_to_status() {
        let err = HttpGateway::into_error(response(500, "oops")).await;
        assert_eq!(
            err,
            GatewayError::Network("server returned status 500 Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_normalize_base_url() {
        let gateway = HttpGateway::new("http://localhost:8080", None);
        assert_eq!(gateway.base_url(), "http://localhost:8080");

        let gateway = HttpGateway::new("https://events.example.com/", None);
        assert_eq!(gateway.base_url(), "https://events.example.com");

        let gateway = HttpGateway::new("localhost:8080", None);
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_url_building() {
        let gateway = HttpGateway::new("http://localhost:8080/", None);
        assert_eq!(gateway.url("/api/events/"), "http://localhost:8080/api/events/");
        assert_eq!(
            gateway.url("/api/events/ev-1/favorite/"),
            "http://localhost:8080/api/events/ev-1/favorite/"
        );
    }

    #[test]
    fn test_envelope_decoding() {
        let body = r#"{"events": [{
            "id": "ev-1",
            "name": "Jazz Night",
            "description": "",
            "dateTime": "2026-06-01T19:30:00Z",
            "price": 35.0,
            "location": "Blue Note",
            "organizerId": "org-1",
            "availableTickets": 120
        }]}"#;
        let envelope: EventsEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.events.len(), 1);
        assert_eq!(envelope.events[0].id, "ev-1");
    }

    #[test]
    fn test_error_body_decoding() {
        let body = r#"{"error": "Event not found"}"#;
        let err: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(err.error, "Event not found");
    }
}
