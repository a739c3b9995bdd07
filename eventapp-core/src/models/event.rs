use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An event as served by the backend, plus the client-local favorite flag.
///
/// `is_favorite` is only meaningful on this device until the server confirms
/// it; list responses that omit the field deserialize to `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub price: f64,
    pub location: String,
    pub organizer_id: String,
    pub available_tickets: u32,
    #[serde(default)]
    pub is_favorite: bool,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.id)?;
        writeln!(f, "  When:     {}", self.date_time.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f, "  Where:    {}", self.location)?;
        if self.price == 0.0 {
            writeln!(f, "  Price:    free")?;
        } else {
            writeln!(f, "  Price:    {:.2}", self.price)?;
        }
        writeln!(f, "  Tickets:  {} available", self.available_tickets)?;
        if self.is_favorite {
            writeln!(f, "  Favorite: yes")?;
        }
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        Ok(())
    }
}

/// Creation payload for a new event. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub price: f64,
    pub location: String,
    pub organizer_id: String,
    pub available_tickets: u32,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            date_time,
            price: 0.0,
            location: location.into(),
            organizer_id: String::new(),
            available_tickets: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_organizer(mut self, organizer_id: impl Into<String>) -> Self {
        self.organizer_id = organizer_id.into();
        self
    }

    pub fn with_available_tickets(mut self, count: u32) -> Self {
        self.available_tickets = count;
        self
    }

    /// Checks the payload before it is sent to the server.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("event name must not be empty".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("event location must not be empty".to_string());
        }
        if self.price < 0.0 {
            return Err("event price must not be negative".to_string());
        }
        Ok(())
    }
}
