use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmation returned by the server after a ticket purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub purchase_id: String,
    pub event_id: String,
    pub quantity: u32,
    pub total_price: f64,
    pub purchase_date: DateTime<Utc>,
    /// Entry code for the venue, when the backend issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl fmt::Display for PurchaseReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purchase {}", self.purchase_id)?;
        writeln!(f, "  Event:    {}", self.event_id)?;
        writeln!(f, "  Tickets:  {}", self.quantity)?;
        writeln!(f, "  Total:    {:.2}", self.total_price)?;
        writeln!(
            f,
            "  Date:     {}",
            self.purchase_date.format("%Y-%m-%d %H:%M UTC")
        )?;
        if let Some(code) = &self.qr_code {
            writeln!(f, "  Code:     {}", code)?;
        }
        Ok(())
    }
}
