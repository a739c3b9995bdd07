mod event;
mod purchase;
mod search;

pub use event::{Event, EventDraft};
pub use purchase::PurchaseReceipt;
pub use search::SearchQuery;
