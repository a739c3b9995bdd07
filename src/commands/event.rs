//! Event commands: browsing, favoriting, creating, purchasing.
//!
//! Each command builds an [`HttpGateway`] and an [`EventFeed`] from the
//! loaded configuration and drives the feed, rendering the observed sync
//! state. The feed owns pagination and optimistic-mutation semantics; the
//! command layer only translates flags and prints results.

use clap::{Args, Subcommand, ValueEnum};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use eventapp_core::{Event, EventDraft, EventFeed, HttpGateway, SearchQuery, SyncState};

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct EventCommand {
    #[command(subcommand)]
    pub command: EventSubcommand,
}

#[derive(Subcommand)]
pub enum EventSubcommand {
    /// List events page by page
    List {
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one event's details
    Show {
        /// Event ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new event
    Create {
        /// Name of the event
        name: String,

        /// Event date-time, ISO 8601 (e.g. 2026-12-25T19:00:00Z)
        #[arg(long)]
        date: String,

        /// Venue or address
        #[arg(long)]
        location: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Ticket price (default: free)
        #[arg(long)]
        price: Option<f64>,

        /// Organizer ID
        #[arg(long)]
        organizer: Option<String>,

        /// Number of tickets available
        #[arg(long)]
        tickets: Option<u32>,
    },

    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },

    /// Toggle an event's favorite flag
    Favorite {
        /// Event ID
        id: String,
    },

    /// Purchase tickets for an event
    Purchase {
        /// Event ID
        id: String,

        /// Number of tickets
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Search events
    Search {
        /// Free-text query
        query: String,

        /// Filter by location
        #[arg(long)]
        location: Option<String>,

        /// Earliest date, ISO 8601
        #[arg(long)]
        from: Option<String>,

        /// Latest date, ISO 8601
        #[arg(long)]
        to: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl EventCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;
        let feed = new_feed(config);

        match &self.command {
            EventSubcommand::List { pages, format } => rt.block_on(list(&feed, *pages, format)),
            EventSubcommand::Show { id, format } => rt.block_on(show(&feed, id, format)),
            EventSubcommand::Create {
                name,
                date,
                location,
                description,
                price,
                organizer,
                tickets,
            } => {
                let mut draft = EventDraft::new(name, location, parse_date(date)?);
                if let Some(description) = description {
                    draft = draft.with_description(description);
                }
                if let Some(price) = price {
                    draft = draft.with_price(*price);
                }
                if let Some(organizer) = organizer {
                    draft = draft.with_organizer(organizer);
                }
                if let Some(tickets) = tickets {
                    draft = draft.with_available_tickets(*tickets);
                }
                rt.block_on(create(&feed, draft))
            }
            EventSubcommand::Delete { id } => rt.block_on(delete(&feed, id)),
            EventSubcommand::Favorite { id } => rt.block_on(favorite(&feed, id)),
            EventSubcommand::Purchase { id, quantity } => {
                rt.block_on(purchase(&feed, id, *quantity))
            }
            EventSubcommand::Search {
                query,
                location,
                from,
                to,
                format,
            } => {
                let mut search_query = SearchQuery::new(query);
                if let Some(location) = location {
                    search_query = search_query.with_location(location);
                }
                if let Some(from) = from {
                    search_query = search_query.with_date_from(parse_date(from)?);
                }
                if let Some(to) = to {
                    search_query = search_query.with_date_to(parse_date(to)?);
                }
                rt.block_on(search(&feed, search_query, format))
            }
        }
    }
}

fn new_feed(config: &Config) -> EventFeed<HttpGateway> {
    let gateway = HttpGateway::new(&config.server_url.value, config.api_key.clone());
    EventFeed::new(Arc::new(gateway), config.page_size.value)
}

fn parse_date(input: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    input
        .parse::<DateTime<Utc>>()
        .map_err(|e| format!("invalid date '{}': {} (expected ISO 8601)", input, e).into())
}

async fn list(
    feed: &EventFeed<HttpGateway>,
    pages: u32,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..pages.max(1) {
        feed.load_next().await?;
    }
    render_state(&feed.state(), format);
    Ok(())
}

/// Pages through the feed until the id shows up or the server runs out of
/// events.
async fn find_event(
    feed: &EventFeed<HttpGateway>,
    id: &str,
) -> Result<Option<Event>, Box<dyn std::error::Error>> {
    loop {
        let before = feed.events().await.len();
        tracing::debug!(id, loaded = before, "paging until event is found");
        feed.load_next().await?;
        let events = feed.events().await;
        if let Some(event) = events.iter().find(|e| e.id == id) {
            return Ok(Some(event.clone()));
        }
        if events.len() == before {
            return Ok(None);
        }
    }
}

async fn show(
    feed: &EventFeed<HttpGateway>,
    id: &str,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match find_event(feed, id).await? {
        Some(event) => {
            match format {
                OutputFormat::Text => print!("{}", event),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
            }
            Ok(())
        }
        None => Err(format!("event not found: {}", id).into()),
    }
}

async fn create(
    feed: &EventFeed<HttpGateway>,
    draft: EventDraft,
) -> Result<(), Box<dyn std::error::Error>> {
    let created = feed.create_event(draft).await?;
    println!("Created event {}", created.id);
    print!("{}", created);
    Ok(())
}

async fn delete(
    feed: &EventFeed<HttpGateway>,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    feed.delete_event(id).await?;
    println!("Deleted event {}", id);
    Ok(())
}

async fn favorite(
    feed: &EventFeed<HttpGateway>,
    id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if find_event(feed, id).await?.is_none() {
        return Err(format!("event not found: {}", id).into());
    }
    let favorited = feed.toggle_favorite(id).await?;
    if favorited {
        println!("Favorited {}", id);
    } else {
        println!("Unfavorited {}", id);
    }
    Ok(())
}

async fn purchase(
    feed: &EventFeed<HttpGateway>,
    id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let receipt = feed.purchase_ticket(id, quantity).await?;
    print!("{}", receipt);
    Ok(())
}

async fn search(
    feed: &EventFeed<HttpGateway>,
    query: SearchQuery,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    feed.search(query).await?;
    render_state(&feed.state(), format);
    Ok(())
}

fn render_state(state: &SyncState, format: &OutputFormat) {
    match state {
        SyncState::Loading => println!("Loading..."),
        SyncState::Empty => println!("No events found."),
        SyncState::Success(events) | SyncState::Append(events) => match format {
            OutputFormat::Text => {
                for event in events {
                    print!("{}", event);
                }
                println!("{} event(s)", events.len());
            }
            OutputFormat::Json => match serde_json::to_string_pretty(events) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: failed to encode events: {}", e),
            },
        },
        SyncState::Error(message) => eprintln!("Error: {}", message),
    }
}
