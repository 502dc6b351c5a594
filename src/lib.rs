//! Typed async client for the Hookwave webhook scheduling API.
//!
//! Hookwave schedules one-off webhook deliveries ([`Event`]) and recurring
//! cron-style jobs ([`Cron`]) on a remote service. This crate wraps the
//! REST API with typed request/response structs, client-side input
//! validation, and a closed error taxonomy. All cron evaluation, delivery
//! execution, and retry handling happen remotely; the client validates,
//! issues one HTTP request per call, and maps the outcome into a typed
//! result.
//!
//! # Example
//!
//! ```no_run
//! use hookwave::{Config, CreateCron, HookwaveClient};
//!
//! # async fn example() -> Result<(), hookwave::Error> {
//! let client = HookwaveClient::new(Config::new().with_api_key("hw_live_123"));
//!
//! let cron = client
//!     .repeat(CreateCron {
//!         cron_expression: "0 9 * * 1-5".to_owned(),
//!         webhook_url: "https://example.com/digest".to_owned(),
//!         ..CreateCron::default()
//!     })
//!     .await?;
//! println!("created {}", cron.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod time;
pub mod transport;
pub mod types;
pub mod validate;

#[cfg(test)]
mod testutil;

pub use client::HookwaveClient;
pub use config::Config;
pub use error::Error;
pub use resources::{
    CreateCron, CreateEvent, CronsClient, EventsClient, ListCrons, ListEvents, UpdateCron,
    UpdateEvent,
};
pub use types::{
    BackoffType, Cron, Event, EventStatus, HttpMethod, Page, Pagination, RetryConfig,
    WebhookResponse,
};
