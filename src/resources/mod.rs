//! Resource clients for the two Hookwave resource kinds.
//!
//! [`EventsClient`] manages one-off scheduled events, [`CronsClient`]
//! recurring cron-style jobs. Both compose the validation layer and the
//! API transport into the same five operations: list, get, create, update,
//! delete.

mod crons;
mod events;


pub use crons::{CreateCron, CronsClient, ListCrons, UpdateCron};
pub use events::{CreateEvent, EventsClient, ListEvents, UpdateEvent};
