//! Facade wiring configuration, transport, and resource clients together.

use std::sync::Arc;

use crate::config::{Config, ResolvedConfig};
use crate::error::Error;
use crate::resources::{CreateCron, CreateEvent, CronsClient, EventsClient};
use crate::time::{Clock, SystemClock};
use crate::transport::{ApiTransport, HttpClient, ReqwestClient};
use crate::types::{Cron, Event};

/// Entry point for the Hookwave API.
///
/// Construction resolves the configuration (explicit values win over the
/// environment) and never fails: a missing API key only surfaces on the
/// first call that needs it. Both resource clients share one read-only
/// transport, so concurrent calls on the same instance are safe.
///
/// # Example
///
/// ```no_run
/// use hookwave::{Config, CreateEvent, HookwaveClient};
///
/// # async fn example() -> Result<(), hookwave::Error> {
/// let client = HookwaveClient::new(
///     Config::new()
///         .with_api_key("hw_live_123")
///         .with_base_url("https://example.com"),
/// );
///
/// let event = client
///     .schedule(CreateEvent {
///         webhook_url: "/webhooks/reminder".to_owned(),
///         scheduled_at: "2030-01-01T09:00:00Z".to_owned(),
///         ..CreateEvent::default()
///     })
///     .await?;
/// println!("scheduled {}", event.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HookwaveClient<H = ReqwestClient, C = SystemClock> {
    /// One-off scheduled events.
    pub events: EventsClient<H, C>,
    /// Recurring cron-style jobs.
    pub crons: CronsClient<H>,
}

impl HookwaveClient {
    /// Creates a client over the production HTTP transport.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_http_client(ReqwestClient::new(), config)
    }

    /// Creates a client configured entirely from the environment
    /// (`HOOKWAVE_API_KEY`, `HOOKWAVE_BASE_URL`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Config::default())
    }
}

impl<H> HookwaveClient<H> {
    /// Creates a client over a custom [`HttpClient`] implementation.
    pub fn with_http_client(http: H, config: Config) -> Self {
        Self::from_resolved(http, config.resolve())
    }

    /// Creates a client over an already-resolved configuration.
    ///
    /// Combine with [`Config::resolve_with`] to supply a fake environment
    /// lookup in tests.
    pub fn from_resolved(http: H, config: ResolvedConfig) -> Self {
        let transport = Arc::new(ApiTransport::new(http, config));
        Self {
            events: EventsClient::new(Arc::clone(&transport)),
            crons: CronsClient::new(transport),
        }
    }
}

impl<H, C> HookwaveClient<H, C> {
    /// Swaps the clock used for the future-timestamp check.
    ///
    /// This is primarily useful for testing with a pinned instant.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> HookwaveClient<H, C2> {
        HookwaveClient {
            events: self.events.with_clock(clock),
            crons: self.crons,
        }
    }
}

impl<H: HttpClient, C: Clock> HookwaveClient<H, C> {
    /// Convenience alias for `events.create`.
    ///
    /// # Errors
    ///
    /// Identical to [`EventsClient::create`].
    pub async fn schedule(&self, input: CreateEvent) -> Result<Event, Error> {
        self.events.create(input).await
    }

    /// Convenience alias for `crons.create`.
    ///
    /// # Errors
    ///
    /// Identical to [`CronsClient::create`].
    pub async fn repeat(&self, input: CreateCron) -> Result<Cron, Error> {
        self.crons.create(input).await
    }
}
