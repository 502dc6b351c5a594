//! Client for one-off scheduled webhook events.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::time::{Clock, SystemClock};
use crate::transport::{ApiTransport, Envelope, HttpClient};
use crate::types::{Event, EventStatus, HttpMethod, Page, RetryConfig};
use crate::validate;

const EVENTS_PATH: &str = "/api/v1/events";

/// Input for [`EventsClient::create`].
///
/// `webhook_url` and `scheduled_at` are required; everything else falls
/// back to remote defaults. A missing `method` defaults to `POST`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEvent {
    /// Target URL: absolute, or `/`-prefixed and resolved against the
    /// configured base URL.
    pub webhook_url: String,
    /// RFC 3339 instant, strictly in the future.
    pub scheduled_at: String,
    /// Delivery method; defaults to `POST` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Custom delivery headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// JSON delivery payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Retry policy for failed deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_config: Option<RetryConfig>,
}

/// Partial input for [`EventsClient::update`].
///
/// Absent fields are omitted from the request and keep their current
/// values on the server. Unlike create, the method is never defaulted.
/// The server only accepts updates while the event is still `pending`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEvent {
    /// New target URL, validated and resolved like on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// New scheduled time, validated like on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    /// New delivery method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// New delivery headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// New delivery payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// New retry policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_config: Option<RetryConfig>,
}

/// Filters and pagination for [`EventsClient::list`].
///
/// Unset fields are omitted from the query string. Page bounds are not
/// checked client-side; an out-of-range page surfaces whatever the server
/// answers.
#[derive(Debug, Clone, Default)]
pub struct ListEvents {
    /// 0-indexed page number.
    pub page: Option<u32>,
    /// Page size, 1–1000.
    pub limit: Option<u32>,
    /// Only events in this lifecycle state.
    pub status: Option<EventStatus>,
    /// Only events spawned by this cron.
    pub cron_id: Option<String>,
}

impl ListEvents {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_owned()));
        }
        if let Some(ref cron_id) = self.cron_id {
            query.push(("cron_id", cron_id.clone()));
        }
        query
    }
}

/// Client for the `/api/v1/events` resource.
///
/// # Type Parameters
///
/// - `H`: the HTTP client implementation
/// - `C`: the clock used for the future-timestamp check (defaults to
///   [`SystemClock`])
#[derive(Debug)]
pub struct EventsClient<H, C = SystemClock> {
    transport: Arc<ApiTransport<H>>,
    clock: C,
}

impl<H> EventsClient<H> {
    pub(crate) fn new(transport: Arc<ApiTransport<H>>) -> Self {
        Self {
            transport,
            clock: SystemClock,
        }
    }
}

impl<H, C> EventsClient<H, C> {
    /// Swaps the clock used for the future-timestamp check.
    ///
    /// This is primarily useful for testing with a pinned instant.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> EventsClient<H, C2> {
        EventsClient {
            transport: self.transport,
            clock,
        }
    }
}

impl<H: HttpClient, C: Clock> EventsClient<H, C> {
    /// Lists events, optionally filtered by status or owning cron.
    ///
    /// Returns the server's paginated envelope unmodified.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and server-mapped errors; no filter
    /// value is validated client-side.
    pub async fn list(&self, params: &ListEvents) -> Result<Page<Event>, Error> {
        self.transport.get(EVENTS_PATH, &params.query()).await
    }

    /// Fetches a single event by identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] for unknown identifiers, plus the
    /// usual transport and server error mappings.
    pub async fn get(&self, id: &str) -> Result<Event, Error> {
        let envelope: Envelope<Event> =
            self.transport.get(&format!("{EVENTS_PATH}/{id}"), &[]).await?;
        Ok(envelope.data)
    }

    /// Schedules a new one-off event.
    ///
    /// Validates, in order: the delivery method (defaulting to `POST`),
    /// the webhook URL (resolving relative paths against the configured
    /// base URL), the retry configuration, the custom headers, and the
    /// scheduled time, which must be strictly in the future.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any request is sent when an
    /// input is rejected; otherwise surfaces transport and server errors.
    pub async fn create(&self, mut input: CreateEvent) -> Result<Event, Error> {
        input.method = Some(input.method.unwrap_or(HttpMethod::Post));
        input.webhook_url =
            validate::normalize_webhook_url(&input.webhook_url, self.transport.base_url())?;
        validate::validate_retry_config(input.retry_config.as_ref())?;
        validate::validate_headers(input.headers.as_ref())?;
        validate::validate_scheduled_at(&input.scheduled_at, self.clock.now())?;

        let envelope: Envelope<Event> = self.transport.post(EVENTS_PATH, &input).await?;
        Ok(envelope.data)
    }

    /// Updates a pending event.
    ///
    /// Runs the same validation sequence as [`EventsClient::create`] on
    /// every present field, but never substitutes a default method.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EventsClient::create`]; the server rejects
    /// updates to events that are no longer `pending`.
    pub async fn update(&self, id: &str, mut input: UpdateEvent) -> Result<Event, Error> {
        if let Some(webhook_url) = input.webhook_url.take() {
            input.webhook_url = Some(validate::normalize_webhook_url(
                &webhook_url,
                self.transport.base_url(),
            )?);
        }
        validate::validate_retry_config(input.retry_config.as_ref())?;
        validate::validate_headers(input.headers.as_ref())?;
        if let Some(ref scheduled_at) = input.scheduled_at {
            validate::validate_scheduled_at(scheduled_at, self.clock.now())?;
        }

        let envelope: Envelope<Event> = self
            .transport
            .put(&format!("{EVENTS_PATH}/{id}"), &input)
            .await?;
        Ok(envelope.data)
    }

    /// Deletes a pending, non-cron-spawned event.
    ///
    /// # Errors
    ///
    /// The server rejects deletion of events that are not `pending` or
    /// that were spawned by a cron; those rejections surface as mapped
    /// errors.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.transport.delete(&format!("{EVENTS_PATH}/{id}")).await
    }
}
