//! Client for recurring cron-style jobs.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::transport::{ApiTransport, Envelope, HttpClient};
use crate::types::{Cron, HttpMethod, Page, RetryConfig};
use crate::validate;

const CRONS_PATH: &str = "/api/v1/crons";

/// Input for [`CronsClient::create`].
///
/// `cron_expression` and `webhook_url` are required. The expression is
/// sent verbatim; its syntax is validated by the service, not locally.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCron {
    /// Five-field schedule string (minute, hour, day-of-month, month,
    /// day-of-week).
    pub cron_expression: String,
    /// Target URL: absolute, or `/`-prefixed and resolved against the
    /// configured base URL.
    pub webhook_url: String,
    /// IANA timezone the expression is evaluated in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
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
    /// Whether the cron fires; the server defaults this to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial input for [`CronsClient::update`].
///
/// Absent fields are omitted from the request and keep their current
/// values on the server. Unlike create, the method is never defaulted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCron {
    /// New schedule string, still validated only by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
    /// New target URL, validated and resolved like on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// New timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
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
    /// Pause or resume the cron.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Filters and pagination for [`CronsClient::list`].
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCrons {
    /// 0-indexed page number.
    pub page: Option<u32>,
    /// Page size, 1–1000.
    pub limit: Option<u32>,
    /// Only active (or only paused) crons.
    pub is_active: Option<bool>,
}

impl ListCrons {
    fn query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(is_active) = self.is_active {
            query.push(("is_active", is_active.to_string()));
        }
        query
    }
}

/// Client for the `/api/v1/crons` resource.
#[derive(Debug)]
pub struct CronsClient<H> {
    transport: Arc<ApiTransport<H>>,
}

impl<H> CronsClient<H> {
    pub(crate) fn new(transport: Arc<ApiTransport<H>>) -> Self {
        Self { transport }
    }
}

impl<H: HttpClient> CronsClient<H> {
    /// Lists crons, optionally filtered by active state.
    ///
    /// Returns the server's paginated envelope unmodified.
    ///
    /// # Errors
    ///
    /// Surfaces transport failures and server-mapped errors; no filter
    /// value is validated client-side.
    pub async fn list(&self, params: ListCrons) -> Result<Page<Cron>, Error> {
        self.transport.get(CRONS_PATH, &params.query()).await
    }

    /// Fetches a single cron by identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] for unknown identifiers, plus the
    /// usual transport and server error mappings.
    pub async fn get(&self, id: &str) -> Result<Cron, Error> {
        let envelope: Envelope<Cron> =
            self.transport.get(&format!("{CRONS_PATH}/{id}"), &[]).await?;
        Ok(envelope.data)
    }

    /// Creates a new recurring job.
    ///
    /// Validates, in order: the delivery method (defaulting to `POST`),
    /// the webhook URL (resolving relative paths against the configured
    /// base URL), the retry configuration, and the custom headers. The
    /// cron expression is not checked locally; a malformed expression
    /// comes back as a server-side [`Error::Validation`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Validation`] before any request is sent when an
    /// input is rejected; otherwise surfaces transport and server errors.
    pub async fn create(&self, mut input: CreateCron) -> Result<Cron, Error> {
        input.method = Some(input.method.unwrap_or(HttpMethod::Post));
        input.webhook_url =
            validate::normalize_webhook_url(&input.webhook_url, self.transport.base_url())?;
        validate::validate_retry_config(input.retry_config.as_ref())?;
        validate::validate_headers(input.headers.as_ref())?;

        let envelope: Envelope<Cron> = self.transport.post(CRONS_PATH, &input).await?;
        Ok(envelope.data)
    }

    /// Updates a cron.
    ///
    /// Runs the same validation sequence as [`CronsClient::create`] on
    /// every present field, but never substitutes a default method.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CronsClient::create`].
    pub async fn update(&self, id: &str, mut input: UpdateCron) -> Result<Cron, Error> {
        if let Some(webhook_url) = input.webhook_url.take() {
            input.webhook_url = Some(validate::normalize_webhook_url(
                &webhook_url,
                self.transport.base_url(),
            )?);
        }
        validate::validate_retry_config(input.retry_config.as_ref())?;
        validate::validate_headers(input.headers.as_ref())?;

        let envelope: Envelope<Cron> = self
            .transport
            .put(&format!("{CRONS_PATH}/{id}"), &input)
            .await?;
        Ok(envelope.data)
    }

    /// Deletes a cron.
    ///
    /// Events already spawned by the cron are unaffected; the server
    /// simply stops producing new ones.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] for unknown identifiers, plus the
    /// usual transport and server error mappings.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.transport.delete(&format!("{CRONS_PATH}/{id}")).await
    }
}
