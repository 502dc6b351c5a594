//! Wire data model for the Hookwave API.
//!
//! All entities are owned by the remote service; this client only defines
//! their shape and holds transient copies. Entity fields are snake_case on
//! the wire, retry configuration is camelCase, timestamps are RFC 3339.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// HTTP method used by the remote service when delivering a webhook.
///
/// The API accepts exactly this set; anything else is rejected before a
/// request is built. Note this is the method of the *delivery*, not of the
/// API call that schedules it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST (the default for create operations)
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// The uppercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(Error::validation_with(
                format!(
                    "invalid HTTP method '{other}': expected one of GET, POST, PUT, PATCH, \
                     DELETE, HEAD, OPTIONS"
                ),
                serde_json::json!({ "field": "method", "value": other }),
            )),
        }
    }
}

/// Growth strategy for the delay between webhook delivery retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffType {
    /// Delay doubles after each failed attempt.
    Exponential,
    /// Delay grows by a fixed step after each failed attempt.
    Linear,
}

/// Retry policy applied by the remote service to failed webhook deliveries.
///
/// All fields are optional; absent fields fall back to remote defaults. The
/// client enforces the bounds below before transmission, never the retry
/// execution itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    /// Number of delivery attempts after the first failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// Base delay between attempts, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_ms: Option<u64>,
    /// How the delay grows across attempts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_type: Option<BackoffType>,
}

impl RetryConfig {
    /// Minimum accepted `max_retries`.
    pub const MIN_RETRIES: u32 = 1;
    /// Maximum accepted `max_retries`.
    pub const MAX_RETRIES: u32 = 10;
    /// Minimum accepted `backoff_ms`.
    pub const MIN_BACKOFF_MS: u64 = 100;
    /// Maximum accepted `backoff_ms`.
    pub const MAX_BACKOFF_MS: u64 = 5_000;
}

/// Lifecycle state of an [`Event`], owned and advanced by the server.
///
/// `pending → processing → success | failed`; a failed event may spawn a
/// replacement event whose `retry_of` points back at it. The client only
/// observes these transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Scheduled but not yet picked up.
    Pending,
    /// Delivery in progress.
    Processing,
    /// Delivered successfully.
    Success,
    /// Delivery failed after all retries.
    Failed,
}

impl EventStatus {
    /// The lowercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a completed webhook delivery attempt.
///
/// Null on events that have not executed yet. The body is truncated by the
/// server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Status code the target answered with.
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Response headers from the target.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// Truncated response body.
    #[serde(default)]
    pub body: Option<String>,
    /// Wall-clock duration of the delivery, in milliseconds.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Transport-level error text, when the delivery never got a response.
    #[serde(default)]
    pub error: Option<String>,
}

/// A one-off scheduled webhook invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Server-assigned identifier.
    pub id: String,
    /// Set when this event was spawned by a cron firing.
    #[serde(default)]
    pub cron_id: Option<String>,
    /// Set when this event is the server's retry of a failed event.
    #[serde(default)]
    pub retry_of: Option<String>,
    /// When the webhook fires. Must be in the future at creation time.
    pub scheduled_at: DateTime<Utc>,
    /// When the delivery actually ran, once it has.
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
    /// Server-owned lifecycle state.
    pub status: EventStatus,
    /// Absolute target URL of the delivery.
    pub webhook_url: String,
    /// Method of the delivery request.
    pub method: HttpMethod,
    /// Custom headers sent with the delivery.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// JSON payload sent as the delivery body.
    #[serde(default)]
    pub payload: Option<Value>,
    /// Retry policy for failed deliveries.
    #[serde(default)]
    pub retry_config: Option<RetryConfig>,
    /// Delivery outcome, once the event has executed.
    #[serde(default)]
    pub response: Option<WebhookResponse>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning team.
    pub team_id: String,
}

/// A recurring schedule definition.
///
/// Each firing produces a derived [`Event`] whose `cron_id` references this
/// cron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cron {
    /// Server-assigned identifier.
    pub id: String,
    /// Five-field schedule string (minute, hour, day-of-month, month,
    /// day-of-week). Evaluated by the server, not by this client.
    pub cron_expression: String,
    /// IANA timezone the expression is evaluated in.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Absolute target URL of each delivery.
    pub webhook_url: String,
    /// Method of the delivery requests.
    pub method: HttpMethod,
    /// Custom headers sent with each delivery.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    /// JSON payload sent as each delivery body.
    #[serde(default)]
    pub payload: Option<Value>,
    /// Retry policy for failed deliveries.
    #[serde(default)]
    pub retry_config: Option<RetryConfig>,
    /// Whether the cron currently fires. Null means active (the server
    /// default).
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning team.
    pub team_id: String,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 0-indexed page number.
    pub page: u32,
    /// Page size, 1–1000.
    pub limit: u32,
    /// Total matching items across all pages.
    pub total: u64,
}

/// A page of list results, returned unmodified from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Position of this page within the full result set.
    pub pagination: Pagination,
}
