//! Client-side input validation and webhook URL normalization.
//!
//! Both resource clients run these checks, in a fixed order, before every
//! create/update call. All functions here are pure: failures surface as
//! [`Error::Validation`] without anything touching the network, and the
//! remote service independently re-validates whatever passes.


use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::json;
use url::Url;

use crate::error::Error;
use crate::types::RetryConfig;

/// Resolves a webhook URL to its absolute form.
///
/// Three input shapes are accepted:
/// - an absolute `http://` or `https://` URL, which must parse and is
///   returned unchanged;
/// - a path starting with `/`, resolved against the configured base URL
///   (whose single trailing slash is stripped before concatenation), where
///   the result must parse;
/// - nothing else — any other shape is rejected.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the input is malformed, when a
/// relative path is given without a configured base URL, or when the
/// resolved concatenation is not a well-formed URL.
pub fn normalize_webhook_url(raw: &str, base_url: Option<&str>) -> Result<String, Error> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Url::parse(raw).map_err(|e| {
            Error::validation_with(
                format!("invalid webhook URL '{raw}': {e}"),
                json!({ "field": "webhook_url", "value": raw }),
            )
        })?;
        return Ok(raw.to_owned());
    }

    if raw.starts_with('/') {
        let Some(base) = base_url else {
            return Err(Error::validation_with(
                format!(
                    "webhook URL '{raw}' is relative but no base URL is configured: set \
                     `Config::base_url` or the HOOKWAVE_BASE_URL environment variable"
                ),
                json!({ "field": "webhook_url", "value": raw }),
            ));
        };
        let resolved = format!("{}{raw}", base.strip_suffix('/').unwrap_or(base));
        Url::parse(&resolved).map_err(|e| {
            Error::validation_with(
                format!("resolved webhook URL '{resolved}' is not a valid URL: {e}"),
                json!({ "field": "webhook_url", "value": raw, "resolved": resolved }),
            )
        })?;
        return Ok(resolved);
    }

    Err(Error::validation_with(
        format!(
            "invalid webhook URL '{raw}': expected an absolute http(s) URL or a path starting \
             with '/'"
        ),
        json!({ "field": "webhook_url", "value": raw }),
    ))
}

/// Checks the bounds of a retry configuration.
///
/// Absent configs mean "use remote defaults" and always pass. Partial
/// configs are valid; only present fields are checked. `backoff_type` is
/// enum-typed, so out-of-set values cannot reach this function.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the offending field and value when
/// `max_retries` is outside `[1, 10]` or `backoff_ms` is outside
/// `[100, 5000]`.
pub fn validate_retry_config(retry_config: Option<&RetryConfig>) -> Result<(), Error> {
    let Some(config) = retry_config else {
        return Ok(());
    };

    if let Some(max_retries) = config.max_retries {
        if !(RetryConfig::MIN_RETRIES..=RetryConfig::MAX_RETRIES).contains(&max_retries) {
            return Err(Error::validation_with(
                format!(
                    "maxRetries must be an integer between {} and {}, got {max_retries}",
                    RetryConfig::MIN_RETRIES,
                    RetryConfig::MAX_RETRIES
                ),
                json!({ "field": "maxRetries", "value": max_retries }),
            ));
        }
    }

    if let Some(backoff_ms) = config.backoff_ms {
        if !(RetryConfig::MIN_BACKOFF_MS..=RetryConfig::MAX_BACKOFF_MS).contains(&backoff_ms) {
            return Err(Error::validation_with(
                format!(
                    "backoffMs must be an integer between {} and {}, got {backoff_ms}",
                    RetryConfig::MIN_BACKOFF_MS,
                    RetryConfig::MAX_BACKOFF_MS
                ),
                json!({ "field": "backoffMs", "value": backoff_ms }),
            ));
        }
    }

    Ok(())
}

/// Checks custom webhook headers.
///
/// Absent headers pass, as does an empty map. Every key must be non-empty
/// after trimming; values are typed strings and carry no further
/// constraint. No size or count limit is enforced client-side.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the offending key.
pub fn validate_headers(headers: Option<&BTreeMap<String, String>>) -> Result<(), Error> {
    let Some(headers) = headers else {
        return Ok(());
    };

    for key in headers.keys() {
        if key.trim().is_empty() {
            return Err(Error::validation_with(
                "header names must be non-empty strings",
                json!({ "field": "headers", "key": key }),
            ));
        }
    }

    Ok(())
}

/// Checks that a scheduled time is a well-formed, strictly future instant.
///
/// The input must be non-blank, parse as RFC 3339, and be strictly later
/// than `now` — equality is rejected. `now` is injected so the comparison
/// is deterministic under test; callers pass the current instant. A
/// timestamp that races past "now" between this check and transmission is
/// rejected by the server instead, not re-validated here.
///
/// # Errors
///
/// Returns [`Error::Validation`] carrying the field name, the raw value,
/// and (for the past/now case) the instant used for comparison.
pub fn validate_scheduled_at(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::validation_with(
            "scheduled_at must be a non-empty RFC 3339 timestamp",
            json!({ "field": "scheduled_at", "value": raw }),
        ));
    }

    let scheduled = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|e| {
            Error::validation_with(
                format!("scheduled_at '{raw}' is not a valid RFC 3339 timestamp: {e}"),
                json!({ "field": "scheduled_at", "value": raw }),
            )
        })?
        .with_timezone(&Utc);

    if scheduled <= now {
        return Err(Error::validation_with(
            format!(
                "scheduled_at '{raw}' must be strictly in the future (now is {})",
                now.to_rfc3339()
            ),
            json!({
                "field": "scheduled_at",
                "value": raw,
                "now": now.to_rfc3339(),
            }),
        ));
    }

    Ok(scheduled)
}
