//! Client configuration and environment resolution.
//!
//! The client takes exactly two optional settings: an API key for bearer
//! authentication and a base URL for resolving relative webhook paths.
//! Each can come from an explicit value or an environment variable, with
//! the explicit value taking precedence. Resolution happens once, at
//! construction; the API key presence check is deferred to first use so a
//! client can always be built.


use crate::error::Error;

/// Environment variable consulted when [`Config::api_key`] is not set.
pub const API_KEY_ENV: &str = "HOOKWAVE_API_KEY";

/// Environment variable consulted when [`Config::base_url`] is not set.
pub const BASE_URL_ENV: &str = "HOOKWAVE_BASE_URL";

/// Caller-supplied configuration, before environment fallback.
///
/// # Example
///
/// ```
/// use hookwave::Config;
///
/// let config = Config::new()
///     .with_api_key("hw_live_123")
///     .with_base_url("https://example.com");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API key sent as `Authorization: Bearer <key>` on every request.
    pub api_key: Option<String>,
    /// Base URL that `/`-prefixed webhook URLs are resolved against.
    pub base_url: Option<String>,
}

impl Config {
    /// Creates an empty configuration (everything falls back to the
    /// environment).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key explicitly, overriding the environment.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the webhook base URL explicitly, overriding the environment.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Applies the environment fallback using the process environment.
    #[must_use]
    pub fn resolve(self) -> ResolvedConfig {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Applies the fallback with an injectable lookup, so tests can supply
    /// a fake environment instead of mutating process-wide state.
    ///
    /// Explicit values win; empty lookup results count as unset.
    pub fn resolve_with(self, lookup: impl Fn(&str) -> Option<String>) -> ResolvedConfig {
        let fallback = |name: &str| lookup(name).filter(|value| !value.is_empty());
        ResolvedConfig {
            api_key: self.api_key.or_else(|| fallback(API_KEY_ENV)),
            base_url: self.base_url.or_else(|| fallback(BASE_URL_ENV)),
        }
    }
}

/// Configuration after the environment fallback has been applied.
///
/// Always constructible: a missing API key is only reported by
/// [`ResolvedConfig::api_key`] when a request actually needs it, while the
/// base URL is fixed eagerly (absent means only absolute webhook URLs are
/// accepted).
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    api_key: Option<String>,
    base_url: Option<String>,
}

impl ResolvedConfig {
    /// Returns the API key, or [`Error::MissingApiKey`] if none was
    /// configured anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] when neither the explicit config
    /// nor the environment provided a key.
    pub fn api_key(&self) -> Result<&str, Error> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }

    /// Returns the webhook base URL, if one was configured.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}
