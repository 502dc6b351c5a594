//! Authenticated JSON calls against the Hookwave REST API.

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ResolvedConfig;
use crate::error::Error;

use super::{HttpClient, HttpRequest, HttpResponse};

/// Production endpoint of the Hookwave REST API.
pub const API_URL: &str = "https://api.hookwave.io";

/// Single-item success envelope: `{ "data": T }`.
///
/// List responses use [`Page`](crate::types::Page) instead, which carries
/// pagination alongside the data.
#[derive(Debug, serde::Deserialize)]
pub struct Envelope<T> {
    /// The wrapped item.
    pub data: T,
}

/// Performs one authenticated JSON request per call.
///
/// Holds the fixed API endpoint, the resolved configuration, and an
/// [`HttpClient`] implementation. Every call resolves the API key (failing
/// with [`Error::MissingApiKey`] before anything touches the network),
/// attaches bearer authentication, and translates non-2xx responses into
/// the error taxonomy. There is no retry, timeout, or queueing here; one
/// call is one request.
#[derive(Debug)]
pub struct ApiTransport<H> {
    http: H,
    api_url: Url,
    config: ResolvedConfig,
}

impl<H> ApiTransport<H> {
    /// Creates a transport over the given HTTP client and configuration.
    pub fn new(http: H, config: ResolvedConfig) -> Self {
        // Infallible: API_URL is a valid absolute URL.
        let api_url = Url::parse(API_URL).expect("API_URL parses");
        Self {
            http,
            api_url,
            config,
        }
    }

    /// The configured webhook base URL, used for relative URL resolution.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.config.base_url()
    }
}

impl<H: HttpClient> ApiTransport<H> {
    /// Issues a GET and decodes the response body.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingApiKey`] before any request when no key
    /// is configured, with a transport error when the request never
    /// completes, or with the mapped taxonomy entry for non-2xx responses.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let response = self.send(Method::GET, path, query, None).await?;
        decode(&response)
    }

    /// Issues a POST with a JSON body and decodes the response body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiTransport::get`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let response = self.send(Method::POST, path, &[], Some(encode(body)?)).await?;
        decode(&response)
    }

    /// Issues a PUT with a JSON body and decodes the response body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiTransport::get`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let response = self.send(Method::PUT, path, &[], Some(encode(body)?)).await?;
        decode(&response)
    }

    /// Issues a DELETE; success carries no body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiTransport::get`].
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(Method::DELETE, path, &[], None).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, Error> {
        let api_key = self.config.api_key()?;

        let mut url = self
            .api_url
            .join(path)
            .map_err(|e| Error::validation(format!("invalid request path '{path}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(name, value)| (*name, value.as_str())));
        }

        let auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| Error::validation(format!("API key is not a valid header value: {e}")))?;
        let mut request = HttpRequest::new(method, url).with_header(AUTHORIZATION, auth);
        if let Some(body) = body {
            request = request
                .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .with_body(body);
        }

        tracing::debug!(method = %request.method, url = %request.url, "sending API request");
        let response = self.http.request(request).await?;

        if response.is_success() {
            Ok(response)
        } else {
            tracing::debug!(status = %response.status, "API request failed");
            Err(Error::from_response(response.status, &response.body))
        }
    }
}

fn encode(body: &impl Serialize) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(body).map_err(|e| Error::InternalServer {
        message: format!("failed to encode request body: {e}"),
        details: None,
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    serde_json::from_slice(&response.body).map_err(|e| Error::InternalServer {
        message: format!("failed to decode response body: {e}"),
        details: None,
    })
}
