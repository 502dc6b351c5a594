//! HTTP transport layer for the Hookwave API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Authenticated JSON calls against the API ([`ApiTransport`])

mod api;
mod client;
mod http;

#[cfg(test)]
mod api_tests;

pub use api::{API_URL, ApiTransport, Envelope};
pub use client::ReqwestClient;
pub use http::{HttpClient, HttpRequest, HttpResponse};
