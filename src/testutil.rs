//! Shared test fixtures: a scripted HTTP client, a fixed clock, and wire
//! body builders.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::error::Error;
use crate::time::Clock;
use crate::transport::{HttpClient, HttpRequest, HttpResponse};

/// Mock HTTP client that returns a configurable sequence of responses and
/// captures every request it sees.
#[derive(Debug)]
pub struct MockHttp {
    responses: Mutex<Vec<Result<HttpResponse, Error>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockHttp {
    pub fn new(responses: Vec<Result<HttpResponse, Error>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// A mock that answers every call with the same JSON body and status.
    pub fn replying(status: u16, body: &Value) -> Self {
        Self::new(vec![Ok(json_response(status, body))])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .expect("no request captured")
            .clone()
    }
}

impl HttpClient for MockHttp {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for std::sync::Arc<MockHttp> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, Error> {
        (**self).request(req).await
    }
}

/// Builds a buffered JSON response with the given status.
pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        serde_json::to_vec(body).unwrap(),
    )
}

/// Builds a server error-envelope response.
pub fn error_response(status: u16, message: &str, code: Option<&str>) -> HttpResponse {
    let mut error = json!({ "message": message });
    if let Some(code) = code {
        error["code"] = Value::String(code.to_owned());
    }
    json_response(status, &json!({ "error": error }))
}

/// Parses a captured request body as JSON.
pub fn request_body(req: &HttpRequest) -> Value {
    serde_json::from_slice(req.body.as_deref().expect("request has no body")).unwrap()
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A complete event entity body, as the server would return it.
pub fn event_json(id: &str, webhook_url: &str) -> Value {
    json!({
        "id": id,
        "cron_id": null,
        "retry_of": null,
        "scheduled_at": "2030-01-01T00:00:00Z",
        "executed_at": null,
        "status": "pending",
        "webhook_url": webhook_url,
        "method": "POST",
        "headers": null,
        "payload": null,
        "retry_config": null,
        "response": null,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z",
        "team_id": "team_1",
    })
}

/// A complete cron entity body, as the server would return it.
pub fn cron_json(id: &str, cron_expression: &str, webhook_url: &str) -> Value {
    json!({
        "id": id,
        "cron_expression": cron_expression,
        "timezone": null,
        "webhook_url": webhook_url,
        "method": "POST",
        "headers": null,
        "payload": null,
        "retry_config": null,
        "is_active": true,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z",
        "team_id": "team_1",
    })
}
