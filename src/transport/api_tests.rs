//! Tests for `ApiTransport`: authentication, URL construction, and error
//! translation.

use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::{Error, code};
use crate::testutil::{MockHttp, error_response, json_response};
use crate::transport::{ApiTransport, Envelope, HttpResponse};

fn transport(mock: &Arc<MockHttp>) -> ApiTransport<Arc<MockHttp>> {
    let config = Config::new()
        .with_api_key("test-key")
        .resolve_with(|_| None);
    ApiTransport::new(Arc::clone(mock), config)
}

mod request_construction {
    use super::*;

    #[tokio::test]
    async fn attaches_bearer_authentication() {
        let mock = Arc::new(MockHttp::replying(200, &json!({ "data": {} })));
        let transport = transport(&mock);

        let _: Envelope<Value> = transport.get("/api/v1/events", &[]).await.unwrap();

        let request = mock.last_request();
        assert_eq!(
            request.headers.get(AUTHORIZATION).unwrap(),
            "Bearer test-key"
        );
    }

    #[tokio::test]
    async fn sets_json_content_type_only_when_a_body_is_sent() {
        let mock = Arc::new(MockHttp::new(vec![
            Ok(json_response(200, &json!({ "data": {} }))),
            Ok(json_response(200, &json!({ "data": {} }))),
        ]));
        let transport = transport(&mock);

        let _: Envelope<Value> = transport.get("/api/v1/events", &[]).await.unwrap();
        let _: Envelope<Value> = transport
            .post("/api/v1/events", &json!({ "webhook_url": "https://x.example" }))
            .await
            .unwrap();

        let requests = mock.captured_requests();
        assert!(requests[0].headers.get(CONTENT_TYPE).is_none());
        assert!(requests[0].body.is_none());
        assert_eq!(
            requests[1].headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(requests[1].body.is_some());
    }

    #[tokio::test]
    async fn builds_path_and_query_on_the_fixed_endpoint() {
        let mock = Arc::new(MockHttp::replying(200, &json!({ "data": [] })));
        let transport = transport(&mock);

        let _: Value = transport
            .get(
                "/api/v1/events",
                &[("page", "2".to_string()), ("status", "pending".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().url.as_str(),
            "https://api.hookwave.io/api/v1/events?page=2&status=pending"
        );
    }

    #[tokio::test]
    async fn omits_the_query_string_when_there_are_no_parameters() {
        let mock = Arc::new(MockHttp::replying(200, &json!({ "data": [] })));
        let transport = transport(&mock);

        let _: Value = transport.get("/api/v1/crons", &[]).await.unwrap();

        assert_eq!(
            mock.last_request().url.as_str(),
            "https://api.hookwave.io/api/v1/crons"
        );
    }
}

mod authentication {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let mock = Arc::new(MockHttp::new(vec![]));
        let config = Config::new().resolve_with(|_| None);
        let transport = ApiTransport::new(Arc::clone(&mock), config);

        let result: Result<Value, Error> = transport.get("/api/v1/events", &[]).await;

        assert!(matches!(result, Err(Error::MissingApiKey)));
        assert_eq!(mock.calls(), 0);
    }
}

mod error_translation {
    use super::*;

    async fn fail_with(response: HttpResponse) -> Error {
        let mock = Arc::new(MockHttp::new(vec![Ok(response)]));
        let transport = transport(&mock);
        let result: Result<Value, Error> = transport.get("/api/v1/events", &[]).await;
        result.unwrap_err()
    }

    #[tokio::test]
    async fn maps_401_to_unauthorized() {
        let err = fail_with(error_response(401, "invalid API key", None)).await;
        assert!(matches!(err, Error::Unauthorized { ref message } if message == "invalid API key"));
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let err = fail_with(error_response(404, "event not found", None)).await;
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn maps_400_with_validation_code_to_validation() {
        let err = fail_with(error_response(
            400,
            "invalid cron expression",
            Some(code::VALIDATION_ERROR),
        ))
        .await;
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn maps_plain_400_to_bad_request() {
        let err = fail_with(error_response(400, "malformed request", None)).await;
        assert!(matches!(err, Error::BadRequest { .. }));
    }

    #[tokio::test]
    async fn maps_500_to_internal_server() {
        let err = fail_with(error_response(500, "boom", None)).await;
        assert!(matches!(err, Error::InternalServer { .. }));
    }

    #[tokio::test]
    async fn maps_unmapped_status_to_internal_server() {
        let err = fail_with(error_response(418, "teapot", None)).await;
        assert!(matches!(err, Error::InternalServer { .. }));
    }

    #[tokio::test]
    async fn collapses_non_json_error_bodies_to_internal_server() {
        let response = HttpResponse::new(
            http::StatusCode::BAD_GATEWAY,
            http::HeaderMap::new(),
            b"<html>gateway</html>".to_vec(),
        );
        let err = fail_with(response).await;
        assert!(matches!(err, Error::InternalServer { .. }));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_an_internal_server_error() {
        let mock = Arc::new(MockHttp::replying(200, &json!({ "unexpected": true })));
        let transport = transport(&mock);

        let result: Result<Envelope<crate::types::Event>, Error> =
            transport.get("/api/v1/events/evt_1", &[]).await;

        assert!(matches!(result, Err(Error::InternalServer { .. })));
    }

    #[tokio::test]
    async fn transport_failures_pass_through() {
        let mock = Arc::new(MockHttp::new(vec![Err(Error::Timeout)]));
        let transport = transport(&mock);

        let result: Result<Value, Error> = transport.get("/api/v1/events", &[]).await;

        assert!(matches!(result, Err(Error::Timeout)));
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn succeeds_on_empty_no_content_response() {
        let mock = Arc::new(MockHttp::new(vec![Ok(HttpResponse::new(
            http::StatusCode::NO_CONTENT,
            http::HeaderMap::new(),
            Vec::new(),
        ))]));
        let transport = transport(&mock);

        transport.delete("/api/v1/events/evt_1").await.unwrap();

        let request = mock.last_request();
        assert_eq!(request.method, http::Method::DELETE);
        assert_eq!(
            request.url.as_str(),
            "https://api.hookwave.io/api/v1/events/evt_1"
        );
    }
}
