pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Collaborator contract
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyze/report",
            post(handlers::handle_analyze_report),
        )
        // Per-session request controllers
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        .route("/api/v1/sessions/:id/retry", post(handlers::handle_retry))
        .route("/api/v1/sessions/:id/clear", post(handlers::handle_clear))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::fixture::FixtureAnalyzer;
    use crate::config::Config;

    fn app(delay: Duration) -> Router {
        let config = Config {
            fixture_delay: delay,
            max_sessions: 2,
            ..Config::default()
        };
        let analyzer = Arc::new(FixtureAnalyzer::new(config.fixture_delay));
        build_router(AppState::new(config, analyzer))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let app = app(Duration::ZERO);
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analyzer"], "fixture");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_text() {
        let app = app(Duration::ZERO);
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/analyze",
            Some(json!({"resume_text": "  \n "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_returns_result_shape() {
        let app = app(Duration::from_secs(3));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/analyze",
            Some(json!({"resume_text": "John Doe, Software Engineer..."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personal_info"]["full_name"], "John Doe");
        assert_eq!(body["analysis"]["resume_rating"], "8.5/10");
        assert!(body["work_experience"][0]["achievements"].is_array());
    }

    #[tokio::test]
    async fn test_report_includes_tier_and_sections() {
        let app = app(Duration::ZERO);
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/analyze/report",
            Some(json!({"resume_text": "John Doe, Software Engineer..."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating_tier"], "good");
        assert_eq!(body["sections"][0]["kind"], "overview");
        assert_eq!(body["sections"][0]["blocks"][0]["type"], "rating");
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_lifecycle() {
        let app = app(Duration::from_secs(3));

        let (status, created) = send(&app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["snapshot"]["phase"], "idle");
        let id = created["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/submit"),
            Some(json!({"resume_text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let submit = json!({"resume_text": "John Doe, Software Engineer..."});
        let (status, snapshot) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/submit"),
            Some(submit.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(snapshot["phase"], "in_flight");
        assert_eq!(snapshot["input_chars"], 30);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/submit"),
            Some(submit),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "REQUEST_IN_FLIGHT");

        tokio::time::sleep(Duration::from_secs(4)).await;

        let (status, view) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["snapshot"]["phase"], "succeeded");
        assert_eq!(view["snapshot"]["result"]["analysis"]["resume_rating"], "8.5/10");
        assert!(!view["sections"].as_array().unwrap().is_empty());

        let (status, cleared) =
            send(&app, "POST", &format!("/api/v1/sessions/{id}/clear"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["phase"], "idle");
        assert!(cleared["result"].is_null());

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_session_limit() {
        let app = app(Duration::ZERO);
        send(&app, "POST", "/api/v1/sessions", None).await;
        send(&app, "POST", "/api/v1/sessions", None).await;
        let (status, body) = send(&app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SESSION_LIMIT");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = app(Duration::ZERO);
        let uri = format!("/api/v1/sessions/{}/clear", uuid::Uuid::new_v4());
        let (status, _) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
