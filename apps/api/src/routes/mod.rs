pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as plan;
use crate::interview::handlers as interview;
use crate::outreach::handlers as outreach;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Plan API
        .route("/api/plan", get(plan::handle_get_plan))
        .route("/api/plan/generate", post(plan::handle_generate_plan))
        // Outreach and assistant
        .route("/api/outreach", post(outreach::handle_outreach))
        .route(
            "/api/chat",
            get(outreach::handle_chat_greeting).post(outreach::handle_chat),
        )
        // Mock interview
        .route("/api/interview", get(interview::handle_get_interview))
        .route("/api/interview/start", post(interview::handle_start_interview))
        .route("/api/interview/answer", post(interview::handle_submit_answer))
        .route("/api/interview/reset", post(interview::handle_reset_interview))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::auth::{issue_token, TokenConfig, DEFAULT_TOKEN_TTL_SECS};
    use crate::interview::registry::InterviewRegistry;
    use crate::llm_client::fake::ScriptedBackend;
    use crate::models::plan::fixtures::plan_json;
    use crate::outreach::prompts::{ASSISTANT_APOLOGY, ASSISTANT_GREETING};
    use crate::storage::memory::InMemoryPlanStore;

    struct Harness {
        state: AppState,
        token: String,
    }

    impl Harness {
        fn new(backend: ScriptedBackend) -> Self {
            let tokens = TokenConfig::new(b"router-test-secret".to_vec());
            let token = issue_token(&tokens, Uuid::new_v4(), DEFAULT_TOKEN_TTL_SECS);
            let state = AppState {
                backend: Arc::new(backend),
                plans: Arc::new(InMemoryPlanStore::default()),
                tokens,
                interviews: InterviewRegistry::new(),
            };
            Self { state, token }
        }

        async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
            let body = match body {
                Some(value) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };

            let response = build_router(self.state.clone())
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let harness = Harness::new(ScriptedBackend::new());
        let response = build_router(harness.state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_rejects_missing_token() {
        let harness = Harness::new(ScriptedBackend::new());
        let response = build_router(harness.state)
            .oneshot(Request::builder().uri("/api/plan").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_generate_then_fetch_plan() {
        let harness = Harness::new(ScriptedBackend::new().reply(&plan_json().to_string()));

        let (status, before) = harness.call("GET", "/api/plan", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(before, Value::Null);

        let (status, generated) = harness
            .call(
                "POST",
                "/api/plan/generate",
                Some(json!({"userInput": "Eight years of payments backend work", "isThinkingMode": false})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(generated["resume"]["name"], "Ada Lovelace");

        let (_, stored) = harness.call("GET", "/api/plan", None).await;
        assert_eq!(stored, generated);
    }

    #[tokio::test]
    async fn test_invalid_plan_is_not_stored() {
        let harness = Harness::new(ScriptedBackend::new().reply(r#"{"resume": {}}"#));

        let (status, body) = harness
            .call("POST", "/api/plan/generate", Some(json!({"userInput": "hi"})))
            .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "DECODING_ERROR");

        let (_, stored) = harness.call("GET", "/api/plan", None).await;
        assert_eq!(stored, Value::Null);
    }

    #[tokio::test]
    async fn test_outreach_requires_plan() {
        let harness = Harness::new(ScriptedBackend::new());
        let (status, body) = harness.call("POST", "/api/outreach", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let harness = Harness::new(ScriptedBackend::new().reply("Polish your LinkedIn headline."));
        let (status, body) = harness
            .call(
                "POST",
                "/api/chat",
                Some(json!({"messages": [{"role": "user", "content": "Any tips?"}]})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Polish your LinkedIn headline.");
    }

    #[tokio::test]
    async fn test_chat_greeting_opens_transcript() {
        let harness = Harness::new(ScriptedBackend::new());
        let (status, body) = harness.call("GET", "/api/chat", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], ASSISTANT_GREETING);
    }

    #[tokio::test]
    async fn test_chat_backend_failure_answers_with_apology() {
        let harness = Harness::new(ScriptedBackend::new().fail(503));
        let (status, body) = harness
            .call(
                "POST",
                "/api/chat",
                Some(json!({"messages": [{"role": "user", "content": "Any tips?"}]})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], ASSISTANT_APOLOGY);
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_transcript() {
        let harness = Harness::new(ScriptedBackend::new());
        let (status, body) = harness
            .call("POST", "/api/chat", Some(json!({"messages": []})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_interview_flow_over_http() {
        let harness = Harness::new(
            ScriptedBackend::new()
                .reply(&plan_json().to_string())
                .reply("Why payments?")
                .reply("Clear answer.|||How do you test settlement code?"),
        );

        let (status, _) = harness.call("POST", "/api/interview/start", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        harness
            .call("POST", "/api/plan/generate", Some(json!({"userInput": "payments"})))
            .await;

        let (status, view) = harness.call("POST", "/api/interview/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["phase"], "active");
        assert_eq!(view["turnCount"], 1);

        let (status, view) = harness
            .call("POST", "/api/interview/answer", Some(json!({"answer": "I like ledgers"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["turnCount"], 2);
        assert_eq!(view["transcript"][2]["content"], "Feedback: Clear answer.");
        assert_eq!(view["transcript"][3]["role"], "model");

        let (status, body) = harness
            .call("POST", "/api/interview/answer", Some(json!({"answer": "   "})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, view) = harness.call("POST", "/api/interview/reset", None).await;
        assert_eq!(view["phase"], "idle");

        let (status, body) = harness
            .call("POST", "/api/interview/answer", Some(json!({"answer": "late"})))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }
}
