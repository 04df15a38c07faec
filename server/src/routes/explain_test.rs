use super::*;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm};
use axum::body::Body;
use axum::extract::FromRequest;
use serde_json::Value;
use std::sync::Arc;

async fn read(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(state: AppState, body: Value) -> (StatusCode, Value) {
    let req: ExplainRequest = serde_json::from_value(body).unwrap();
    read(explain(State(state), Ok(Json(req))).await).await
}

// =============================================================================
// success paths
// =============================================================================

#[tokio::test]
async fn photosynthesis_request_forwards_once_and_relays_text() {
    let mock = Arc::new(MockLlm::replying(Some("Plants turn light into sugar.")));
    let state = test_app_state_with_llm(mock.clone());

    let (status, body) = post(
        state,
        json!({ "selectedSubject": "Biology", "selectedTopic": "Photosynthesis", "customTopic": "", "language": "English" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["explanation"], "Plants turn light into sugar.");
    assert_eq!(body["reply"], "Plants turn light into sugar.");

    let calls = mock.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let user = &calls[0].messages[0].content;
    assert!(user.contains("Subject: Biology"));
    assert!(user.contains("Topic: Photosynthesis"));
    assert!(user.contains("Language: English"));
}

#[tokio::test]
async fn short_field_names_are_accepted() {
    let mock = Arc::new(MockLlm::replying(Some("ok")));
    let state = test_app_state_with_llm(mock.clone());

    let (status, body) = post(state, json!({ "subject": "Physics", "topic": "Inertia", "language": "English" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(mock.calls.lock().unwrap()[0].messages[0].content.contains("Topic: Inertia"));
}

#[tokio::test]
async fn empty_completion_reports_no_explanation() {
    let state = test_app_state_with_llm(Arc::new(MockLlm::replying(None)));

    let (status, body) = post(state, json!({ "selectedTopic": "Cells" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], NO_EXPLANATION_MESSAGE);
    assert_eq!(body["raw"]["model"], "mock");
}

// =============================================================================
// validation and configuration failures
// =============================================================================

#[tokio::test]
async fn missing_topic_is_rejected_without_upstream_call() {
    let mock = Arc::new(MockLlm::replying(Some("unused")));
    let state = test_app_state_with_llm(mock.clone());

    let (status, body) = post(state, json!({ "selectedSubject": "Biology", "selectedTopic": "", "customTopic": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Topic is required");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn missing_key_is_a_server_error() {
    let (status, body) = post(test_app_state(), json!({ "selectedTopic": "Cells" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "OPENROUTER_API_KEY not found in environment");
}

#[tokio::test]
async fn missing_topic_wins_over_missing_key() {
    let (status, body) = post(test_app_state(), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Topic is required");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v2/chatbot/explain")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let extracted = Json::<ExplainRequest>::from_request(request, &()).await;
    assert!(extracted.is_err());

    let (status, body) = read(explain(State(test_app_state()), extracted).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

// =============================================================================
// upstream failures
// =============================================================================

#[tokio::test]
async fn upstream_status_and_body_pass_through() {
    let mock = MockLlm::failing(LlmError::ApiResponse { status: 429, body: "rate limited upstream".into() });
    let state = test_app_state_with_llm(Arc::new(mock));

    let (status, body) = post(state, json!({ "selectedTopic": "Cells" })).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "rate limited upstream");
}

#[tokio::test]
async fn transport_failure_is_a_server_error() {
    let mock = MockLlm::failing(LlmError::ApiRequest("connection refused".into()));
    let state = test_app_state_with_llm(Arc::new(mock));

    let (status, body) = post(state, json!({ "customTopic": "Black holes" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("connection refused"));
}

#[test]
fn invalid_upstream_status_maps_to_bad_gateway() {
    let resp = ExplainError::Llm(LlmError::ApiResponse { status: 42, body: "weird".into() }).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
