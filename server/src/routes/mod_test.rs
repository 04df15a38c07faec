use super::*;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm};
use std::sync::Arc;

#[test]
fn parse_origins_defaults_when_unset() {
    let origins = parse_origins(None);
    assert_eq!(origins.len(), DEFAULT_ALLOWED_ORIGINS.len());
    assert_eq!(origins[0], "http://localhost:5173");
}

#[test]
fn parse_origins_splits_and_trims() {
    let origins = parse_origins(Some(" https://a.example , https://b.example,, "));
    assert_eq!(origins, vec![
        HeaderValue::from_static("https://a.example"),
        HeaderValue::from_static("https://b.example"),
    ]);
}

#[test]
fn parse_origins_blank_falls_back_to_defaults() {
    assert_eq!(parse_origins(Some(" , ")).len(), DEFAULT_ALLOWED_ORIGINS.len());
}

#[tokio::test]
async fn healthz_reports_missing_provider() {
    let Json(body) = healthz(State(test_app_state())).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["provider"], "No AI provider configured");
}

#[tokio::test]
async fn healthz_reports_connected_provider() {
    let state = test_app_state_with_llm(Arc::new(MockLlm::replying(Some("x"))));
    let Json(body) = healthz(State(state)).await;
    assert_eq!(body["provider"], "LLM provider connected");
}

#[test]
fn app_builds_router() {
    let _router = app(test_app_state());
}
