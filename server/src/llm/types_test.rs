use super::*;

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::System).unwrap(), "system");
    assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
    assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
}

#[test]
fn message_user_constructor_sets_role() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "hello");
}

#[test]
fn api_response_error_display_includes_status() {
    let err = LlmError::ApiResponse { status: 429, body: "slow down".into() };
    assert_eq!(err.to_string(), "API response error: status 429");
}

#[test]
fn missing_api_key_display_names_variable() {
    let err = LlmError::MissingApiKey { var: "OPENROUTER_API_KEY".into() };
    assert!(err.to_string().contains("OPENROUTER_API_KEY"));
}
