//! Explain route — `POST /api/v2/chatbot/explain`.
//!
//! Every answer is a JSON object with a `success` flag. Errors carry a
//! `message` string; upstream provider failures keep the upstream status.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::llm::types::LlmError;
use crate::services::explain::{self as explain_svc, ExplainError, ExplainInput, ExplainOutcome, ExplainRequest};
use crate::state::AppState;

pub const NO_EXPLANATION_MESSAGE: &str = "No explanation generated";

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "success": false, "message": message.into() }))).into_response()
}

impl IntoResponse for ExplainError {
    fn into_response(self) -> Response {
        match self {
            Self::TopicRequired => failure(StatusCode::BAD_REQUEST, self.to_string()),
            Self::LlmNotConfigured { .. } => failure(StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            Self::Llm(LlmError::ApiResponse { status, body }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                failure(status, body)
            }
            Self::Llm(e) => {
                tracing::error!(error = %e, "explain: request failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

/// `POST /api/v2/chatbot/explain` — validate, forward once, relay the text.
pub async fn explain(State(state): State<AppState>, body: Result<Json<ExplainRequest>, JsonRejection>) -> Response {
    let Json(req) = match body {
        Ok(req) => req,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let input = match ExplainInput::resolve(&req) {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    let Some(llm) = state.llm.as_ref() else {
        return ExplainError::LlmNotConfigured { var: state.llm_key_var.to_string() }.into_response();
    };

    match explain_svc::explain(llm.as_ref(), &input).await {
        Ok(ExplainOutcome::Explanation(text)) => {
            Json(json!({ "success": true, "explanation": text, "reply": text })).into_response()
        }
        Ok(ExplainOutcome::Empty { raw }) => {
            Json(json!({ "success": false, "message": NO_EXPLANATION_MESSAGE, "raw": raw })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
#[path = "explain_test.rs"]
mod tests;
