//! REST helper for the explanation backend.
//!
//! Client-side (hydrate): real HTTP call via `gloo-net`.
//! Server-side (SSR): returns an error since the request is only meaningful
//! in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so a failed request
//! degrades to a visible message without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ExplainReply, ExplainRequest};

const DEFAULT_FAILURE: &str = "Failed to generate explanation";

/// Backend origin captured at compile time; empty means same origin.
fn api_base() -> &'static str {
    option_env!("NEXA_API_BASE_URL").map_or("", |base| base.trim().trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn explain_endpoint(base: &str) -> String {
    format!("{base}/api/v2/chatbot/explain")
}

#[cfg(any(test, feature = "hydrate"))]
fn failure_message(reply: Option<&ExplainReply>) -> String {
    reply
        .and_then(|r| r.message.as_deref())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_FAILURE)
        .to_owned()
}

/// Send one explanation request via `POST /api/v2/chatbot/explain`.
///
/// # Errors
///
/// Returns the server's `message` (or a generic failure) for non-OK
/// statuses, and the transport error text when the request cannot be sent.
pub async fn request_explanation(request: &ExplainRequest) -> Result<ExplainReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&explain_endpoint(api_base()))
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let reply = resp.json::<ExplainReply>().await.ok();
        if !resp.ok() {
            return Err(failure_message(reply.as_ref()));
        }
        reply.ok_or_else(|| DEFAULT_FAILURE.to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (request, api_base());
        Err("not available on server".to_owned())
    }
}
