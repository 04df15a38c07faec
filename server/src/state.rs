//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the optional LLM client. A missing client is not a startup
//! failure: each explain request reports it as a server error instead.

use std::sync::Arc;

use crate::llm::LlmChat;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if the provider API key is not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Name of the env var that should hold the provider API key. Reported
    /// back to callers when `llm` is `None`.
    pub llm_key_var: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, llm_key_var: impl Into<Arc<str>>) -> Self {
        Self { llm, llm_key_var: llm_key_var.into() }
    }

    /// Human-readable provider status for the health check.
    #[must_use]
    pub fn provider_status(&self) -> &'static str {
        if self.llm.is_some() { "LLM provider connected" } else { "No AI provider configured" }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
