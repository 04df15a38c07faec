//! Explain service — validated topic selection → one LLM completion.
//!
//! DESIGN
//! ======
//! The request body is resolved into an [`ExplainInput`] before anything
//! touches the network, so a missing topic never costs an upstream call.
//! [`ExplainPrompt`] owns the prompt template and emits provider-neutral
//! messages; the LLM adapter decides the wire shape.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};

pub const DEFAULT_SUBJECT: &str = "General";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const SYSTEM_PROMPT: &str = "You are a helpful academic AI tutor. Explain clearly and in simple language.";

// =============================================================================
// TYPES
// =============================================================================

/// Body of `POST /api/v2/chatbot/explain`.
///
/// Accepts both client field sets: `{selectedSubject, selectedTopic,
/// customTopic, language}` and `{subject, topic, language}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    #[serde(default, alias = "subject")]
    pub selected_subject: Option<String>,
    #[serde(default, alias = "topic")]
    pub selected_topic: Option<String>,
    #[serde(default)]
    pub custom_topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainInput {
    pub subject: String,
    pub topic: String,
    pub language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    #[error("Topic is required")]
    TopicRequired,
    #[error("{var} not found in environment")]
    LlmNotConfigured { var: String },
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Result of a completed upstream call.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainOutcome {
    /// First completion text, unmodified.
    Explanation(String),
    /// The provider answered but produced no content.
    Empty { raw: serde_json::Value },
}

// =============================================================================
// VALIDATION
// =============================================================================

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl ExplainInput {
    /// Resolve the effective topic and fill defaults.
    ///
    /// The custom topic wins over the picked topic. Blank strings count as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::TopicRequired`] when neither topic is set.
    pub fn resolve(req: &ExplainRequest) -> Result<Self, ExplainError> {
        let topic = non_blank(req.custom_topic.as_ref())
            .or_else(|| non_blank(req.selected_topic.as_ref()))
            .ok_or(ExplainError::TopicRequired)?;
        let subject = non_blank(req.selected_subject.as_ref()).unwrap_or(DEFAULT_SUBJECT);
        let language = non_blank(req.language.as_ref()).unwrap_or(DEFAULT_LANGUAGE);
        Ok(Self { subject: subject.to_owned(), topic: topic.to_owned(), language: language.to_owned() })
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Fixed system prompt plus the templated user prompt for one explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainPrompt {
    pub system: &'static str,
    pub user: String,
}

impl ExplainPrompt {
    #[must_use]
    pub fn build(input: &ExplainInput) -> Self {
        let user = format!(
            "Subject: {}\nTopic: {}\nLanguage: {}\n\n\
             Explain in simple student-friendly language.\n\
             Add real-world examples if possible.\n\
             Use bullet points where helpful.",
            input.subject, input.topic, input.language
        );
        Self { system: SYSTEM_PROMPT, user }
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        vec![Message::user(self.user.clone())]
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Send exactly one chat request for `input`.
///
/// # Errors
///
/// Propagates the LLM client error unchanged (wrapped in [`ExplainError::Llm`]).
pub async fn explain(llm: &dyn LlmChat, input: &ExplainInput) -> Result<ExplainOutcome, ExplainError> {
    info!(
        subject = %input.subject,
        language = %input.language,
        topic_len = input.topic.len(),
        model = llm.model(),
        "explain: request received"
    );
    let prompt = ExplainPrompt::build(input);
    let response = llm.chat(prompt.system, &prompt.messages()).await.map_err(|e| {
        warn!(error = %e, "explain: upstream call failed");
        ExplainError::Llm(e)
    })?;

    info!(
        finish_reason = %response.finish_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "explain: upstream call completed"
    );

    Ok(match response.text {
        Some(text) => ExplainOutcome::Explanation(text),
        None => {
            warn!("explain: provider returned no content");
            ExplainOutcome::Empty { raw: response.raw }
        }
    })
}

#[cfg(test)]
#[path = "explain_test.rs"]
mod tests;
