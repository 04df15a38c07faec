//! Explanation form state for the learning page.
//!
//! DESIGN
//! ======
//! Form fields, the in-flight flag, and the last explanation live in one
//! value so the page mutates it through a single signal. `prepare_request`
//! and `finish` bracket every request; while `loading` is set no second
//! request can be prepared.

#[cfg(test)]
#[path = "learning_test.rs"]
mod learning_test;

use crate::net::types::{ExplainReply, ExplainRequest};
use crate::util::export::sanitize_filename_part;

pub const DEFAULT_SUBJECT: &str = "General";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const TOPIC_REQUIRED_MESSAGE: &str = "Please enter a topic";
pub const BUSY_MESSAGE: &str = "An explanation is already being generated";
pub const NO_EXPLANATION_MESSAGE: &str = "No explanation generated";
pub const FAILURE_MESSAGE: &str = "⚠️ Failed to generate explanation. Please try again.";

/// A text file ready for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningState {
    pub subject: String,
    pub selected_topic: String,
    pub custom_topic: String,
    pub language: String,
    pub explanation: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for LearningState {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_owned(),
            selected_topic: String::new(),
            custom_topic: String::new(),
            language: DEFAULT_LANGUAGE.to_owned(),
            explanation: String::new(),
            loading: false,
            error: None,
        }
    }
}

impl LearningState {
    /// Switch subject. The topic list changes with it, so the pick is cleared.
    pub fn set_subject(&mut self, subject: &str) {
        if self.subject != subject {
            self.subject = subject.to_owned();
            self.selected_topic.clear();
        }
    }

    pub fn select_topic(&mut self, topic: &str) {
        self.selected_topic = topic.to_owned();
        self.error = None;
    }

    /// Typing a custom topic supersedes any picked topic.
    pub fn set_custom_topic(&mut self, text: &str) {
        self.custom_topic = text.to_owned();
        self.selected_topic.clear();
        self.error = None;
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_owned();
    }

    /// Custom topic if non-blank, else the picked topic.
    pub fn resolved_topic(&self) -> Option<&str> {
        [self.custom_topic.as_str(), self.selected_topic.as_str()]
            .into_iter()
            .map(str::trim)
            .find(|topic| !topic.is_empty())
    }

    pub fn has_explanation(&self) -> bool {
        !self.explanation.is_empty()
    }

    /// Validate the form and enter the loading state.
    ///
    /// # Errors
    ///
    /// Returns [`TOPIC_REQUIRED_MESSAGE`] when no topic resolves and
    /// [`BUSY_MESSAGE`] while a request is in flight. Neither touches the
    /// previous explanation.
    pub fn prepare_request(&mut self) -> Result<ExplainRequest, String> {
        if self.loading {
            return Err(BUSY_MESSAGE.to_owned());
        }
        if self.resolved_topic().is_none() {
            self.error = Some(TOPIC_REQUIRED_MESSAGE.to_owned());
            return Err(TOPIC_REQUIRED_MESSAGE.to_owned());
        }
        self.loading = true;
        self.error = None;
        self.explanation.clear();
        Ok(ExplainRequest {
            selected_subject: self.subject.clone(),
            selected_topic: self.selected_topic.clone(),
            custom_topic: self.custom_topic.clone(),
            language: self.language.clone(),
        })
    }

    /// Record the outcome of the request started by `prepare_request`.
    pub fn finish(&mut self, result: Result<ExplainReply, String>) {
        self.loading = false;
        match result {
            Ok(reply) => {
                self.explanation = reply.text().unwrap_or(NO_EXPLANATION_MESSAGE).to_owned();
            }
            Err(message) => {
                #[cfg(feature = "hydrate")]
                log::warn!("explain request failed: {message}");
                self.error = Some(message);
                self.explanation = FAILURE_MESSAGE.to_owned();
            }
        }
    }

    /// Plain-text export of the current explanation.
    pub fn export(&self) -> Option<ExportFile> {
        if !self.has_explanation() {
            return None;
        }
        let topic = self.resolved_topic().unwrap_or_default();
        let filename = format!(
            "{}_{}.txt",
            sanitize_filename_part(&self.subject),
            sanitize_filename_part(topic)
        );
        let content = format!(
            "Subject: {}\nTopic: {topic}\nLanguage: {}\n\nExplanation:\n{}\n",
            self.subject, self.language, self.explanation
        );
        Some(ExportFile { filename, content })
    }
}
