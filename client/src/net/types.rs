//! Wire DTOs for the auth provider and the explain endpoint.
//!
//! DESIGN
//! ======
//! Shapes mirror the provider's JSON (GoTrue session/user objects, `profiles`
//! rows) and the backend's explain contract so serde does the decoding and
//! the state layer only sees typed values.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Identity object issued by the auth provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata; OAuth providers put the display name here.
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl AuthUser {
    /// `user_metadata.full_name`, falling back to `user_metadata.name`.
    pub fn metadata_full_name(&self) -> Option<String> {
        ["full_name", "name"]
            .iter()
            .filter_map(|key| self.user_metadata.get(key).and_then(serde_json::Value::as_str))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(str::to_owned)
    }
}

/// Provider-issued credential plus the identity it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry in seconds since the Unix epoch, when the provider reports one.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl AuthSession {
    /// Whether the access token has expired at `now_secs`.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs)
    }
}

/// Auth state transition broadcast to listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthChange {
    SignedIn(AuthSession),
    SignedOut,
}

/// Row of the provider-hosted `profiles` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
}

// =============================================================================
// EXPLAIN
// =============================================================================

/// Body of `POST /api/v2/chatbot/explain`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub selected_subject: String,
    pub selected_topic: String,
    pub custom_topic: String,
    pub language: String,
}

/// Response of the explain endpoint. Success bodies carry the text under
/// both `explanation` and `reply`; failures carry `message`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplainReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExplainReply {
    /// Explanation text of a successful reply.
    pub fn text(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.explanation
            .as_deref()
            .or(self.reply.as_deref())
            .filter(|text| !text.is_empty())
    }
}
