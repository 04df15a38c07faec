//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const DEFAULT_REFERER: &str = "http://localhost:5000";
pub const DEFAULT_APP_TITLE: &str = "NexaLearn AI Assistant";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Optional sampling parameters. `None` fields are omitted from the request
/// so the provider applies its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sampling {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub referer: String,
    pub app_title: String,
    pub sampling: Sampling,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Required:
    /// - the API key, read from the variable named by `LLM_API_KEY_ENV`
    ///   (default `OPENROUTER_API_KEY`)
    ///
    /// Optional:
    /// - `LLM_MODEL`: default `mistralai/mistral-7b-instruct`
    /// - `LLM_BASE_URL`: default OpenRouter API base URL
    /// - `LLM_REFERER`, `LLM_APP_TITLE`: attribution headers
    /// - `LLM_MAX_TOKENS`, `LLM_TEMPERATURE`: omitted when unset
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key variable is unset or
    /// blank. Malformed sampling values are logged and left unset.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = api_key_var();
        let api_key = std::env::var(&key_var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = env_or("LLM_MODEL", DEFAULT_MODEL);
        let base_url = env_or("LLM_BASE_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let referer = env_or("LLM_REFERER", DEFAULT_REFERER);
        let app_title = env_or("LLM_APP_TITLE", DEFAULT_APP_TITLE);
        let sampling = Sampling {
            max_tokens: parse_optional("LLM_MAX_TOKENS", std::env::var("LLM_MAX_TOKENS").ok().as_deref()),
            temperature: parse_optional("LLM_TEMPERATURE", std::env::var("LLM_TEMPERATURE").ok().as_deref()),
        };
        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, referer, app_title, sampling, timeouts })
    }
}

/// Name of the environment variable that holds the provider API key.
#[must_use]
pub fn api_key_var() -> String {
    std::env::var("LLM_API_KEY_ENV")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_optional<T: std::str::FromStr>(key: &str, raw: Option<&str>) -> Option<T> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = value.parse::<T>().ok();
    if parsed.is_none() {
        tracing::warn!(key, value, "ignoring malformed sampling value");
    }
    parsed
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
