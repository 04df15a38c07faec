use super::*;
use std::sync::Mutex;

/// Serializes tests that touch the shared `LLM_*` environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK` to avoid env races.
unsafe fn clear_llm_env() {
    unsafe {
        std::env::remove_var("LLM_API_KEY_ENV");
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_BASE_URL");
        std::env::remove_var("LLM_REFERER");
        std::env::remove_var("LLM_APP_TITLE");
        std::env::remove_var("LLM_MAX_TOKENS");
        std::env::remove_var("LLM_TEMPERATURE");
        std::env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("LLM_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("OPENROUTER_API_KEY");
        std::env::remove_var("TEST_LLM_KEY");
    }
}

#[test]
fn from_env_defaults_to_openrouter() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENROUTER_API_KEY", "sk-or-test");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "sk-or-test");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.referer, DEFAULT_REFERER);
    assert_eq!(cfg.app_title, DEFAULT_APP_TITLE);
    assert_eq!(cfg.sampling, Sampling::default());
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TEST_LLM_KEY");
        std::env::set_var("TEST_LLM_KEY", "secret");
        std::env::set_var("LLM_MODEL", "openai/gpt-4o-mini");
        std::env::set_var("LLM_BASE_URL", "https://example.test/v1/");
        std::env::set_var("LLM_MAX_TOKENS", "400");
        std::env::set_var("LLM_TEMPERATURE", "0.7");
        std::env::set_var("LLM_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("LLM_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = LlmConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, "openai/gpt-4o-mini");
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.sampling.max_tokens, Some(400));
    assert!((cfg.sampling.temperature.unwrap() - 0.7).abs() < f32::EPSILON);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_missing_key_names_variable() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_llm_env() };

    let err = LlmConfig::from_env().unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "OPENROUTER_API_KEY"));
}

#[test]
fn from_env_blank_key_counts_as_missing() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENROUTER_API_KEY", "   ");
    }

    assert!(matches!(LlmConfig::from_env(), Err(LlmError::MissingApiKey { .. })));

    unsafe { clear_llm_env() };
}

#[test]
fn from_env_ignores_malformed_sampling_values() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_llm_env();
        std::env::set_var("OPENROUTER_API_KEY", "sk-or-present");
        std::env::set_var("LLM_MAX_TOKENS", "four hundred");
        std::env::set_var("LLM_TEMPERATURE", "warm");
    }

    let cfg = LlmConfig::from_env().expect("key is set, config must load");
    assert_eq!(cfg.api_key, "sk-or-present");
    assert_eq!(cfg.sampling, Sampling::default());

    unsafe { clear_llm_env() };
}

#[test]
fn api_key_var_honors_override() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_llm_env();
        std::env::set_var("LLM_API_KEY_ENV", "TEST_LLM_KEY");
    }
    assert_eq!(api_key_var(), "TEST_LLM_KEY");

    unsafe { clear_llm_env() };
    assert_eq!(api_key_var(), DEFAULT_API_KEY_ENV);
}

#[test]
fn parse_optional_blank_is_none() {
    assert_eq!(parse_optional::<u32>("X", Some("  ")), None);
    assert_eq!(parse_optional::<u32>("X", None), None);
    assert_eq!(parse_optional::<u32>("X", Some(" 12 ")), Some(12));
    assert_eq!(parse_optional::<f32>("X", Some("hot")), None);
}
