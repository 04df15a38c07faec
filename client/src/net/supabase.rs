//! Supabase adapter for [`AuthProvider`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the GoTrue REST API (`/auth/v1/*`) for credentials and sessions
//! and to PostgREST (`/rest/v1/profiles`) for the profile row. The session is
//! persisted in `localStorage` under [`SESSION_STORAGE_KEY`] so a reload
//! restores it; OAuth sign-in arrives as tokens in the URL fragment.
//!
//! Browser-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: HTTP helpers fail with
//! [`AuthError::Unavailable`], while storage-only paths still work.
//!
//! ERROR HANDLING
//! ==============
//! Provider error bodies are reduced to their human-readable message so the
//! login and signup forms can show them verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};

use super::auth_provider::{AuthError, AuthListeners, AuthProvider, Subscription};
use super::types::{AuthChange, AuthSession, AuthUser, Profile};
use crate::util::storage::{KeyValueStore, LocalStore, load_json, save_json};

/// Storage key for the persisted provider session.
pub const SESSION_STORAGE_KEY: &str = "nexa.auth.session";

const PROFILE_PREFER: &str = "resolution=merge-duplicates,return=representation";

// =============================================================================
// CONFIG + URLS
// =============================================================================

/// Project URL and public (anon) key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self { url: url.trim().trim_end_matches('/').to_owned(), anon_key: anon_key.trim().to_owned() }
    }

    /// Read `SUPABASE_URL` / `SUPABASE_ANON_KEY` captured at compile time.
    pub fn from_build_env() -> Option<Self> {
        Self::from_parts(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|v| !v.is_empty())?;
        let anon_key = anon_key.map(str::trim).filter(|v| !v.is_empty())?;
        Some(Self::new(url, anon_key))
    }

    pub fn token_url(&self, grant_type: &str) -> String {
        format!("{}/auth/v1/token?grant_type={grant_type}", self.url)
    }

    pub fn signup_url(&self) -> String {
        format!("{}/auth/v1/signup", self.url)
    }

    pub fn logout_url(&self) -> String {
        format!("{}/auth/v1/logout", self.url)
    }

    pub fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.url)
    }

    pub fn authorize_url(&self, provider: &str, redirect_to: &str) -> String {
        format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}",
            self.url,
            encode_query_value(provider),
            encode_query_value(redirect_to)
        )
    }

    pub fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles?on_conflict=id", self.url)
    }
}

fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

// =============================================================================
// RESPONSE DECODING
// =============================================================================

/// Tokens delivered in the OAuth redirect fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<i64>,
}

impl FragmentTokens {
    pub fn into_session(self, user: AuthUser) -> AuthSession {
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at,
            user,
        }
    }
}

/// Parse `#access_token=...&refresh_token=...&expires_at=...`.
pub fn parse_fragment(fragment: &str) -> Option<FragmentTokens> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_at = None;
    for pair in fragment.trim_start_matches('#').split('&') {
        let Some((key, value)) = pair.split_once('=') else { continue };
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value.to_owned()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.to_owned()),
            "expires_at" => expires_at = value.parse().ok(),
            _ => {}
        }
    }
    Some(FragmentTokens { access_token: access_token?, refresh_token: refresh_token?, expires_at })
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: AuthUser,
}

/// Decode a GoTrue token response into a session.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] when required fields are missing.
pub fn decode_session(body: Value, now_secs: i64) -> Result<AuthSession, AuthError> {
    let token: TokenResponse = serde_json::from_value(body).map_err(|e| AuthError::Decode(e.to_string()))?;
    let expires_at = token.expires_at.or_else(|| token.expires_in.map(|secs| now_secs + secs));
    Ok(AuthSession {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expires_at,
        user: token.user,
    })
}

/// Result of a sign-up call.
#[derive(Clone, Debug, PartialEq)]
pub enum SignUpResponse {
    /// Auto-confirmed account; the user is signed in.
    Session(AuthSession),
    /// Account awaiting email confirmation.
    Pending(AuthUser),
}

/// Decode the sign-up response, which is either a token response or a bare
/// (possibly wrapped) user object.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] when neither shape matches.
pub fn decode_sign_up(body: Value, now_secs: i64) -> Result<SignUpResponse, AuthError> {
    if body.get("access_token").is_some_and(|t| !t.is_null()) {
        return decode_session(body, now_secs).map(SignUpResponse::Session);
    }
    let user = if body.get("user").is_some_and(Value::is_object) { body["user"].clone() } else { body };
    serde_json::from_value(user)
        .map(SignUpResponse::Pending)
        .map_err(|e| AuthError::Decode(e.to_string()))
}

/// Human-readable message from a provider error body.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let found = ["error_description", "msg", "message", "error_message", "error"]
            .iter()
            .filter_map(|key| value.get(key).and_then(Value::as_str))
            .find(|msg| !msg.trim().is_empty());
        if let Some(msg) = found {
            return msg.to_owned();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { format!("request failed: {status}") } else { trimmed.to_owned() }
}

fn profile_fields(full_name: Option<&str>, student_id: Option<&str>) -> serde_json::Map<String, Value> {
    let mut fields = serde_json::Map::new();
    if let Some(name) = full_name.map(str::trim).filter(|v| !v.is_empty()) {
        fields.insert("full_name".into(), json!(name));
    }
    if let Some(id) = student_id.map(str::trim).filter(|v| !v.is_empty()) {
        fields.insert("student_id".into(), json!(id));
    }
    fields
}

/// Profile upsert body. Absent fields are omitted, never sent as `null`.
pub fn profile_payload(user_id: &str, full_name: Option<&str>, student_id: Option<&str>) -> Value {
    let mut row = profile_fields(full_name, student_id);
    row.insert("id".into(), json!(user_id));
    Value::Object(row)
}

/// First row of a `return=representation` response.
pub fn decode_profile(body: Value) -> Option<Profile> {
    let row = match body {
        Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
        Value::Object(_) => body,
        _ => return None,
    };
    serde_json::from_value(row).ok()
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
fn authorized(
    builder: gloo_net::http::RequestBuilder,
    config: &SupabaseConfig,
    bearer: &str,
) -> gloo_net::http::RequestBuilder {
    builder.header("apikey", &config.anon_key).header("Authorization", &format!("Bearer {bearer}"))
}

#[cfg(feature = "hydrate")]
async fn send(request: Result<gloo_net::http::Request, gloo_net::Error>) -> Result<Value, AuthError> {
    let resp = request
        .map_err(|e| AuthError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    let status = resp.status();
    let ok = resp.ok();
    let body = resp.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
    if !ok {
        return Err(AuthError::Rejected(error_message(status, &body)));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| AuthError::Decode(e.to_string()))
}

async fn post_json(
    config: &SupabaseConfig,
    url: &str,
    bearer: &str,
    prefer: Option<&str>,
    body: &Value,
) -> Result<Value, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let mut builder = authorized(gloo_net::http::Request::post(url), config, bearer);
        if let Some(prefer) = prefer {
            builder = builder.header("Prefer", prefer);
        }
        send(builder.json(body)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, url, bearer, prefer, body);
        Err(AuthError::Unavailable)
    }
}

async fn get_json(config: &SupabaseConfig, url: &str, bearer: &str) -> Result<Value, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        send(authorized(gloo_net::http::Request::get(url), config, bearer).build()).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, url, bearer);
        Err(AuthError::Unavailable)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

fn current_fragment() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()?.location().hash().ok().filter(|hash| hash.len() > 1)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Drop the token fragment from the address bar without reloading.
fn clear_fragment() {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else { return };
        let location = window.location();
        let path = format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        );
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
        }
    }
}

// =============================================================================
// ADAPTER
// =============================================================================

/// Sign-up form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub student_id: String,
}

/// Supabase-backed [`AuthProvider`].
#[derive(Clone)]
pub struct SupabaseAuth {
    config: Option<SupabaseConfig>,
    store: Arc<dyn KeyValueStore>,
    listeners: AuthListeners,
}

impl SupabaseAuth {
    pub fn new(config: Option<SupabaseConfig>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { config, store, listeners: AuthListeners::new() }
    }

    /// Adapter over compile-time configuration and browser `localStorage`.
    pub fn from_build_env() -> Self {
        Self::new(SupabaseConfig::from_build_env(), Arc::new(LocalStore))
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> Result<&SupabaseConfig, AuthError> {
        self.config.as_ref().ok_or(AuthError::NotConfigured)
    }

    /// Session persisted by a previous page load.
    pub fn stored_session(&self) -> Option<AuthSession> {
        load_json(self.store.as_ref(), SESSION_STORAGE_KEY)
    }

    fn persist(&self, session: &AuthSession) {
        save_json(self.store.as_ref(), SESSION_STORAGE_KEY, session);
    }

    fn clear(&self) {
        self.store.remove(SESSION_STORAGE_KEY);
    }

    /// Persist a fresh session and announce it.
    fn establish(&self, session: AuthSession) -> AuthSession {
        self.persist(&session);
        self.listeners.notify(&AuthChange::SignedIn(session.clone()));
        session
    }

    /// `POST /auth/v1/token?grant_type=password`.
    ///
    /// # Errors
    ///
    /// Returns the provider's message when credentials are rejected.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let config = self.config()?;
        let body = json!({ "email": email.trim(), "password": password });
        let resp = post_json(config, &config.token_url("password"), &config.anon_key, None, &body).await?;
        let session = decode_session(resp, now_secs())?;
        Ok(self.establish(session))
    }

    /// `POST /auth/v1/signup`, then the profile upsert.
    ///
    /// Returns `Some(session)` when the account is auto-confirmed, `None`
    /// when the provider waits for email confirmation.
    ///
    /// # Errors
    ///
    /// Returns the provider's message when sign-up is rejected. A failing
    /// profile upsert is logged and does not fail the sign-up.
    pub async fn sign_up(&self, form: &SignUp) -> Result<Option<AuthSession>, AuthError> {
        let config = self.config()?;
        let body = json!({
            "email": form.email.trim(),
            "password": form.password,
            "data": profile_fields(Some(&form.full_name), Some(&form.student_id)),
        });
        let resp = post_json(config, &config.signup_url(), &config.anon_key, None, &body).await?;

        // Upsert before announcing the session so listeners read the stored name.
        match decode_sign_up(resp, now_secs())? {
            SignUpResponse::Session(session) => {
                self.upsert_profile_for(&session.access_token, &session.user.id, form).await;
                Ok(Some(self.establish(session)))
            }
            SignUpResponse::Pending(user) => {
                self.upsert_profile_for(&config.anon_key, &user.id, form).await;
                Ok(None)
            }
        }
    }

    async fn upsert_profile_for(&self, bearer: &str, user_id: &str, form: &SignUp) {
        let Ok(config) = self.config() else { return };
        let payload = profile_payload(user_id, Some(&form.full_name), Some(&form.student_id));
        if let Err(_e) = post_json(config, &config.profiles_url(), bearer, Some(PROFILE_PREFER), &payload).await {
            #[cfg(feature = "hydrate")]
            log::warn!("profile upsert after sign-up failed: {_e}");
        }
    }

    /// Redirect the browser to the Google OAuth flow.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotConfigured`] without configuration and
    /// [`AuthError::Unavailable`] outside the browser.
    pub fn sign_in_with_google(&self) -> Result<(), AuthError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or(AuthError::Unavailable)?;
            let origin = window.location().origin().map_err(|_| AuthError::Unavailable)?;
            window
                .location()
                .set_href(&config.authorize_url("google", &origin))
                .map_err(|_| AuthError::Unavailable)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = config;
            Err(AuthError::Unavailable)
        }
    }

    /// Revoke the session (best effort), forget it, and announce sign-out.
    pub async fn sign_out(&self) {
        if let (Ok(config), Some(session)) = (self.config(), self.stored_session()) {
            if let Err(_e) = post_json(config, &config.logout_url(), &session.access_token, None, &Value::Null).await {
                #[cfg(feature = "hydrate")]
                log::warn!("sign-out revoke failed: {_e}");
            }
        }
        self.clear();
        self.listeners.notify(&AuthChange::SignedOut);
    }

    /// Upsert the `profiles` row for `session` and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns the provider error when the upsert is rejected.
    pub async fn upsert_profile(
        &self,
        session: &AuthSession,
        full_name: Option<&str>,
        student_id: Option<&str>,
    ) -> Result<Option<Profile>, AuthError> {
        let config = self.config()?;
        let payload = profile_payload(&session.user.id, full_name, student_id);
        let resp =
            post_json(config, &config.profiles_url(), &session.access_token, Some(PROFILE_PREFER), &payload).await?;
        Ok(decode_profile(resp))
    }

    /// Ensure a profile row exists after sign-in, seeding the OAuth name.
    pub async fn sync_profile(&self, session: &AuthSession) -> Option<Profile> {
        let name = session.user.metadata_full_name();
        match self.upsert_profile(session, name.as_deref(), None).await {
            Ok(profile) => profile,
            Err(_e) => {
                #[cfg(feature = "hydrate")]
                log::warn!("profile sync failed: {_e}");
                None
            }
        }
    }

    /// Resolve the session: OAuth fragment first, then the stored session,
    /// refreshing it when expired. Rejected fragment tokens fall through to
    /// the stored session. A failed refresh signs the user out locally.
    async fn resolve_session(&self, fragment: Option<&str>) -> Result<Option<AuthSession>, AuthError> {
        let Some(config) = self.config.as_ref() else {
            return Ok(None);
        };
        match self.session_from_fragment(config, fragment).await {
            Ok(Some(session)) => return Ok(Some(session)),
            Ok(None) => {}
            Err(_e) => {
                #[cfg(feature = "hydrate")]
                log::warn!("OAuth redirect tokens rejected: {_e}");
                clear_fragment();
            }
        }
        let Some(stored) = self.stored_session() else {
            return Ok(None);
        };
        if !stored.is_expired(now_secs()) {
            return Ok(Some(stored));
        }
        match self.refresh(config, &stored.refresh_token).await {
            Ok(session) => {
                self.persist(&session);
                Ok(Some(session))
            }
            Err(_e) => {
                #[cfg(feature = "hydrate")]
                log::warn!("session refresh failed: {_e}");
                self.clear();
                Ok(None)
            }
        }
    }

    async fn session_from_fragment(
        &self,
        config: &SupabaseConfig,
        fragment: Option<&str>,
    ) -> Result<Option<AuthSession>, AuthError> {
        let Some(tokens) = fragment.and_then(parse_fragment) else {
            return Ok(None);
        };
        let user_json = get_json(config, &config.user_url(), &tokens.access_token).await?;
        let user: AuthUser = serde_json::from_value(user_json).map_err(|e| AuthError::Decode(e.to_string()))?;
        clear_fragment();
        Ok(Some(self.establish(tokens.into_session(user))))
    }

    async fn refresh(&self, config: &SupabaseConfig, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let body = json!({ "refresh_token": refresh_token });
        let resp = post_json(config, &config.token_url("refresh_token"), &config.anon_key, None, &body).await?;
        decode_session(resp, now_secs())
    }
}

impl AuthProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<AuthSession>, AuthError> {
        self.resolve_session(current_fragment().as_deref()).await
    }

    fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthChange) + Send + Sync + 'static,
    {
        self.listeners.subscribe(callback)
    }
}
