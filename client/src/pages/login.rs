//! Login page: email/password and Google OAuth.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::auth_provider::AuthError;
use crate::net::supabase::SupabaseAuth;
use crate::net::types::AuthChange;
use crate::state::auth::AuthState;
use crate::util::storage::LocalStore;

/// Trim the email and require both fields.
fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Message shown for a failed auth call.
pub(crate) fn auth_error_text(err: &AuthError, fallback: &str) -> String {
    match err {
        AuthError::Rejected(message) if !message.trim().is_empty() => message.clone(),
        AuthError::NotConfigured => err.to_string(),
        _ => fallback.to_owned(),
    }
}

/// Sign the session into shared state right away so guards see it before
/// the listener's profile sync finishes.
pub(crate) fn adopt_session(auth: RwSignal<AuthState>, change: &AuthChange) {
    auth.update(|s| s.apply_change(change, None, &LocalStore));
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<SupabaseAuth>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit_provider = provider.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, password_value) = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(values) => values,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        let provider = submit_provider.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match provider.sign_in_with_password(&email_value, &password_value).await {
                Ok(session) => {
                    adopt_session(auth, &AuthChange::SignedIn(session));
                    navigate("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Err(e) => {
                    error.set(Some(auth_error_text(&e, "Login failed")));
                    busy.set(false);
                }
            }
        });
    };

    // OAuth navigates away on success.
    let on_google = move |_| {
        busy.set(true);
        if let Err(e) = provider.sign_in_with_google() {
            error.set(Some(auth_error_text(&e, "Google login failed")));
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Welcome back"</h1>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <input
                    class="auth-input"
                    type="email"
                    required
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    required
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Login" }}
                </button>
                <button class="auth-button auth-button--google" type="button" on:click=on_google>
                    "Continue with Google"
                </button>
                <p class="auth-card__footer">
                    "New user? "
                    <a href="/signup">"Create account"</a>
                </p>
            </form>
        </div>
    }
}
