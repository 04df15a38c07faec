//! Sign-up page: name, student ID, email, password.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::supabase::{SignUp, SupabaseAuth};
use crate::net::types::AuthChange;
use crate::pages::login::{adopt_session, auth_error_text};
use crate::state::auth::AuthState;

pub const CONFIRM_EMAIL_MESSAGE: &str = "Account created. Check your email to confirm it, then log in.";

const MIN_PASSWORD_LEN: usize = 6;

fn validate_sign_up(form: &SignUp) -> Result<SignUp, &'static str> {
    let cleaned = SignUp {
        email: form.email.trim().to_owned(),
        password: form.password.clone(),
        full_name: form.full_name.trim().to_owned(),
        student_id: form.student_id.trim().to_owned(),
    };
    if cleaned.full_name.is_empty() {
        return Err("Enter your full name.");
    }
    if cleaned.email.is_empty() {
        return Err("Enter your email.");
    }
    if cleaned.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    Ok(cleaned)
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let provider = expect_context::<SupabaseAuth>();
    let navigate = use_navigate();

    let form = RwSignal::new(SignUp::default());
    let error = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let cleaned = match form.with_untracked(validate_sign_up) {
            Ok(cleaned) => cleaned,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);
        info.set(None);

        let provider = provider.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match provider.sign_up(&cleaned).await {
                Ok(Some(session)) => {
                    adopt_session(auth, &AuthChange::SignedIn(session));
                    navigate("/", NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Ok(None) => {
                    info.set(Some(CONFIRM_EMAIL_MESSAGE));
                    busy.set(false);
                }
                Err(e) => {
                    error.set(Some(auth_error_text(&e, "Sign up failed")));
                    busy.set(false);
                }
            }
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, get: fn(&SignUp) -> &String, set: fn(&mut SignUp, String)| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Create your account"</h1>
                <Show when=move || error.with(Option::is_some)>
                    <p class="auth-card__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || info.with(Option::is_some)>
                    <p class="auth-card__info">{move || info.get().unwrap_or_default()}</p>
                </Show>
                {field("Full name", "text", |f| &f.full_name, |f, v| f.full_name = v)}
                {field("Student ID (optional)", "text", |f| &f.student_id, |f, v| f.student_id = v)}
                {field("Email", "email", |f| &f.email, |f, v| f.email = v)}
                {field("Password", "password", |f| &f.password, |f, v| f.password = v)}
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Sign up" }}
                </button>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <a href="/login">"Log in"</a>
                </p>
            </form>
        </div>
    }
}
