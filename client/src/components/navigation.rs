//! Top navigation bar: links, user name, logout, theme toggle, mobile menu.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::net::supabase::SupabaseAuth;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::dark_mode;
use crate::util::storage::LocalStore;

/// `(label, path)` pairs shown in the bar.
pub const NAV_LINKS: &[(&str, &str)] = &[("Home", "/"), ("Learn", "/learning"), ("Progress", "/progress")];

/// Whether `path` is the current route. Trailing slashes are ignored.
fn is_active(current: &str, path: &str) -> bool {
    let normalize = |p: &str| {
        let trimmed = p.trim_end_matches('/');
        if trimmed.is_empty() { "/".to_owned() } else { trimmed.to_owned() }
    };
    normalize(current) == normalize(path)
}

fn link_class(current: &str, path: &str) -> &'static str {
    if is_active(current, path) { "nav__link nav__link--active" } else { "nav__link" }
}

#[component]
pub fn Navigation() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let provider = expect_context::<SupabaseAuth>();
    let location = use_location();
    let navigate = use_navigate();

    // Close the mobile menu on route change.
    let pathname = location.pathname;
    Effect::new(move || {
        pathname.track();
        if ui.with_untracked(|s| s.menu_open) {
            ui.update(|s| {
                s.close_menu();
            });
        }
    });

    let display_name = move || auth.with(|s| s.display_name().unwrap_or_default().to_owned());

    let on_logout = move |_| {
        let provider = provider.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            provider.sign_out().await;
            auth.update(|s| s.sign_out(&LocalStore));
            navigate("/login", NavigateOptions::default());
        });
    };
    let on_logout_mobile = on_logout.clone();

    let toggle_theme = move |_| ui.update(|s| s.dark_mode = dark_mode::toggle(s.dark_mode));
    let theme_icon = move || if ui.with(|s| s.dark_mode) { "☀" } else { "🌙" };

    let links = move || {
        NAV_LINKS
            .iter()
            .map(|&(label, path)| {
                view! {
                    <a href=path class=move || pathname.with(|current| link_class(current, path))>
                        {label}
                    </a>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="nav">
            <div class="nav__left">
                <a href="/" class="nav__brand">"NexaLearn"</a>
                <div class="nav__links">{links}</div>
            </div>
            <div class="nav__right">
                <button class="nav__icon" title="Toggle theme" on:click=toggle_theme>{theme_icon}</button>
                <span class="nav__user">{display_name}</span>
                <button class="nav__button" on:click=on_logout>"Logout"</button>
                <button class="nav__icon nav__menu-toggle" on:click=move |_| ui.update(UiState::toggle_menu)>
                    {move || if ui.with(|s| s.menu_open) { "✕" } else { "☰" }}
                </button>
            </div>
            <Show when=move || ui.with(|s| s.menu_open)>
                <div class="nav__mobile">
                    {links}
                    <span class="nav__user">{display_name}</span>
                    <button class="nav__button" on:click=on_logout_mobile.clone()>"Logout"</button>
                </div>
            </Show>
        </nav>
    }
}
