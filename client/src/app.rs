//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::guards::{ProtectedRoute, PublicRoute};
use crate::net::supabase::SupabaseAuth;
use crate::pages::{
    home::HomePage, learning::LearningPage, login::LoginPage, progress::ProgressPage, signup::SignupPage,
};
use crate::state::{auth::AuthState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Run the one-shot session restore and subscribe to auth changes for the
/// lifetime of the root component.
fn install_auth_bootstrap(auth: RwSignal<AuthState>, provider: SupabaseAuth) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::auth_provider::AuthProvider;
        use crate::net::types::AuthChange;
        use crate::state::auth::{ChangeSequence, restore_session};
        use crate::util::storage::LocalStore;

        // A sign-in waits on the profile fetch; a later sign-out must win.
        let sequence = RwSignal::new(ChangeSequence::default());
        let listener_provider = provider.clone();
        let subscription = provider.on_change(move |change| {
            let Some(ticket) = sequence.try_update(ChangeSequence::next) else {
                return;
            };
            let change = change.clone();
            let provider = listener_provider.clone();
            leptos::task::spawn_local(async move {
                let profile = match &change {
                    AuthChange::SignedIn(session) => provider.sync_profile(session).await,
                    AuthChange::SignedOut => None,
                };
                let Some(sequence) = sequence.try_get_untracked() else {
                    return;
                };
                let applied = auth
                    .try_update(|s| s.apply_change_if_current(&sequence, ticket, &change, profile.as_ref(), &LocalStore));
                if applied == Some(false) {
                    log::debug!("dropped superseded auth change");
                }
            });
        });
        on_cleanup(move || drop(subscription));

        leptos::task::spawn_local(async move {
            let user = restore_session(&provider, &LocalStore).await;
            let _ = auth.try_update(|s| s.complete_restore(user));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (auth, provider);
    }
}

/// Apply the stored theme once on the client.
fn install_theme(ui: RwSignal<UiState>) {
    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let dark = crate::util::dark_mode::read_preference();
        crate::util::dark_mode::apply(dark);
        ui.update(|s| s.dark_mode = dark);
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = ui;
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState::default());
    let provider = SupabaseAuth::from_build_env();

    provide_context(auth);
    provide_context(ui);
    provide_context(provider.clone());

    install_auth_bootstrap(auth, provider);
    install_theme(ui);

    view! {
        <Stylesheet id="leptos" href="/pkg/nexa-learn.css"/>
        <Title text="NexaLearn"/>

        <Router>
            <main class="app">
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("login") view=|| view! { <PublicRoute><LoginPage/></PublicRoute> }/>
                    <Route path=StaticSegment("signup") view=|| view! { <PublicRoute><SignupPage/></PublicRoute> }/>
                    <Route path=StaticSegment("") view=|| view! { <ProtectedRoute><HomePage/></ProtectedRoute> }/>
                    <Route
                        path=StaticSegment("learning")
                        view=|| view! { <ProtectedRoute><LearningPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("progress")
                        view=|| view! { <ProtectedRoute><ProgressPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
