//! Home page: greeting and entry points.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let name = move || auth.with(|s| s.display_name().unwrap_or_default().to_owned());
    let learned = move || auth.with(|s| s.user.as_ref().map_or(0, |u| u.progress.total()));

    view! {
        <section class="home">
            <h1 class="home__greeting">"Welcome, " {name}</h1>
            <p class="home__lead">"Pick a topic and get a clear, student-friendly explanation in your language."</p>
            <div class="home__cards">
                <a class="home__card" href="/learning">
                    <h2>"Start learning"</h2>
                    <p>"Choose a subject and topic, or ask your own question."</p>
                </a>
                <a class="home__card" href="/progress">
                    <h2>"Your progress"</h2>
                    <p>{move || format!("{} topics learned", learned())}</p>
                </a>
            </div>
        </section>
    }
}
