//! Progress page: learned topics grouped by subject.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn ProgressPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let groups = move || {
        auth.with(|s| {
            s.user.as_ref().map_or_else(Vec::new, |u| {
                u.progress.subjects().map(|(subject, topics)| (subject.to_owned(), topics.to_vec())).collect()
            })
        })
    };

    view! {
        <section class="progress">
            <h1>"Your progress"</h1>
            <Show
                when=move || !groups().is_empty()
                fallback=|| view! { <p class="progress__empty">"No topics learned yet. Mark a topic as learned from the Learn page."</p> }
            >
                <For each=groups key=|(subject, topics)| (subject.clone(), topics.len()) let:group>
                    <div class="progress__subject">
                        <h2>{group.0.clone()} " (" {group.1.len()} ")"</h2>
                        <ul>
                            {group.1.iter().map(|topic| view! { <li>{topic.clone()}</li> }).collect_view()}
                        </ul>
                    </div>
                </For>
            </Show>
        </section>
    }
}
