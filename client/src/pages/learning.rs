//! Learning page: topic picker, explanation request, and explanation panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! The left panel edits `LearningState` and submits one request at a time
//! (the button is disabled while loading). The right panel reveals the
//! returned markdown with a typing animation and offers speech playback,
//! plain-text export, and marking the topic as learned.

use leptos::prelude::*;

use crate::components::markdown::MarkdownView;
use crate::net::api;
use crate::state::auth::AuthState;
use crate::state::catalog::{LANGUAGES, SUBJECTS, topics_for};
use crate::state::learning::LearningState;
use crate::util::storage::LocalStore;
use crate::util::typing::TypedReveal;
#[cfg(feature = "hydrate")]
use crate::util::typing::TICK_MS;
use crate::util::{export, markdown, speech};

#[component]
pub fn LearningPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let learning = RwSignal::new(LearningState::default());

    let subject = Memo::new(move |_| learning.with(|s| s.subject.clone()));
    let language = Memo::new(move |_| learning.with(|s| s.language.clone()));
    let explanation = Memo::new(move |_| learning.with(|s| s.explanation.clone()));
    let loading = Memo::new(move |_| learning.with(|s| s.loading));

    // =========================================================================
    // TYPED REVEAL
    // =========================================================================

    let reveal = TypedReveal::default();
    let ticks = RwSignal::new(0_usize);
    let run = RwSignal::new(0_u64);
    Effect::new(move || {
        let text = explanation.get();
        ticks.set(0);
        let generation = run.get_untracked().wrapping_add(1);
        run.set(generation);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            while !reveal.is_complete(&text, ticks.try_get_untracked().unwrap_or(usize::MAX)) {
                gloo_timers::future::TimeoutFuture::new(TICK_MS).await;
                // A newer explanation or page teardown ends this run.
                if run.try_get_untracked() != Some(generation) {
                    return;
                }
                ticks.update(|t| *t += 1);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (text, generation);
    });
    let typed = Signal::derive(move || explanation.with(|text| reveal.visible(text, ticks.get()).to_owned()));

    // =========================================================================
    // ACTIONS
    // =========================================================================

    let speaking = RwSignal::new(false);
    let speech_supported = speech::is_supported();
    on_cleanup(speech::stop);

    let on_submit = move |_| {
        speech::stop();
        speaking.set(false);
        let Some(Ok(request)) = learning.try_update(LearningState::prepare_request) else {
            return;
        };
        leptos::task::spawn_local(async move {
            let result = api::request_explanation(&request).await;
            let _ = learning.try_update(|s| s.finish(result));
        });
    };

    let on_speech = move |_| {
        if speaking.get_untracked() {
            speech::stop();
            speaking.set(false);
            return;
        }
        let (text, lang) = learning.with_untracked(|s| (markdown::plain_text(&s.explanation), s.language.clone()));
        let started = speech::speak(&text, &lang, move || {
            let _ = speaking.try_set(false);
        });
        speaking.set(started);
    };

    let on_export = move |_| {
        let Some(file) = learning.with_untracked(LearningState::export) else {
            return;
        };
        if let Err(e) = export::download_text(&file.filename, &file.content) {
            learning.update(|s| s.error = Some(e));
        }
    };

    let current_topic = move || learning.with(|s| s.resolved_topic().map(str::to_owned));
    let is_learned = move || {
        current_topic().is_some_and(|topic| {
            let subject = subject.get();
            auth.with(|a| a.user.as_ref().is_some_and(|u| u.progress.is_learned(&subject, &topic)))
        })
    };
    let on_mark_learned = move |_| {
        let Some(topic) = learning.with_untracked(|s| s.resolved_topic().map(str::to_owned)) else {
            return;
        };
        let subject = subject.get_untracked();
        auth.update(|a| {
            a.mark_learned(&subject, &topic, &LocalStore);
        });
    };

    // =========================================================================
    // VIEW
    // =========================================================================

    let topic_chips = move || {
        topics_for(&subject.get())
            .iter()
            .map(|&topic| {
                let class = move || {
                    if learning.with(|s| s.selected_topic == topic) { "chip chip--active" } else { "chip" }
                };
                view! {
                    <button type="button" class=class on:click=move |_| learning.update(|s| s.select_topic(topic))>
                        {topic}
                    </button>
                }
            })
            .collect_view()
    };

    let language_buttons = move || {
        LANGUAGES
            .iter()
            .map(|&lang| {
                let class = move || if language.get() == lang { "chip chip--active" } else { "chip" };
                view! {
                    <button type="button" class=class on:click=move |_| learning.update(|s| s.set_language(lang))>
                        {lang}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="learn">
            <section class="learn__panel">
                <h2>"Select Your Topic"</h2>
                <p class="learn__hint">"Choose a topic for personalized explanation"</p>

                <label class="learn__label">"Subject"</label>
                <select
                    class="learn__select"
                    prop:value=move || subject.get()
                    on:change=move |ev| learning.update(|s| s.set_subject(&event_target_value(&ev)))
                >
                    {SUBJECTS.iter().map(|s| view! { <option value=s.name>{s.name}</option> }).collect_view()}
                </select>

                <label class="learn__label">"Topic"</label>
                <div class="learn__chips">{topic_chips}</div>

                <label class="learn__label">"Or Custom Topic"</label>
                <input
                    class="learn__input"
                    type="text"
                    placeholder="Enter your specific doubt"
                    prop:value=move || learning.with(|s| s.custom_topic.clone())
                    on:input=move |ev| learning.update(|s| s.set_custom_topic(&event_target_value(&ev)))
                />

                <label class="learn__label">"Language"</label>
                <div class="learn__chips">{language_buttons}</div>

                <Show when=move || learning.with(|s| s.error.is_some())>
                    <p class="learn__error">{move || learning.with(|s| s.error.clone().unwrap_or_default())}</p>
                </Show>

                <button class="learn__submit" disabled=move || loading.get() on:click=on_submit>
                    {move || if loading.get() { "Generating..." } else { "Get Explanation" }}
                </button>
            </section>

            <section class="learn__panel learn__panel--output">
                <h2>"AI Explanation"</h2>
                <p class="learn__hint">"Personalized in " {move || language.get()}</p>
                <Show
                    when=move || explanation.with(|e| !e.is_empty())
                    fallback=|| view! { <p class="learn__placeholder">"Select a topic and language to get started"</p> }
                >
                    <div class="learn__output">
                        <MarkdownView content=typed/>
                    </div>
                    <div class="learn__actions">
                        <Show when=move || speech_supported>
                            <button class="learn__action" on:click=on_speech>
                                {move || if speaking.get() { "⏸ Pause" } else { "▶ Play" }}
                            </button>
                        </Show>
                        <button class="learn__action" on:click=on_export>"Export"</button>
                        <button
                            class="learn__action"
                            disabled=move || current_topic().is_none() || is_learned()
                            on:click=on_mark_learned
                        >
                            {move || if is_learned() { "✓ Learned" } else { "Mark as learned" }}
                        </button>
                    </div>
                </Show>
            </section>
        </div>
    }
}
