//! Markdown view for model output.

use leptos::prelude::*;

use crate::util::markdown::render_markdown_html;

/// Render `content` as sanitized markdown.
#[component]
pub fn MarkdownView(#[prop(into)] content: Signal<String>) -> impl IntoView {
    view! { <div class="markdown" inner_html=move || content.with(|md| render_markdown_html(md))></div> }
}
