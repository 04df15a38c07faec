//! Text-to-speech through the Web Speech API.
//!
//! Every call is a no-op outside the browser; `is_supported` reports false
//! there so the play button is hidden.

#[cfg(test)]
#[path = "speech_test.rs"]
mod speech_test;

/// Utterance events that end playback, successfully or not.
pub const FINISH_EVENTS: [&str; 2] = ["end", "error"];

/// BCP-47 voice tag for an explanation language.
pub fn language_tag(language: &str) -> &'static str {
    match language.trim().to_ascii_lowercase().as_str() {
        "hindi" => "hi-IN",
        "spanish" => "es-ES",
        "french" => "fr-FR",
        "german" => "de-DE",
        _ => "en-US",
    }
}

pub fn is_supported() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().is_some_and(|w| w.speech_synthesis().is_ok())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Speak `text` in `language`, cancelling anything already queued.
/// `on_finish` runs when playback ends or fails. Returns whether playback started.
pub fn speak<F>(text: &str, language: &str, on_finish: F) -> bool
where
    F: FnOnce() + Clone + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) else {
            return false;
        };
        let Ok(utterance) = web_sys::SpeechSynthesisUtterance::new_with_text(text) else {
            return false;
        };
        utterance.set_lang(language_tag(language));
        for event in FINISH_EVENTS {
            let callback = Closure::once_into_js(on_finish.clone());
            if utterance.add_event_listener_with_callback(event, callback.unchecked_ref()).is_err() {
                return false;
            }
        }
        synth.cancel();
        synth.speak(&utterance);
        true
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (text, language, on_finish);
        false
    }
}

/// Stop any current or queued speech.
pub fn stop() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) {
            synth.cancel();
        }
    }
}
