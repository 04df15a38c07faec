//! Dark mode initialization and toggle.
//!
//! Reads the user's preference from `localStorage` and toggles the `dark`
//! class on the `<html>` element. Toggle writes back `dark`/`light` under
//! the `theme` key. Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! safely no-op to keep server rendering deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

pub const STORAGE_KEY: &str = "theme";
const DARK_CLASS: &str = "dark";

#[cfg(any(test, feature = "hydrate"))]
fn theme_value(enabled: bool) -> &'static str {
    if enabled { "dark" } else { "light" }
}

/// Stored theme string to preference; unknown values count as unset.
#[cfg(any(test, feature = "hydrate"))]
fn parse_theme(value: &str) -> Option<bool> {
    match value {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

/// Read the dark mode preference from localStorage.
///
/// Returns `true` if the user previously chose dark mode, or if the system
/// prefers dark mode and no preference is stored.
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        use crate::util::storage::{KeyValueStore, LocalStore};

        if let Some(stored) = LocalStore.get(STORAGE_KEY).as_deref().and_then(parse_theme) {
            return stored;
        }

        // Fall back to system preference.
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Add or remove the `dark` class on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let classes = el.class_list();
            let _ = if enabled { classes.add_1(DARK_CLASS) } else { classes.remove_1(DARK_CLASS) };
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (enabled, DARK_CLASS);
    }
}

/// Toggle dark mode and persist the new preference to localStorage.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        use crate::util::storage::{KeyValueStore, LocalStore};
        LocalStore.set(STORAGE_KEY, theme_value(next));
    }
    next
}
