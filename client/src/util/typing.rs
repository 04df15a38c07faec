//! Typed-text reveal used by the explanation panel.
//!
//! The page advances a tick counter on a `gloo-timers` interval; this module
//! maps the counter to the visible prefix so the animation itself stays
//! deterministic and testable.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

/// Interval between reveal ticks.
pub const TICK_MS: u32 = 20;
/// Characters revealed per tick.
pub const CHARS_PER_TICK: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedReveal {
    step: usize,
}

impl Default for TypedReveal {
    fn default() -> Self {
        Self::new(CHARS_PER_TICK)
    }
}

impl TypedReveal {
    /// `step` characters per tick; zero is treated as one.
    pub fn new(step: usize) -> Self {
        Self { step: step.max(1) }
    }

    /// Prefix of `text` visible after `ticks` ticks, cut on a char boundary.
    pub fn visible<'a>(&self, text: &'a str, ticks: usize) -> &'a str {
        let chars = ticks.saturating_mul(self.step);
        match text.char_indices().nth(chars) {
            Some((byte, _)) => &text[..byte],
            None => text,
        }
    }

    pub fn is_complete(&self, text: &str, ticks: usize) -> bool {
        ticks >= self.ticks_needed(text)
    }

    /// Ticks until the whole text is visible.
    pub fn ticks_needed(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.step)
    }
}
