//! Local UI chrome state (theme, mobile menu).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of auth and learning state so
//! the navigation shell can evolve independently.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub menu_open: bool,
}

impl UiState {
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Close the mobile menu. Returns whether it was open.
    pub fn close_menu(&mut self) -> bool {
        std::mem::take(&mut self.menu_open)
    }
}
