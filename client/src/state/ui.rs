//! Local UI chrome state.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Sidebar width when expanded, in pixels.
pub const SIDEBAR_WIDTH: u32 = 250;
/// Sidebar width when collapsed to icons, in pixels.
pub const SIDEBAR_COLLAPSED_WIDTH: u32 = 80;

/// Presentation-only state for the authenticated layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub sidebar_collapsed: bool,
}

impl UiState {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    #[must_use]
    pub fn sidebar_width(self) -> u32 {
        if self.sidebar_collapsed { SIDEBAR_COLLAPSED_WIDTH } else { SIDEBAR_WIDTH }
    }

    /// Inline style for `<main>` so content clears the fixed sidebar.
    #[must_use]
    pub fn main_style(self) -> String {
        format!("margin-left: {}px;", self.sidebar_width())
    }
}
