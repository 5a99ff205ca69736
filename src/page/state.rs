//! UI state owned by the page controller.
//!
//! Updates are pure: each takes the current state by value and returns the
//! next one, so the controller is the only place holding it.

use super::{
    nav::{HeaderStyle, NavMenu, Section, active_section, header_style},
    theme::Theme,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub nav: NavMenu,
    /// Id of the highlighted section, if any.
    pub active_section: Option<String>,
    pub header: HeaderStyle,
    pub theme: Theme,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Recompute the scroll-derived parts.
    #[must_use]
    pub fn scrolled(self, sections: &[Section], scroll_y: f64) -> Self {
        Self {
            active_section: active_section(sections, scroll_y).map(|s| s.id.clone()),
            header: header_style(scroll_y),
            ..self
        }
    }

    #[must_use]
    pub fn nav_toggled(self) -> Self {
        Self {
            nav: self.nav.toggle(),
            ..self
        }
    }

    #[must_use]
    pub fn nav_closed(self) -> Self {
        Self {
            nav: self.nav.close(),
            ..self
        }
    }

    #[must_use]
    pub fn themed(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }
}
