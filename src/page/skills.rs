//! Skill-bar fills.
//!
//! Each bar declares its level as a percentage. The first time a bar is in
//! the viewport its fill width is set, and a width that is already set is
//! left alone so the CSS transition plays once.

use super::reveal::Bounds;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillBar {
    pub name: String,
    /// Declared level, 0–100.
    pub percentage: u8,
    pub bounds: Bounds,
    /// Fill width once set, e.g. `"85%"`.
    fill: Option<String>,
}

impl SkillBar {
    pub fn new(name: impl Into<String>, percentage: u8, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            percentage: percentage.min(100),
            bounds,
            fill: None,
        }
    }

    /// Parse the percentage from a markup attribute value such as `"85"`.
    pub fn parse_percentage(value: &str) -> Option<u8> {
        let value = value.trim().trim_end_matches('%');
        let parsed: f64 = value.parse().ok()?;
        if !parsed.is_finite() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100
        Some(parsed.round().clamp(0.0, 100.0) as u8)
    }

    /// Whether any part of the bar is inside the viewport.
    pub fn in_viewport(&self, scroll_y: f64, viewport_height: f64) -> bool {
        let top = self.bounds.top - scroll_y;
        let bottom = self.bounds.bottom() - scroll_y;
        top < viewport_height && bottom > 0.0
    }

    /// Set the fill if the bar is visible and not yet filled.
    ///
    /// Returns `true` when the width was set by this call.
    pub fn reveal(&mut self, scroll_y: f64, viewport_height: f64) -> bool {
        if self.fill.is_some() || !self.in_viewport(scroll_y, viewport_height) {
            return false;
        }
        self.fill = Some(format!("{}%", self.percentage));
        true
    }

    pub fn fill(&self) -> Option<&str> {
        self.fill.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(top: f64) -> SkillBar {
        SkillBar::new("Rust", 85, Bounds::new(top, 20.0))
    }

    #[test]
    fn test_fill_set_when_visible() {
        let mut b = bar(300.0);
        assert!(b.reveal(0.0, 800.0));
        assert_eq!(b.fill(), Some("85%"));
    }

    #[test]
    fn test_fill_not_set_offscreen() {
        let mut b = bar(2000.0);
        assert!(!b.reveal(0.0, 800.0));
        assert_eq!(b.fill(), None);

        // Scrolled past it entirely.
        let mut above = bar(100.0);
        assert!(!above.reveal(500.0, 800.0));
    }

    #[test]
    fn test_fill_set_only_once() {
        let mut b = bar(300.0);
        assert!(b.reveal(0.0, 800.0));
        b.percentage = 40;
        assert!(!b.reveal(0.0, 800.0));
        assert_eq!(b.fill(), Some("85%"));
    }

    #[test]
    fn test_viewport_edges() {
        // top == viewport height is not visible.
        assert!(!bar(800.0).in_viewport(0.0, 800.0));
        assert!(bar(799.0).in_viewport(0.0, 800.0));
        // bottom == 0 is not visible.
        assert!(!bar(100.0).in_viewport(120.0, 800.0));
        assert!(bar(100.0).in_viewport(119.0, 800.0));
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(SkillBar::parse_percentage("85"), Some(85));
        assert_eq!(SkillBar::parse_percentage(" 90% "), Some(90));
        assert_eq!(SkillBar::parse_percentage("72.6"), Some(73));
        assert_eq!(SkillBar::parse_percentage("150"), Some(100));
        assert_eq!(SkillBar::parse_percentage("-5"), Some(0));
        assert_eq!(SkillBar::parse_percentage("lots"), None);
        assert_eq!(SkillBar::parse_percentage("NaN"), None);
    }

    #[test]
    fn test_new_clamps_percentage() {
        assert_eq!(SkillBar::new("x", 250, Bounds::new(0.0, 1.0)).percentage, 100);
    }
}
