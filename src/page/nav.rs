//! Navigation: menu toggle, active-section tracking, anchor scrolling and
//! the header backdrop.

use super::{HEADER_THRESHOLD, SECTION_OFFSET};

/// Class applied to the menu, the toggle control and the current nav link.
pub const ACTIVE_CLASS: &str = "active";

/// A page section that a nav link can point at.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    /// Offset of the section's top edge from the top of the document.
    pub top: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

// ============================================================================
// Menu Toggle
// ============================================================================

/// Open/closed state of the mobile navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    pub open: bool,
}

impl NavMenu {
    /// Flip the menu (toggle control clicked).
    pub const fn toggle(self) -> Self {
        Self { open: !self.open }
    }

    /// Close the menu (a nav link was followed).
    pub const fn close(self) -> Self {
        Self { open: false }
    }

    /// Class list shared by the menu and the toggle control.
    pub const fn class(self) -> Option<&'static str> {
        if self.open { Some(ACTIVE_CLASS) } else { None }
    }
}

// ============================================================================
// Active Section
// ============================================================================

/// The section the nav should highlight at `scroll_y`.
///
/// Last section in document order whose `top - 200` is at or above the
/// scroll offset. `None` when no section has been reached.
pub fn active_section(sections: &[Section], scroll_y: f64) -> Option<&Section> {
    sections
        .iter()
        .filter(|section| scroll_y >= section.top - SECTION_OFFSET)
        .last()
}

/// Active flag for each nav link href, in the order given.
///
/// A link is active iff its href is `#<active id>`.
pub fn nav_link_states<'a>(
    hrefs: impl IntoIterator<Item = &'a str>,
    active: Option<&str>,
) -> Vec<(&'a str, bool)> {
    hrefs
        .into_iter()
        .map(|href| {
            let is_active = active.is_some_and(|id| href.strip_prefix('#') == Some(id));
            (href, is_active)
        })
        .collect()
}

// ============================================================================
// Anchor Scroll
// ============================================================================

/// What to do with a click on a link.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorAction {
    /// Not a same-page anchor; let the browser follow it.
    Default,
    /// Suppress the jump and smooth-scroll to the target top.
    ScrollTo { top: f64 },
    /// Suppress the jump; the target does not exist, so nothing happens.
    Skip,
}

/// Resolve a clicked href against the page sections.
pub fn resolve_anchor(href: &str, sections: &[Section]) -> AnchorAction {
    let Some(id) = href.strip_prefix('#') else {
        return AnchorAction::Default;
    };
    sections
        .iter()
        .find(|section| !id.is_empty() && section.id == id)
        .map_or(AnchorAction::Skip, |section| AnchorAction::ScrollTo { top: section.top })
}

// ============================================================================
// Header Backdrop
// ============================================================================

/// Visual style of the fixed header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Transparent, page background shows through.
    #[default]
    Default,
    /// Near-opaque white with a blurred backdrop.
    Opaque,
}

impl HeaderStyle {
    pub const fn background_color(self) -> &'static str {
        match self {
            Self::Default => "var(--bg-primary)",
            Self::Opaque => "rgba(255, 255, 255, 0.95)",
        }
    }

    pub const fn backdrop_filter(self) -> &'static str {
        match self {
            Self::Default => "none",
            Self::Opaque => "blur(10px)",
        }
    }
}

/// Header style for a scroll offset. Exactly 100 keeps the default style.
pub fn header_style(scroll_y: f64) -> HeaderStyle {
    if scroll_y > HEADER_THRESHOLD {
        HeaderStyle::Opaque
    } else {
        HeaderStyle::Default
    }
}
