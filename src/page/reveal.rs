//! One-shot entrance animations.
//!
//! Cards and sections get the `fade-in-up` class the first time at least 10%
//! of them is inside the viewport, where the viewport's bottom edge is pulled
//! up by 50px. The class is never removed, so scrolling away and back does
//! not replay the animation.

use std::collections::HashSet;

/// Class added to revealed elements.
pub const REVEAL_CLASS: &str = "fade-in-up";

/// Classes of elements that take part in entrance animations.
pub const ANIMATED_CLASSES: &[&str] = &["card", "project-card", "publication-item", "skill-category"];

/// Fraction of an element that must be visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// How far the viewport's bottom edge is shrunk.
pub const REVEAL_BOTTOM_MARGIN: f64 = 50.0;

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Fraction of this element inside `[view_top, view_bottom)`.
    fn visible_ratio(&self, view_top: f64, view_bottom: f64) -> f64 {
        let overlap = self.bottom().min(view_bottom) - self.top.max(view_top);
        if overlap <= 0.0 {
            // Also covers zero-height elements.
            return 0.0;
        }
        overlap / self.height
    }
}

/// Tracks which animated elements have been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealObserver {
    revealed: HashSet<usize>,
}

impl RevealObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check element `index` against the viewport.
    ///
    /// Returns `true` only on the observation that reveals it.
    pub fn observe(
        &mut self,
        index: usize,
        bounds: &Bounds,
        scroll_y: f64,
        viewport_height: f64,
    ) -> bool {
        if self.revealed.contains(&index) {
            return false;
        }
        let view_bottom = scroll_y + (viewport_height - REVEAL_BOTTOM_MARGIN).max(0.0);
        let ratio = bounds.visible_ratio(scroll_y, view_bottom);
        if ratio >= REVEAL_THRESHOLD {
            self.revealed.insert(index);
            true
        } else {
            false
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
