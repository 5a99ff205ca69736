//! Page interaction model.
//!
//! Everything the visited portfolio page does after load: the mobile nav
//! toggle, scroll-driven section highlighting, smooth anchor scrolling, the
//! header backdrop, entrance animations, the hero typing effect, skill-bar
//! fills, theme persistence, e-mail copy and notification toasts.
//!
//! The model is host-driven. A host (browser binding, headless preview, test)
//! bootstraps a [`PageController`] once per page view and forwards input
//! events together with the current page time. Page time is a [`Duration`]
//! since load, so every timer in here is a deadline compared against the
//! `now` the host passes in.
//!
//! # Architecture
//!
//! ```text
//!   host events ──► PageController ──► Debounced scroll work
//!   (scroll/click/tick)    │               ├── active_section()
//!                          │               ├── header_style()
//!                          │               ├── SkillBar::reveal()
//!                          │               └── RevealObserver::observe()
//!                          ├── Typewriter (30ms cadence)
//!                          ├── Toasts     (100ms / 5s / 300ms)
//!                          └── ThemeStorage / Clipboard (host seams)
//! ```
//!
//! [`Duration`]: std::time::Duration

pub mod clipboard;
pub mod contact;
pub mod controller;
pub mod debounce;
pub mod nav;
pub mod reveal;
pub mod skills;
pub mod state;
pub mod theme;
pub mod toast;
pub mod typing;

pub use clipboard::{Clipboard, ClipboardError, copy_email, email_from_href};
pub use contact::{ContactForm, submit_contact_form};
pub use controller::{PageController, PageLayout};
pub use debounce::{Debounced, debounce};
pub use nav::{AnchorAction, HeaderStyle, NavMenu, Section, active_section, header_style};
pub use reveal::{Bounds, RevealObserver};
pub use skills::SkillBar;
pub use state::UiState;
pub use theme::{MemoryStorage, Theme, ThemeStorage, load_theme, toggle_theme};
pub use toast::{Severity, Toast, ToastPhase, Toasts};
pub use typing::Typewriter;

use std::time::Duration;

/// A section counts as reached once the scroll offset is within this many
/// pixels above its top.
pub const SECTION_OFFSET: f64 = 200.0;

/// Header switches to the opaque style strictly above this offset.
pub const HEADER_THRESHOLD: f64 = 100.0;

/// Quiet gap for coalescing scroll events.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(10);

/// Delay between typed characters of the hero subtitle.
pub const TYPE_SPEED: Duration = Duration::from_millis(30);
