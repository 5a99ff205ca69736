//! The page controller: one per page view.
//!
//! The host calls [`PageController::init`] once the page has loaded and then
//! forwards events. All timers are advanced by [`PageController::tick`].

use super::{
    SCROLL_DEBOUNCE, TYPE_SPEED,
    clipboard::{Clipboard, copy_email},
    contact::{ContactForm, submit_contact_form},
    debounce::DebounceTimer,
    nav::{AnchorAction, Section, nav_link_states, resolve_anchor},
    reveal::{Bounds, RevealObserver},
    skills::SkillBar,
    state::UiState,
    theme::{Theme, ThemeStorage, load_theme, toggle_theme},
    toast::Toasts,
    typing::Typewriter,
};
use std::{collections::BTreeMap, time::Duration};

/// What the page markup provides. Optional parts may be absent; the
/// features that need them are skipped.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// `section[id]` elements in document order.
    pub sections: Vec<Section>,
    /// `href` of every `.nav-link`.
    pub nav_links: Vec<String>,
    pub skill_bars: Vec<SkillBar>,
    /// Elements with an entrance animation class.
    pub animated: Vec<Bounds>,
    /// Text of `.hero-subtitle`.
    pub hero_subtitle: Option<String>,
    /// `#contact-form`.
    pub contact_form: Option<ContactForm>,
    pub viewport_height: f64,
}

pub struct PageController<S, C> {
    layout: PageLayout,
    state: UiState,
    storage: S,
    clipboard: C,
    toasts: Toasts,
    typewriter: Option<Typewriter>,
    reveal: RevealObserver,
    scroll: DebounceTimer<f64>,
    /// Latest reported offset.
    scroll_y: f64,
    /// Offset the scroll-driven state was last computed for.
    applied_y: Option<f64>,
}

impl<S, C> PageController<S, C>
where
    S: ThemeStorage,
    C: Clipboard,
{
    /// Bootstrap the page at load time `now`.
    ///
    /// Applies the stored theme, starts the hero typing animation and reveals
    /// whatever is already on screen.
    pub fn init(layout: PageLayout, storage: S, clipboard: C, now: Duration) -> Self {
        let theme = load_theme(&storage);
        let typewriter = layout.hero_subtitle.as_deref().map(|text| {
            let mut tw = Typewriter::new(text, TYPE_SPEED);
            tw.start(now);
            tw
        });

        let mut controller = Self {
            layout,
            state: UiState::new(theme),
            storage,
            clipboard,
            toasts: Toasts::new(),
            typewriter,
            reveal: RevealObserver::new(),
            scroll: DebounceTimer::new(SCROLL_DEBOUNCE, true),
            scroll_y: 0.0,
            applied_y: None,
        };
        controller.observe_reveals();
        controller
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Window scrolled to `scroll_y`.
    ///
    /// Entrance animations are checked on every event. Section highlight,
    /// header style and skill bars go through the leading-edge debouncer;
    /// returns `true` if they were recomputed. Offsets swallowed during a
    /// burst are caught up by [`tick`](Self::tick) once the burst goes quiet.
    pub fn on_scroll(&mut self, scroll_y: f64, now: Duration) -> bool {
        self.scroll_y = scroll_y;
        self.observe_reveals();

        match self.scroll.call(now, scroll_y) {
            Some(scroll_y) => {
                self.apply_scroll(scroll_y);
                true
            }
            None => false,
        }
    }

    /// Advance timers to `now`.
    ///
    /// When a scroll burst has settled, the scroll-driven state is brought
    /// up to the last reported offset. Returns the characters the typing
    /// animation appended, if any.
    pub fn tick(&mut self, now: Duration) -> String {
        let was_armed = self.scroll.is_armed();
        if let Some(scroll_y) = self.scroll.tick(now) {
            self.apply_scroll(scroll_y);
        } else if was_armed && !self.scroll.is_armed() && self.applied_y != Some(self.scroll_y) {
            self.apply_scroll(self.scroll_y);
        }
        self.toasts.prune(now);
        self.typewriter
            .as_mut()
            .map(|tw| tw.tick(now))
            .unwrap_or_default()
    }

    pub fn toggle_nav(&mut self) {
        self.state = std::mem::take(&mut self.state).nav_toggled();
    }

    pub fn nav_link_clicked(&mut self) {
        self.state = std::mem::take(&mut self.state).nav_closed();
    }

    pub fn anchor_clicked(&self, href: &str) -> AnchorAction {
        resolve_anchor(href, &self.layout.sections)
    }

    /// A link was clicked; `mailto:` links are copied instead of followed.
    ///
    /// Returns the toast id when the click was intercepted.
    pub fn email_clicked(&mut self, href: &str, now: Duration) -> Option<u64> {
        copy_email(&mut self.clipboard, href, &mut self.toasts, now)
    }

    /// The contact form was submitted. `None` if the page has no form.
    pub fn contact_submitted(&mut self, now: Duration) -> Option<BTreeMap<String, String>> {
        let form = self.layout.contact_form.as_mut()?;
        Some(submit_contact_form(form, &mut self.toasts, now))
    }

    /// Flip and persist the theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = toggle_theme(self.state.theme, &mut self.storage);
        self.state = std::mem::take(&mut self.state).themed(theme);
        theme
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub const fn state(&self) -> &UiState {
        &self.state
    }

    pub const fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn skill_bars(&self) -> &[SkillBar] {
        &self.layout.skill_bars
    }

    pub fn contact_form_mut(&mut self) -> Option<&mut ContactForm> {
        self.layout.contact_form.as_mut()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveal.is_revealed(index)
    }

    /// Current hero subtitle text, `None` if the page has no subtitle.
    pub fn subtitle(&self) -> Option<String> {
        self.typewriter.as_ref().map(Typewriter::output)
    }

    /// Active flag per nav link.
    pub fn nav_links(&self) -> Vec<(&str, bool)> {
        nav_link_states(
            self.layout.nav_links.iter().map(String::as_str),
            self.state.active_section.as_deref(),
        )
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn apply_scroll(&mut self, scroll_y: f64) {
        self.applied_y = Some(scroll_y);
        self.state = std::mem::take(&mut self.state).scrolled(&self.layout.sections, scroll_y);
        let viewport = self.layout.viewport_height;
        for bar in &mut self.layout.skill_bars {
            bar.reveal(scroll_y, viewport);
        }
    }

    fn observe_reveals(&mut self) {
        let viewport = self.layout.viewport_height;
        for (index, bounds) in self.layout.animated.iter().enumerate() {
            self.reveal.observe(index, bounds, self.scroll_y, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{
        clipboard::{ClipboardError, tests::FakeClipboard},
        nav::HeaderStyle,
        theme::{MemoryStorage, THEME_KEY},
        toast::Severity,
    };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn layout() -> PageLayout {
        PageLayout {
            sections: vec![
                Section::new("about", 0.0),
                Section::new("projects", 400.0),
                Section::new("contact", 900.0),
            ],
            nav_links: vec!["#about".into(), "#projects".into(), "#contact".into()],
            skill_bars: vec![
                SkillBar::new("Rust", 90, Bounds::new(500.0, 20.0)),
                SkillBar::new("Go", 70, Bounds::new(1600.0, 20.0)),
            ],
            animated: vec![Bounds::new(100.0, 200.0), Bounds::new(1200.0, 200.0)],
            hero_subtitle: Some("Builder".into()),
            contact_form: None,
            viewport_height: 800.0,
        }
    }

    fn controller() -> PageController<MemoryStorage, FakeClipboard> {
        PageController::init(layout(), MemoryStorage::new(), FakeClipboard::default(), ms(0))
    }

    #[test]
    fn test_init_applies_defaults() {
        let c = controller();
        assert_eq!(c.state().theme, Theme::Light);
        assert_eq!(c.state().header, HeaderStyle::Default);
        assert_eq!(c.state().active_section, None);
        assert_eq!(c.subtitle().as_deref(), Some("B"));
        // First card is on screen at load, the second is not.
        assert!(c.is_revealed(0));
        assert!(!c.is_revealed(1));
        // Skill bars wait for the first scroll.
        assert_eq!(c.skill_bars()[0].fill(), None);
    }

    #[test]
    fn test_init_reads_stored_theme() {
        let mut storage = MemoryStorage::new();
        storage.set(THEME_KEY, "dark");
        let c = PageController::init(layout(), storage, FakeClipboard::default(), ms(0));
        assert_eq!(c.state().theme, Theme::Dark);
    }

    #[test]
    fn test_scroll_updates_state_and_links() {
        let mut c = controller();
        assert!(c.on_scroll(500.0, ms(1000)));

        assert_eq!(c.state().active_section.as_deref(), Some("projects"));
        assert_eq!(c.state().header, HeaderStyle::Opaque);
        assert_eq!(
            c.nav_links(),
            vec![("#about", false), ("#projects", true), ("#contact", false)]
        );
        assert_eq!(c.skill_bars()[0].fill(), Some("90%"));
        assert_eq!(c.skill_bars()[1].fill(), None);
        assert!(c.is_revealed(1));
    }

    #[test]
    fn test_scroll_burst_settles_on_last_offset() {
        let mut c = controller();
        let mut now = 1000;
        assert!(c.on_scroll(0.0, ms(now)));
        for step in 1..=19 {
            now += 5;
            assert!(!c.on_scroll(f64::from(step) * 50.0, ms(now)));
        }
        // Mid-burst the state still reflects the first event.
        c.tick(ms(now + 5));
        assert_eq!(c.state().header, HeaderStyle::Default);
        assert_eq!(c.skill_bars()[1].fill(), None);

        // Quiet for longer than the debounce gap: state matches 950.
        c.tick(ms(now + 50));
        assert_eq!(c.state().active_section.as_deref(), Some("contact"));
        assert_eq!(c.state().header, HeaderStyle::Opaque);
        assert_eq!(
            c.nav_links(),
            vec![("#about", false), ("#projects", false), ("#contact", true)]
        );
        assert_eq!(c.skill_bars()[1].fill(), Some("70%"));
    }

    #[test]
    fn test_scroll_after_quiet_gap_runs_immediately() {
        let mut c = controller();
        assert!(c.on_scroll(500.0, ms(1000)));
        assert!(!c.on_scroll(520.0, ms(1005)));
        c.tick(ms(1100));
        assert_eq!(c.state().active_section.as_deref(), Some("projects"));

        // No tick in between: the next event still sees an idle timer.
        assert!(c.on_scroll(950.0, ms(1200)));
        assert_eq!(c.state().active_section.as_deref(), Some("contact"));
    }

    #[test]
    fn test_reveal_runs_on_every_scroll_event() {
        let mut c = controller();
        c.on_scroll(0.0, ms(1000));
        // Inside the debounce window, yet the card still gets revealed.
        c.on_scroll(600.0, ms(1002));
        assert!(c.is_revealed(1));
    }

    #[test]
    fn test_typing_runs_through_tick() {
        let mut c = controller();
        let mut typed = c.subtitle().unwrap();
        for step in 1..=10 {
            typed.push_str(&c.tick(ms(step * 30)));
        }
        assert_eq!(typed, "Builder");
        assert_eq!(c.subtitle().as_deref(), Some("Builder"));
    }

    #[test]
    fn test_missing_subtitle_is_skipped() {
        let layout = PageLayout {
            hero_subtitle: None,
            ..layout()
        };
        let mut c = PageController::init(layout, MemoryStorage::new(), FakeClipboard::default(), ms(0));
        assert_eq!(c.subtitle(), None);
        assert_eq!(c.tick(ms(100)), "");
    }

    #[test]
    fn test_nav_toggle_and_link_close() {
        let mut c = controller();
        c.toggle_nav();
        assert!(c.state().nav.open);
        c.nav_link_clicked();
        assert!(!c.state().nav.open);
    }

    #[test]
    fn test_anchor_clicks() {
        let c = controller();
        assert_eq!(c.anchor_clicked("#contact"), AnchorAction::ScrollTo { top: 900.0 });
        assert_eq!(c.anchor_clicked("#nowhere"), AnchorAction::Skip);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut c = controller();
        let theme = c.toggle_theme();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(c.state().theme, Theme::Dark);
        assert_eq!(c.storage().get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_email_click_toasts_and_expires() {
        let mut c = controller();
        let id = c.email_clicked("mailto:me@example.com", ms(100)).unwrap();
        assert_eq!(c.clipboard().written, vec!["me@example.com"]);
        assert_eq!(c.toasts().get(id).unwrap().severity, Severity::Success);

        c.tick(ms(5399));
        assert_eq!(c.toasts().len(), 1);
        c.tick(ms(5400));
        assert!(c.toasts().is_empty());
    }

    #[test]
    fn test_email_click_failure() {
        let clipboard = FakeClipboard {
            fail_with: Some(ClipboardError::PermissionDenied),
            ..Default::default()
        };
        let mut c = PageController::init(layout(), MemoryStorage::new(), clipboard, ms(0));
        let id = c.email_clicked("mailto:me@example.com", ms(0)).unwrap();
        let toast = c.toasts().get(id).unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.message, "Failed to copy email");
    }

    #[test]
    fn test_contact_form() {
        let mut c = controller();
        assert_eq!(c.contact_submitted(ms(0)), None);

        let mut form = ContactForm::new();
        form.set("email", "ada@example.com");
        let layout = PageLayout {
            contact_form: Some(form),
            ..layout()
        };
        let mut c = PageController::init(layout, MemoryStorage::new(), FakeClipboard::default(), ms(0));
        let sent = c.contact_submitted(ms(10)).unwrap();
        assert_eq!(sent.get("email").map(String::as_str), Some("ada@example.com"));
        assert_eq!(c.contact_form_mut().unwrap().get("email"), Some(""));
        assert_eq!(c.toasts().len(), 1);
    }
}
