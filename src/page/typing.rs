//! Typing animation for the hero subtitle.
//!
//! The target text is cleared on start and retyped one character at a time:
//! the first character right away, then one per `speed` tick. The cursor only
//! moves forward (`0 → len → done`); starting twice is a no-op and there is no
//! way to cancel a run.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: Vec<char>,
    speed: Duration,
    started_at: Option<Duration>,
    /// Characters appended so far.
    cursor: usize,
}

impl Typewriter {
    pub fn new(text: &str, speed: Duration) -> Self {
        Self {
            text: text.chars().collect(),
            speed,
            started_at: None,
            cursor: 0,
        }
    }

    /// Begin typing at `now`. Returns `false` if already started.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        self.cursor = 0;
        self.tick(now);
        true
    }

    /// Advance to `now`, returning the characters appended by this call.
    pub fn tick(&mut self, now: Duration) -> String {
        let Some(started_at) = self.started_at else {
            return String::new();
        };
        if self.text.is_empty() || now < started_at {
            return String::new();
        }

        let ticks = if self.speed.is_zero() {
            self.text.len()
        } else {
            usize::try_from((now - started_at).as_nanos() / self.speed.as_nanos())
                .unwrap_or(usize::MAX)
        };
        let target = ticks.saturating_add(1).min(self.text.len());
        if target <= self.cursor {
            return String::new();
        }

        let appended: String = self.text[self.cursor..target].iter().collect();
        self.cursor = target;
        appended
    }

    /// Text currently shown in the element.
    pub fn output(&self) -> String {
        self.text[..self.cursor].iter().collect()
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.is_started() && self.cursor == self.text.len()
    }

    /// Page time at which the last character lands.
    pub fn finishes_at(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        let steps = u32::try_from(self.text.len().saturating_sub(1)).unwrap_or(u32::MAX);
        Some(started_at + self.speed * steps)
    }
}
