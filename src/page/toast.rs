//! Notification toasts.
//!
//! A toast created at `t` fades in at `t + 100ms`, stays for the rest of the
//! first five seconds, fades out over 300ms and is gone at `t + 5300ms`.
//! Toasts stack in creation order; there is no queue and no deduplication.

use std::{fmt, time::Duration};

/// Delay before the fade-in starts.
pub const SHOW_DELAY: Duration = Duration::from_millis(100);

/// Time from creation until the fade-out starts.
pub const DISPLAY_TIME: Duration = Duration::from_millis(5000);

/// Length of the fade-out.
pub const FADE_TIME: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub const fn background_color(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Info => "#3b82f6",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// In the page, still transparent.
    Created,
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: Duration,
}

impl Toast {
    pub fn phase(&self, now: Duration) -> ToastPhase {
        let age = now.saturating_sub(self.created_at);
        if age < SHOW_DELAY {
            ToastPhase::Created
        } else if age < DISPLAY_TIME {
            ToastPhase::Visible
        } else if age < DISPLAY_TIME + FADE_TIME {
            ToastPhase::Fading
        } else {
            ToastPhase::Removed
        }
    }

    /// Class list of the toast element.
    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.severity)
    }

    /// Opacity target for the phase; the CSS transition animates between them.
    pub fn opacity(&self, now: Duration) -> f32 {
        match self.phase(now) {
            ToastPhase::Visible => 1.0,
            _ => 0.0,
        }
    }

    pub fn removed_at(&self) -> Duration {
        self.created_at + DISPLAY_TIME + FADE_TIME
    }
}

/// Toasts currently attached to the page, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` at `now`, returning the new toast's id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            message: message.into(),
            severity,
            created_at: now,
        });
        id
    }

    /// Drop toasts whose lifecycle has ended. Returns how many went.
    pub fn prune(&mut self, now: Duration) -> usize {
        let before = self.items.len();
        self.items.retain(|toast| toast.phase(now) != ToastPhase::Removed);
        before - self.items.len()
    }

    /// Toasts still attached at `now`, in creation order.
    pub fn active(&self, now: Duration) -> impl Iterator<Item = &Toast> {
        self.items
            .iter()
            .filter(move |toast| toast.phase(now) != ToastPhase::Removed)
    }

    pub fn get(&self, id: u64) -> Option<&Toast> {
        self.items.iter().find(|toast| toast.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
