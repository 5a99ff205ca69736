//! Copy e-mail addresses to the clipboard instead of opening a mail client.

use super::toast::{Severity, Toasts};
use std::time::Duration;
use thiserror::Error;

pub const COPY_SUCCESS: &str = "Email copied to clipboard!";
pub const COPY_FAILURE: &str = "Failed to copy email";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard permission denied")]
    PermissionDenied,

    #[error("clipboard not available in this context")]
    Unsupported,
}

/// System clipboard as seen by the page.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The address behind a `mailto:` href, or `None` for other links.
pub fn email_from_href(href: &str) -> Option<&str> {
    href.strip_prefix("mailto:")
}

/// Copy the address of a clicked `mailto:` link and report the outcome.
///
/// Returns `None` when `href` is not a mail link (the click is not
/// intercepted), otherwise the id of the toast shown.
pub fn copy_email(
    clipboard: &mut impl Clipboard,
    href: &str,
    toasts: &mut Toasts,
    now: Duration,
) -> Option<u64> {
    let email = email_from_href(href)?;
    let id = match clipboard.write_text(email) {
        Ok(()) => toasts.push(COPY_SUCCESS, Severity::Success, now),
        Err(_) => toasts.push(COPY_FAILURE, Severity::Error, now),
    };
    Some(id)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records writes, or fails every write with the given error.
    #[derive(Debug, Default)]
    pub(crate) struct FakeClipboard {
        pub written: Vec<String>,
        pub fail_with: Option<ClipboardError>,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => {
                    self.written.push(text.to_owned());
                    Ok(())
                }
            }
        }
    }

    #[test]
    fn test_email_from_href() {
        assert_eq!(email_from_href("mailto:me@example.com"), Some("me@example.com"));
        assert_eq!(email_from_href("https://example.com"), None);
    }

    #[test]
    fn test_copy_success_shows_success_toast() {
        let mut clipboard = FakeClipboard::default();
        let mut toasts = Toasts::new();

        let id = copy_email(&mut clipboard, "mailto:me@example.com", &mut toasts, Duration::ZERO)
            .unwrap();

        assert_eq!(clipboard.written, vec!["me@example.com"]);
        let toast = toasts.get(id).unwrap();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.message, "Email copied to clipboard!");
    }

    #[test]
    fn test_copy_failure_shows_error_toast() {
        for err in [ClipboardError::PermissionDenied, ClipboardError::Unsupported] {
            let mut clipboard = FakeClipboard {
                fail_with: Some(err),
                ..Default::default()
            };
            let mut toasts = Toasts::new();

            let id = copy_email(&mut clipboard, "mailto:me@example.com", &mut toasts, Duration::ZERO)
                .unwrap();

            let toast = toasts.get(id).unwrap();
            assert_eq!(toast.severity, Severity::Error);
            assert_eq!(toast.message, "Failed to copy email");
            assert!(clipboard.written.is_empty());
        }
    }

    #[test]
    fn test_non_mail_link_is_ignored() {
        let mut clipboard = FakeClipboard::default();
        let mut toasts = Toasts::new();
        assert_eq!(copy_email(&mut clipboard, "#contact", &mut toasts, Duration::ZERO), None);
        assert!(toasts.is_empty());
    }
}
