//! Contact form stub: submission is acknowledged locally, nothing is sent.

use super::toast::{Severity, Toasts};
use std::{collections::BTreeMap, time::Duration};

pub const SUBMIT_SUCCESS: &str = "Message sent successfully! I'll get back to you soon.";

/// Field values of the `#contact-form` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: BTreeMap<String, String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_owned(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }

    /// Clear every field, keeping the field names.
    pub fn reset(&mut self) {
        self.fields.values_mut().for_each(String::clear);
    }
}

/// Handle a submit: take the field values, show the success toast, reset.
///
/// Returns the submitted values.
pub fn submit_contact_form(
    form: &mut ContactForm,
    toasts: &mut Toasts,
    now: Duration,
) -> BTreeMap<String, String> {
    let submitted = form.fields.clone();
    toasts.push(SUBMIT_SUCCESS, Severity::Success, now);
    form.reset();
    submitted
}
