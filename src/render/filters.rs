//! Template filters.
//!
//! ```jinja
//! {{ page.date | dateFormat }}   {# October 18, 2026 #}
//! {{ page.date | dateISO }}      {# 2026-10-18 #}
//!
//! {% for item in collections.all | navigation %}
//!   <a href="{{ item.url }}">{{ item.title }}</a>
//! {% endfor %}
//! {% for item in collections.all | navigationBreadcrumb(page.navigation.key) %}...{% endfor %}
//! ```

use crate::content::{breadcrumb, navigation_tree};
use crate::data::PageData;
use crate::utils::date::{format_iso, format_long, parse_date};
use chrono::NaiveDate;
use minijinja::{Environment, Error, ErrorKind, Value, value::ViaDeserialize};

pub fn register(env: &mut Environment<'static>) {
    env.add_filter("dateFormat", date_format);
    env.add_filter("dateISO", date_iso);
    env.add_filter("navigation", navigation);
    env.add_filter("navigationBreadcrumb", navigation_breadcrumb);
}

/// `2026-10-18` → `October 18, 2026`.
pub fn date_format(value: &str) -> Result<String, Error> {
    to_date(value).map(format_long)
}

/// `2026-10-18T09:00:00Z` → `2026-10-18`.
pub fn date_iso(value: &str) -> Result<String, Error> {
    to_date(value).map(format_iso)
}

/// Menu tree of the pages with a `[navigation]` table, optionally below
/// the page keyed `parent`.
pub fn navigation(pages: ViaDeserialize<Vec<PageData>>, parent: Option<String>) -> Value {
    Value::from_serialize(navigation_tree(&pages.0, parent.as_deref()))
}

/// Ancestors of the page keyed `key`, root first.
pub fn navigation_breadcrumb(
    pages: ViaDeserialize<Vec<PageData>>,
    key: &str,
    include_self: Option<bool>,
) -> Value {
    Value::from_serialize(breadcrumb(&pages.0, key, include_self.unwrap_or(false)))
}

fn to_date(value: &str) -> Result<NaiveDate, Error> {
    if value == "now" {
        return Ok(chrono::Local::now().date_naive());
    }
    parse_date(value).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("`{value}` is not a date (expected YYYY-MM-DD)"),
        )
    })
}
