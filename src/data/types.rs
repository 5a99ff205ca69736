//! Data types exposed to templates.

use serde::{Deserialize, Serialize};

/// Summary of a rendered page, as listed in `collections.*`.
///
/// Also read back from template values by the navigation filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    /// Page URL path (e.g., "/blog/hello-world/")
    pub url: String,

    /// Page title (from front matter, else the file stem)
    pub title: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date as ISO 8601 string (e.g., "2026-01-15")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Tags associated with this page
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Placement in the site menu, from the `[navigation]` front matter table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationMeta>,
}

/// A page's `[navigation]` front matter table.
///
/// ```toml
/// [navigation]
/// key = "Rust notes"
/// parent = "Blog"
/// order = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationMeta {
    /// Unique name other pages use as their `parent`.
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Sort position among siblings; ties keep collection order.
    #[serde(default)]
    pub order: i64,

    /// Menu label, defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Link target, defaults to the page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Named page lists, exposed as `collections`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Collections {
    /// Blog posts, oldest first.
    pub blog: Vec<PageData>,

    /// Every rendered page, in URL order.
    pub all: Vec<PageData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_data_skips_empty_fields() {
        let page = PageData {
            url: "/about/".into(),
            title: "About".into(),
            description: None,
            date: None,
            tags: vec![],
            navigation: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({ "url": "/about/", "title": "About" }));
    }

    #[test]
    fn test_page_data_with_date() {
        let page = PageData {
            url: "/blog/hello/".into(),
            title: "Hello".into(),
            description: Some("First post".into()),
            date: Some("2026-01-15".into()),
            tags: vec!["rust".into()],
            navigation: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["date"], "2026-01-15");
        assert_eq!(json["tags"][0], "rust");
    }

    #[test]
    fn test_page_data_reads_back_with_navigation() {
        let json = serde_json::json!({
            "url": "/uses/",
            "title": "Uses",
            "navigation": { "key": "Uses", "parent": "About", "order": 3 },
        });
        let page: PageData = serde_json::from_value(json).unwrap();
        let nav = page.navigation.unwrap();
        assert_eq!(nav.key, "Uses");
        assert_eq!(nav.parent.as_deref(), Some("About"));
        assert_eq!(nav.order, 3);
        assert!(page.tags.is_empty());
    }
}
