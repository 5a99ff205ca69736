//! Site menu built from `[navigation]` front matter.
//!
//! Pages opt in with a `key`; a `parent` names another page's key. Siblings
//! are ordered by `order`, then by their position in the page list.
//!
//! ```text
//! Home (order 1)
//! About (order 2)
//! ├── Uses
//! └── CV
//! Blog (order 3)
//! ```

use crate::data::PageData;
use serde::Serialize;
use std::collections::HashSet;

/// One menu entry with its nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub key: String,
    pub title: String,
    pub url: String,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    fn new(page: &PageData) -> Option<Self> {
        let nav = page.navigation.as_ref()?;
        Some(Self {
            key: nav.key.clone(),
            title: nav.title.clone().unwrap_or_else(|| nav.key.clone()),
            url: nav.url.clone().unwrap_or_else(|| page.url.clone()),
            order: nav.order,
            parent: nav.parent.clone(),
            excerpt: nav.excerpt.clone(),
            children: Vec::new(),
        })
    }
}

/// Menu tree below `parent`, or the top level when `parent` is `None`.
///
/// A key reached twice on one branch is not expanded again.
pub fn navigation_tree(pages: &[PageData], parent: Option<&str>) -> Vec<NavEntry> {
    let mut branch = HashSet::new();
    if let Some(parent) = parent {
        branch.insert(parent.to_string());
    }
    children_of(pages, parent, &mut branch)
}

fn children_of(
    pages: &[PageData],
    parent: Option<&str>,
    branch: &mut HashSet<String>,
) -> Vec<NavEntry> {
    let mut entries: Vec<NavEntry> = pages
        .iter()
        .filter_map(NavEntry::new)
        .filter(|entry| entry.parent.as_deref() == parent)
        .collect();
    entries.sort_by_key(|entry| entry.order);

    for entry in &mut entries {
        if branch.insert(entry.key.clone()) {
            entry.children = children_of(pages, Some(entry.key.as_str()), branch);
            branch.remove(&entry.key);
        }
    }
    entries
}

/// Ancestors of `key`, root first, ending with `key` itself when
/// `include_self` is set. Empty when no page has that key.
pub fn breadcrumb(pages: &[PageData], key: &str, include_self: bool) -> Vec<NavEntry> {
    let find = |key: &str| {
        pages
            .iter()
            .filter_map(NavEntry::new)
            .find(|entry| entry.key == key)
    };

    let mut trail = Vec::new();
    let mut seen = HashSet::new();
    let mut next = find(key);
    while let Some(entry) = next {
        if !seen.insert(entry.key.clone()) {
            break;
        }
        next = entry.parent.as_deref().and_then(find);
        trail.push(entry);
    }

    if !include_self && !trail.is_empty() {
        trail.remove(0);
    }
    trail.reverse();
    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NavigationMeta;

    fn page(url: &str, key: &str, parent: Option<&str>, order: i64) -> PageData {
        PageData {
            url: url.into(),
            title: key.into(),
            description: None,
            date: None,
            tags: vec![],
            navigation: Some(NavigationMeta {
                key: key.into(),
                parent: parent.map(String::from),
                order,
                ..NavigationMeta::default()
            }),
        }
    }

    fn site() -> Vec<PageData> {
        let mut plain = page("/404.html", "", None, 0);
        plain.navigation = None;
        vec![
            page("/blog/", "Blog", None, 3),
            page("/about/cv/", "CV", Some("About"), 2),
            page("/", "Home", None, 1),
            plain,
            page("/about/uses/", "Uses", Some("About"), 1),
            page("/about/", "About", None, 2),
        ]
    }

    fn keys(entries: &[NavEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_top_level_ordered() {
        let tree = navigation_tree(&site(), None);
        assert_eq!(keys(&tree), vec!["Home", "About", "Blog"]);
        assert_eq!(tree[1].url, "/about/");
    }

    #[test]
    fn test_children_nested_under_parent() {
        let tree = navigation_tree(&site(), None);
        assert_eq!(keys(&tree[1].children), vec!["Uses", "CV"]);
        assert!(tree[0].children.is_empty());

        let about = navigation_tree(&site(), Some("About"));
        assert_eq!(keys(&about), vec!["Uses", "CV"]);
    }

    #[test]
    fn test_equal_order_keeps_page_order() {
        let pages = vec![
            page("/b/", "B", None, 0),
            page("/a/", "A", None, 0),
            page("/c/", "C", None, -1),
        ];
        assert_eq!(keys(&navigation_tree(&pages, None)), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_title_and_url_overrides() {
        let mut pages = site();
        if let Some(nav) = pages[0].navigation.as_mut() {
            nav.title = Some("Writing".into());
            nav.url = Some("/blog/archive/".into());
        }
        let tree = navigation_tree(&pages, None);
        assert_eq!(tree[2].title, "Writing");
        assert_eq!(tree[2].url, "/blog/archive/");
        assert_eq!(tree[0].title, "Home");
    }

    #[test]
    fn test_cycle_does_not_recurse_forever() {
        let pages = vec![page("/a/", "A", Some("B"), 0), page("/b/", "B", Some("A"), 0)];
        let tree = navigation_tree(&pages, Some("A"));
        assert_eq!(keys(&tree), vec!["B"]);
        assert_eq!(keys(&tree[0].children), vec!["A"]);
        assert!(tree[0].children[0].children.is_empty());
        assert!(navigation_tree(&pages, None).is_empty());
    }

    #[test]
    fn test_breadcrumb() {
        let pages = site();
        assert_eq!(keys(&breadcrumb(&pages, "CV", false)), vec!["About"]);
        assert_eq!(keys(&breadcrumb(&pages, "CV", true)), vec!["About", "CV"]);
        assert!(breadcrumb(&pages, "Home", false).is_empty());
        assert!(breadcrumb(&pages, "Missing", true).is_empty());
    }
}
