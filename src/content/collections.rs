//! Named page collections exposed to templates.

use super::SourcePage;
use crate::data::{Collections, PageData};
use std::path::Path;

/// Build `collections` from the published pages.
///
/// `blog` holds Markdown pages directly inside `blog_dir`, oldest first.
/// Undated posts follow the dated ones; ties go by input path. `all`
/// holds every page by URL.
pub fn build_collections(pages: &[SourcePage], blog_dir: &Path) -> Collections {
    let mut blog: Vec<&SourcePage> = pages
        .iter()
        .filter(|page| is_blog_post(page, blog_dir))
        .collect();
    blog.sort_by(|a, b| {
        let key = |page: &SourcePage| (page.front.date.is_none(), page.front.date);
        key(a)
            .cmp(&key(b))
            .then_with(|| a.relative.cmp(&b.relative))
    });

    let mut all: Vec<PageData> = pages.iter().map(SourcePage::to_data).collect();
    all.sort_by(|a, b| a.url.cmp(&b.url));

    Collections {
        blog: blog.into_iter().map(SourcePage::to_data).collect(),
        all,
    }
}

fn is_blog_post(page: &SourcePage, blog_dir: &Path) -> bool {
    page.source.parent() == Some(blog_dir) && page.source.extension().is_some_and(|e| e == "md")
}
