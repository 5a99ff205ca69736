//! Source content: page discovery, front matter, Markdown.
//!
//! # Build Flow
//!
//! ```text
//! collect_pages() ──► FrontMatter::split() ──► render (templates) ──► render_markdown()
//!       │                                                                  │
//!       ▼                                                                  ▼
//!  SourcePage[]  ──► build_collections()                               HTML body
//! ```

mod collections;
mod front_matter;
mod markdown;
mod navigation;
mod page;

pub use collections::build_collections;
pub use front_matter::FrontMatter;
pub use markdown::render_markdown;
pub use navigation::{NavEntry, breadcrumb, navigation_tree};
pub use page::{PageKind, SourcePage, TEMPLATE_FORMATS, page_kind};

use crate::assets::is_passthrough;
use crate::config::SiteConfig;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid front matter in `{0}`")]
    FrontMatter(PathBuf, #[source] toml::de::Error),

    #[error("front matter in `{0}` is missing its closing `+++`")]
    UnclosedFrontMatter(PathBuf),

    #[error("front matter key `{key}` in `{path}` must be {expected}")]
    InvalidField {
        path: PathBuf,
        key: &'static str,
        expected: &'static str,
    },

    #[error("`{0}` is not a page (expected .md, .njk or .html)")]
    NotAPage(PathBuf),

    #[error("`{0}` is outside the input directory")]
    OutsideInput(PathBuf),

    #[error("permalink `{permalink}` in `{path}` leaves the output directory")]
    PermalinkEscapes { path: PathBuf, permalink: String },
}

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect every page under the input directory, drafts excluded.
///
/// Includes, layouts and data directories hold templates and data, not
/// pages, and are skipped along with hidden entries.
pub fn collect_pages(config: &SiteConfig) -> Result<Vec<SourcePage>, ContentError> {
    let files = page_files(config);
    let pages: Vec<SourcePage> = files
        .par_iter()
        .map(|path| SourcePage::load(path, config))
        .collect::<Result<_, _>>()?;
    Ok(pages.into_iter().filter(|page| !page.is_draft()).collect())
}

/// Paths of candidate page files, sorted.
pub fn page_files(config: &SiteConfig) -> Vec<PathBuf> {
    let build = &config.build;
    let excluded = [&build.includes, &build.layouts, &build.data, &build.output];

    let mut files: Vec<PathBuf> = WalkDir::new(&build.input)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || (!is_hidden(e.path()) && !excluded.iter().any(|dir| e.path() == dir.as_path()))
        })
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .filter(|path| page_kind(path).is_some() && !is_passthrough(path, config))
        .collect();
    files.sort();
    files
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n.starts_with("node_modules"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_pages_skips_non_pages() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "src/index.njk", "home");
        write(root, "src/about.md", "# About");
        write(root, "src/blog/post.md", "+++\ntitle = \"Post\"\n+++\nhi");
        write(root, "src/blog/draft.md", "+++\ndraft = true\n+++\nwip");
        write(root, "src/_includes/header.njk", "<header>");
        write(root, "src/_layouts/base.njk", "{{ content }}");
        write(root, "src/_data/projects.toml", "");
        write(root, "src/css/style.css", "body{}");
        write(root, "src/js/page.html", "<p>asset</p>");
        write(root, "src/.hidden/secret.md", "no");

        let mut config = SiteConfig::default();
        config.resolve_paths(root);

        let pages = collect_pages(&config).unwrap();
        let rel: Vec<&str> = pages.iter().map(|p| p.relative.as_str()).collect();
        assert_eq!(rel, vec!["about.md", "blog/post.md", "index.njk"]);
    }

    #[test]
    fn test_collect_pages_reports_bad_front_matter() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/index.md", "+++\ntitle = \n+++\n");

        let mut config = SiteConfig::default();
        config.resolve_paths(dir.path());

        let err = collect_pages(&config).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter(..)));
    }
}
