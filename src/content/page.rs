//! Source pages and their output locations.
//!
//! # Path Mapping
//!
//! | Source | Output | URL |
//! |--------|--------|-----|
//! | `src/index.njk` | `_site/index.html` | `/` |
//! | `src/about.md` | `_site/about/index.html` | `/about/` |
//! | `src/blog/index.html` | `_site/blog/index.html` | `/blog/` |
//! | `src/blog/My Post.md` | `_site/blog/my-post/index.html` | `/blog/my-post/` |
//! | `permalink = "/feed.json"` | `_site/feed.json` | `/feed.json` |

use super::{ContentError, FrontMatter};
use crate::config::SiteConfig;
use crate::data::PageData;
use crate::utils::date::format_iso;
use crate::utils::slug::slugify_path;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Template formats that produce pages.
pub const TEMPLATE_FORMATS: &[&str] = &["md", "njk", "html"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Rendered as a template, then as Markdown.
    Markdown,
    /// `.njk` / `.html`, rendered as a template only.
    Template,
}

/// A page read from the input tree.
#[derive(Debug, Clone)]
pub struct SourcePage {
    pub source: PathBuf,
    /// Path relative to the input dir, with `/` separators.
    pub relative: String,
    pub kind: PageKind,
    pub front: FrontMatter,
    pub body: String,
    /// Output file path.
    pub output: PathBuf,
    /// URL path, e.g. `/about/`.
    pub url: String,
}

impl SourcePage {
    pub fn load(source: &Path, config: &SiteConfig) -> Result<Self, ContentError> {
        let text = fs::read_to_string(source)
            .map_err(|err| ContentError::Io(source.to_path_buf(), err))?;
        Self::from_source(source, &text, config)
    }

    /// Build a page from already-read text.
    pub fn from_source(source: &Path, text: &str, config: &SiteConfig) -> Result<Self, ContentError> {
        let kind = page_kind(source).ok_or_else(|| ContentError::NotAPage(source.to_path_buf()))?;
        let (front, body) = FrontMatter::split(text, source)?;

        let relative_path = source
            .strip_prefix(&config.build.input)
            .map_err(|_| ContentError::OutsideInput(source.to_path_buf()))?;
        let relative = relative_path.to_string_lossy().replace('\\', "/");

        let output = match front.permalink.as_deref() {
            Some(permalink) => permalink_output(permalink, &config.build.output).ok_or_else(|| {
                ContentError::PermalinkEscapes {
                    path: source.to_path_buf(),
                    permalink: permalink.to_string(),
                }
            })?,
            None => default_output(relative_path, &config.build.output),
        };
        let url = config.url_for_output(&output);

        Ok(Self {
            source: source.to_path_buf(),
            relative,
            kind,
            front,
            body: body.to_string(),
            output,
            url,
        })
    }

    /// Title from front matter, else the file stem.
    pub fn title(&self) -> String {
        self.front.title.clone().unwrap_or_else(|| {
            self.source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    pub fn is_draft(&self) -> bool {
        self.front.draft
    }

    /// Summary for collections, sitemap and feed.
    pub fn to_data(&self) -> PageData {
        PageData {
            url: self.url.clone(),
            title: self.title(),
            description: self.front.description.clone(),
            date: self.front.date.map(format_iso),
            tags: self.front.tags.clone(),
            navigation: self.front.navigation.clone(),
        }
    }
}

/// Page kind for a file, or `None` if it is not a template format.
pub fn page_kind(path: &Path) -> Option<PageKind> {
    match path.extension()?.to_str()? {
        "md" => Some(PageKind::Markdown),
        ext if TEMPLATE_FORMATS.contains(&ext) => Some(PageKind::Template),
        _ => None,
    }
}

/// `about.md` → `about/index.html`; `index.*` stays `index.html` in place.
fn default_output(relative: &Path, output_dir: &Path) -> PathBuf {
    let parent = relative.parent().map(slugify_path).unwrap_or_default();
    let is_index = relative.file_stem().is_some_and(|stem| stem == "index");

    if is_index {
        output_dir.join(parent).join("index.html")
    } else {
        let stem = relative
            .file_stem()
            .map(|s| slugify_path(Path::new(s)))
            .unwrap_or_default();
        output_dir.join(parent).join(stem).join("index.html")
    }
}

/// Explicit permalink: a trailing `/` or no extension means a directory.
///
/// `None` when the permalink has a `..` component.
fn permalink_output(permalink: &str, output_dir: &Path) -> Option<PathBuf> {
    let trimmed = permalink.trim().trim_start_matches('/');
    let relative = Path::new(trimmed);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let path = output_dir.join(relative);
    if trimmed.is_empty() || trimmed.ends_with('/') || relative.extension().is_none() {
        Some(path.join("index.html"))
    } else {
        Some(path)
    }
}
