//! `[build]` section configuration.
//!
//! Source layout, passthrough copies, Markdown options and generated files.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - build pipeline configuration.
///
/// `includes`, `layouts`, `data` and `blog` are relative to `input`;
/// everything else is relative to the project root.
///
/// # Example
/// ```toml
/// [build]
/// input = "src"
/// output = "_site"
/// passthrough = ["src/assets", "src/css", "CNAME"]
/// default_layout = "post"
///
/// [build.markdown]
/// html = true
/// breaks = true
/// linkify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Source directory holding pages, layouts and data.
    #[serde(default = "defaults::build::input")]
    #[educe(Default = defaults::build::input())]
    pub input: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Partials available to `{% include %}`.
    #[serde(default = "defaults::build::includes")]
    #[educe(Default = defaults::build::includes())]
    pub includes: PathBuf,

    /// Layout templates referenced by a page's `layout` key.
    #[serde(default = "defaults::build::layouts")]
    #[educe(Default = defaults::build::layouts())]
    pub layouts: PathBuf,

    /// Global data files (`*.toml`, `*.json`).
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Directory of blog posts, collected into `collections.blog`.
    #[serde(default = "defaults::build::blog")]
    #[educe(Default = defaults::build::blog())]
    pub blog: PathBuf,

    /// Layout applied to pages that do not name one.
    #[serde(default = "defaults::build::default_layout")]
    #[educe(Default = defaults::build::default_layout())]
    pub default_layout: Option<String>,

    /// Files and directories copied verbatim into the output.
    #[serde(default = "defaults::build::passthrough")]
    #[educe(Default = defaults::build::passthrough())]
    pub passthrough: Vec<PathBuf>,

    /// Extra paths that trigger a rebuild in `serve` mode.
    #[serde(default = "defaults::build::watch_targets")]
    #[educe(Default = defaults::build::watch_targets())]
    pub watch_targets: Vec<PathBuf>,

    /// Minify HTML output.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,

    #[serde(default)]
    pub feed: FeedConfig,
}

// ============================================================================
// Sub-sections
// ============================================================================

/// `[build.markdown]` - Markdown rendering options.
#[derive(Debug, Clone, Copy, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Pass raw HTML through; when off it is escaped.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub html: bool,

    /// Turn single newlines into `<br />`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub breaks: bool,

    /// Turn bare URLs into links.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub linkify: bool,
}

/// `[build.sitemap]` - sitemap generation.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.feed]` - RSS feed of the blog collection.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::feed::path")]
    #[educe(Default = defaults::build::feed::path())]
    pub path: PathBuf,
}
