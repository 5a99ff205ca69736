//! Template rendering with `minijinja`.
//!
//! # Lookup
//!
//! - Layouts live in the layouts dir (`src/_layouts`) and are selected by
//!   the `layout` front matter key, with or without extension
//!   (`post`, `post.njk`). A layout may itself name a parent layout.
//! - `{% include %}` / `{% extends %}` names resolve against the includes
//!   dir first, then the layouts dir.
//!
//! # Page Flow
//!
//! ```text
//! body ──► render as template ──► Markdown (if .md) ──► layout ──► parent layout ──► html
//! ```
//!
//! All templates auto-escape as HTML; `content` is passed pre-rendered and
//! unescaped.

mod context;
mod filters;

pub use context::{SharedContext, page_value, project_page_value};
pub use filters::{date_format, date_iso};

use crate::config::SiteConfig;
use crate::content::{ContentError, FrontMatter, PageKind, SourcePage, render_markdown};
use crate::data::{Collections, ProjectRecord, SiteData};
use crate::utils::slug::slugify;
use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Layout used for generated project detail pages.
pub const PROJECT_LAYOUT: &str = "project";

/// Longest allowed layout chain.
const MAX_LAYOUT_DEPTH: usize = 16;

/// Registered-name prefix for layout templates.
const LAYOUT_PREFIX: &str = "@layouts/";

/// Template file extensions, in lookup order.
const LAYOUT_EXTENSIONS: &[&str] = &["njk", "html"];

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("failed to render `{name}`")]
    Template {
        name: String,
        #[source]
        source: Error,
    },

    #[error("`{page}` uses layout `{layout}`, which does not exist in the layouts directory")]
    UnknownLayout { page: String, layout: String },

    #[error("layout chain starting at `{0}` is cyclic or too deep")]
    LayoutCycle(String),

    #[error("cannot read layouts directory `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error(transparent)]
    Content(#[from] ContentError),
}

/// A layout template and its parent.
#[derive(Debug, Clone)]
struct Layout {
    template: String,
    parent: Option<String>,
}

/// Rendered output for one file.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub output: PathBuf,
    pub url: String,
    pub html: String,
}

pub struct Renderer<'c> {
    env: Environment<'static>,
    config: &'c SiteConfig,
    layouts: HashMap<String, Layout>,
    shared: SharedContext,
}

impl<'c> Renderer<'c> {
    pub fn new(
        config: &'c SiteConfig,
        data: &SiteData,
        collections: &Collections,
    ) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_loader(template_loader(
            config.build.includes.clone(),
            config.build.layouts.clone(),
        ));
        filters::register(&mut env);

        let layouts = load_layouts(&mut env, &config.build.layouts)?;
        let shared = SharedContext::new(config, data, collections);

        Ok(Self {
            env,
            config,
            layouts,
            shared,
        })
    }

    pub fn has_layout(&self, name: &str) -> bool {
        self.layouts.contains_key(name)
    }

    /// Render a source page to its final HTML.
    pub fn render_page(&self, page: &SourcePage) -> Result<String, RenderError> {
        let page_var = page_value(page);

        let body = self
            .env
            .render_named_str(&page.relative, &page.body, self.shared.with_page(page_var.clone(), None))
            .map_err(|source| RenderError::Template {
                name: page.relative.clone(),
                source,
            })?;

        let mut html = match page.kind {
            PageKind::Markdown => render_markdown(&body, self.config.build.markdown),
            PageKind::Template => body,
        };

        let default_layout = self.config.build.default_layout.as_deref();
        let layout = match (page.front.layout.as_deref(), default_layout) {
            (Some(_), _) => page.front.layout_or(default_layout),
            // The default layout is optional; an explicit one is not.
            (None, Some(default)) if !self.has_layout(default) => None,
            (None, default) => default,
        };

        if let Some(layout) = layout {
            html = self.apply_layouts(layout, &page.relative, |content| {
                self.shared.with_page(page_var.clone(), Some(content))
            }, html)?;
        }
        Ok(html)
    }

    /// Render one detail page per project through the `project` layout.
    ///
    /// Returns an empty list when the site has no `project` layout.
    pub fn render_projects(&self, projects: &[ProjectRecord]) -> Result<Vec<RenderedPage>, RenderError> {
        if !self.has_layout(PROJECT_LAYOUT) {
            return Ok(Vec::new());
        }

        projects
            .iter()
            .map(|project| {
                let output = self
                    .config
                    .build
                    .output
                    .join("projects")
                    .join(slugify(&project.id))
                    .join("index.html");
                let url = self.config.url_for_output(&output);
                let page_var = project_page_value(project, &url);

                let html = self.apply_layouts(
                    PROJECT_LAYOUT,
                    &format!("project `{}`", project.id),
                    |content| self.shared.with_project(page_var.clone(), project, content),
                    String::new(),
                )?;
                Ok(RenderedPage { output, url, html })
            })
            .collect()
    }

    /// Wrap `html` in `layout` and each of its parents.
    fn apply_layouts<F>(
        &self,
        layout: &str,
        page: &str,
        context: F,
        mut html: String,
    ) -> Result<String, RenderError>
    where
        F: Fn(&str) -> std::collections::BTreeMap<String, minijinja::Value>,
    {
        let mut current = Some(layout.to_string());
        let mut depth = 0;

        while let Some(name) = current {
            depth += 1;
            if depth > MAX_LAYOUT_DEPTH {
                return Err(RenderError::LayoutCycle(layout.to_string()));
            }

            let entry = self.layouts.get(&name).ok_or_else(|| RenderError::UnknownLayout {
                page: page.to_string(),
                layout: name.clone(),
            })?;

            let template = self.env.get_template(&entry.template).map_err(|source| {
                RenderError::Template {
                    name: entry.template.clone(),
                    source,
                }
            })?;
            html = template
                .render(context(&html))
                .map_err(|source| RenderError::Template {
                    name: entry.template.clone(),
                    source,
                })?;

            current = entry.parent.clone();
        }
        Ok(html)
    }
}

/// Scan the layouts dir and register every layout template.
///
/// Each layout is reachable by stem and by file name.
fn load_layouts(
    env: &mut Environment<'static>,
    dir: &Path,
) -> Result<HashMap<String, Layout>, RenderError> {
    let mut layouts = HashMap::new();
    if !dir.is_dir() {
        return Ok(layouts);
    }

    let entries = fs::read_dir(dir).map_err(|err| RenderError::Io(dir.to_path_buf(), err))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| LAYOUT_EXTENSIONS.contains(&e))
        })
        .collect();
    // `.njk` before `.html` for the same stem
    paths.sort_by_key(|p| {
        let ext = p.extension().and_then(|e| e.to_str()).unwrap_or_default();
        (
            p.file_stem().map(|s| s.to_os_string()),
            LAYOUT_EXTENSIONS.iter().position(|x| *x == ext),
        )
    });

    for path in paths {
        let source = fs::read_to_string(&path).map_err(|err| ContentError::Io(path.clone(), err))?;
        let (front, body) = FrontMatter::split(&source, &path)?;

        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let stem = path.file_stem().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let template = format!("{LAYOUT_PREFIX}{file_name}");

        env.add_template_owned(template.clone(), body.to_string())
            .map_err(|source| RenderError::Template {
                name: file_name.clone(),
                source,
            })?;

        let layout = Layout {
            template,
            parent: front.layout.filter(|l| !l.is_empty()),
        };
        layouts.entry(stem).or_insert_with(|| layout.clone());
        layouts.insert(file_name, layout);
    }
    Ok(layouts)
}

/// Loader for `include` / `extends` / `import` names.
fn template_loader(
    includes: PathBuf,
    layouts: PathBuf,
) -> impl Fn(&str) -> Result<Option<String>, Error> + Send + Sync + 'static {
    move |name| {
        if name.split('/').any(|part| part == "..") {
            return Ok(None);
        }
        for dir in [&includes, &layouts] {
            let path = dir.join(name);
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(Error::new(
                        ErrorKind::InvalidOperation,
                        format!("cannot read template `{}`", path.display()),
                    )
                    .with_source(err));
                }
            };
            let (_, body) = FrontMatter::split(&source, &path).map_err(|err| {
                Error::new(ErrorKind::SyntaxError, err.to_string())
            })?;
            return Ok(Some(body.to_string()));
        }
        Ok(None)
    }
}
