//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── SiteData::load()          _data/* → template globals
//!     ├── collect_pages()           src/**/*.{md,njk,html} → SourcePage[]
//!     ├── build_collections()       blog (oldest first), all
//!     │
//!     ├── rayon::join
//!     │     ├── render pages ──► minify ──► write
//!     │     └── copy_passthrough()
//!     │
//!     ├── render_projects()         projects/<id>/index.html (if `project` layout)
//!     ├── build_sitemap()
//!     └── build_feed()
//! ```

use crate::{
    assets::copy_passthrough,
    config::SiteConfig,
    content::{build_collections, collect_pages},
    data::{PageData, SiteData},
    generator::{build_feed, build_sitemap},
    log,
    render::{RenderedPage, Renderer},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub projects: usize,
    pub assets: usize,
}

/// Build the entire site, rendering pages and copying assets in parallel.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;
    let clean = config.build.clean;

    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;

    let data = SiteData::load(&config.build.data)?;
    let pages = collect_pages(config)?;
    let collections = build_collections(&pages, &config.build.blog);
    let renderer = Renderer::new(config, &data, &collections)?;
    let projects = renderer.render_projects(data.projects.all())?;

    check_unique_outputs(
        pages
            .iter()
            .map(|p| (p.output.as_path(), p.relative.as_str()))
            .chain(projects.iter().map(|p| (p.output.as_path(), p.url.as_str()))),
    )?;

    log!("build"; "rendering {} pages", pages.len() + projects.len());

    let (render_result, assets_result) = rayon::join(
        || {
            pages.par_iter().try_for_each(|page| {
                let html = renderer
                    .render_page(page)
                    .with_context(|| format!("failed to build `{}`", page.relative))?;
                write_output(&page.output, &html, config.build.minify)
            })
        },
        || copy_passthrough(config, clean),
    );
    render_result?;
    let assets = assets_result?;

    projects
        .par_iter()
        .try_for_each(|project| write_output(&project.output, &project.html, config.build.minify))?;

    let mut sitemap_pages = collections.all.clone();
    sitemap_pages.extend(projects.iter().map(project_data));
    sitemap_pages.sort_by(|a, b| a.url.cmp(&b.url));
    build_sitemap(config, &sitemap_pages)?;
    let newest_first: Vec<PageData> = collections.blog.iter().rev().cloned().collect();
    build_feed(config, &newest_first)?;

    let report = BuildReport {
        pages: pages.len(),
        projects: projects.len(),
        assets,
    };
    log_build_result(&report);
    Ok(report)
}

/// Minify (when enabled) and write one output file.
fn write_output(path: &Path, content: &str, minify_enabled: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = match MinifyType::for_path(path) {
        Some(kind) => minify(kind, content.as_bytes(), minify_enabled),
        None => content.as_bytes().into(),
    };
    fs::write(path, &*bytes).with_context(|| format!("failed to write {}", path.display()))
}

/// Two sources must never write the same output file.
fn check_unique_outputs<'a>(outputs: impl Iterator<Item = (&'a Path, &'a str)>) -> Result<()> {
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();
    for (output, source) in outputs {
        if let Some(previous) = seen.insert(output.to_path_buf(), source) {
            bail!(
                "`{previous}` and `{source}` both write to `{}`",
                output.display()
            );
        }
    }
    Ok(())
}

fn project_data(page: &RenderedPage) -> PageData {
    PageData {
        url: page.url.clone(),
        title: String::new(),
        description: None,
        date: None,
        tags: Vec::new(),
        navigation: None,
    }
}

fn log_build_result(report: &BuildReport) {
    if report.pages == 0 {
        log!("warn"; "no pages found, check [build.input]");
    } else {
        log!(
            "build";
            "done: {} pages, {} project pages, {} assets copied",
            report.pages,
            report.projects,
            report.assets
        );
    }
}
