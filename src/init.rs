//! Site initialization module.
//!
//! Scaffolds a portfolio site: config, layouts, a home page, one blog post,
//! a project data file and a stylesheet.

use crate::{config::SiteConfig, log, utils::date::format_iso};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

const CONFIG_TEMPLATE: &str = include_str!("embed/init/folio.toml");
const BASE_LAYOUT: &str = include_str!("embed/init/base.njk");
const POST_LAYOUT: &str = include_str!("embed/init/post.njk");
const PROJECT_LAYOUT: &str = include_str!("embed/init/project.njk");
const HEADER_INCLUDE: &str = include_str!("embed/init/header.njk");
const INDEX_PAGE: &str = include_str!("embed/init/index.njk");
const SAMPLE_POST: &str = include_str!("embed/init/hello.md");
const PROJECTS_DATA: &str = include_str!("embed/init/projects.toml");
const STYLESHEET: &str = include_str!("embed/init/style.css");
const ROBOTS: &str = include_str!("embed/init/robots.txt");

/// Create a new site at the configured root.
///
/// Without a name (init in the current directory) the directory must be
/// completely empty.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    let files = scaffold(config);
    if let Some((existing, _)) = files.iter().find(|(path, _)| path.exists()) {
        bail!(
            "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
            existing.display()
        );
    }

    for (path, content) in &files {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let output = relative(&config.build.output, root);
    init_ignored_files(root, &[output.as_path()])?;

    log!("init"; "created site in {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Every scaffold file with its destination under the configured layout.
fn scaffold(config: &SiteConfig) -> Vec<(PathBuf, String)> {
    let root = config.get_root();
    let build = &config.build;

    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("My Portfolio");
    let input = relative(&build.input, root);
    let input = input.to_string_lossy().replace('\\', "/");
    let output = relative(&build.output, root);
    let output = output.to_string_lossy().replace('\\', "/");
    let today = format_iso(chrono::Local::now().date_naive());

    let config_text = CONFIG_TEMPLATE
        .replace("{name}", name)
        .replace("\"src", &format!("\"{input}"))
        .replace("\"_site\"", &format!("\"{output}\""));

    vec![
        (config.config_path.clone(), config_text),
        (build.layouts.join("base.njk"), BASE_LAYOUT.into()),
        (build.layouts.join("post.njk"), POST_LAYOUT.into()),
        (build.layouts.join("project.njk"), PROJECT_LAYOUT.into()),
        (build.includes.join("header.njk"), HEADER_INCLUDE.into()),
        (build.input.join("index.njk"), INDEX_PAGE.into()),
        (build.blog.join("hello.md"), SAMPLE_POST.replace("{date}", &today)),
        (build.data.join("projects.toml"), PROJECTS_DATA.into()),
        (build.input.join("css/style.css"), STYLESHEET.into()),
        (root.join("robots.txt"), ROBOTS.into()),
    ]
}

fn relative(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Initialize .gitignore and .ignore files with specified paths
pub fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, format!("{content}\n"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::build_site, cli::Cli};
    use clap::Parser;
    use tempfile::TempDir;

    fn init_config(dir: &Path, name: Option<&str>) -> SiteConfig {
        let root = dir.to_string_lossy().into_owned();
        let mut args = vec!["folio", "--root", &root, "init"];
        args.extend(name);
        SiteConfig::load(&Cli::parse_from(args)).unwrap()
    }

    #[test]
    fn test_new_site_scaffold_builds() {
        let dir = TempDir::new().unwrap();
        let config = init_config(dir.path(), Some("jane"));
        new_site(&config, true).unwrap();

        let root = dir.path().join("jane");
        assert!(root.join("folio.toml").is_file());
        assert!(root.join("src/_layouts/base.njk").is_file());
        assert!(root.join("src/_includes/header.njk").is_file());
        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "_site\n");

        let mut site = SiteConfig::from_path(&root.join("folio.toml")).unwrap();
        assert_eq!(site.base.title, "jane");
        site.resolve_paths(&root);
        site.validate().unwrap();

        let report = build_site(&site).unwrap();
        assert_eq!(report.pages, 2);
        assert_eq!(report.projects, 1);

        let out = &site.build.output;
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("First Project"));
        assert!(index.contains("Hello, world"));
        assert!(out.join("blog/hello/index.html").is_file());
        assert!(out.join("projects/first-project/index.html").is_file());
        assert!(out.join("css/style.css").is_file());
        assert!(out.join("robots.txt").is_file());
    }

    #[test]
    fn test_new_site_requires_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let config = init_config(dir.path(), None);
        assert!(new_site(&config, false).is_err());
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("folio.toml"), "").unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["folio", "--root", &root, "init"]);
        assert!(SiteConfig::load(&cli).is_err());
    }

    #[test]
    fn test_init_ignored_files_keeps_existing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "target\n").unwrap();
        init_ignored_files(dir.path(), &[Path::new("_site")]).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join(".gitignore")).unwrap(), "target\n");
        assert_eq!(fs::read_to_string(dir.path().join(".ignore")).unwrap(), "_site\n");
    }
}
