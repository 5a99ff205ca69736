//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[base]`    | Site metadata (title, author, email, url)         |
//! | `[build]`   | Source layout, passthrough, markdown, sitemap     |
//! | `[serve]`   | Development server (port, interface, watch)       |
//! | `[extra]`   | User-defined fields, exposed to templates         |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Jane Doe"
//! url = "https://janedoe.github.io"
//!
//! [build]
//! input = "src"
//! output = "_site"
//!
//! [build.feed]
//! enable = true
//!
//! [serve]
//! port = 8080
//!
//! [extra]
//! github = "janedoe"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod serve;

pub use base::BaseConfig;
pub use build::{BuildConfig, FeedConfig, MarkdownConfig, SitemapConfig};
pub use error::ConfigError;
pub use serve::ServeConfig;

use crate::cli::{BuildArgs, Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "folio.toml";

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Update configuration with CLI arguments, then resolve all paths.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => cli
                .root
                .clone()
                .unwrap_or_else(|| self.get_root().to_owned())
                .join(name),
            _ => cli
                .root
                .clone()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };

        Self::update_option(&mut self.build.input, cli.input.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => self.update_with_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
                watch,
            } => {
                self.update_with_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
                if build_args.base_url.is_none() {
                    self.base.url = Some(self.serve.preview_url());
                }
            }
            Commands::Init { .. } => {}
        }

        self.config_path = root.join(&cli.config);
        self.resolve_paths(&root);
    }

    /// Load, apply CLI overrides, and validate.
    ///
    /// `init` requires the config to be absent; every other command requires
    /// it to exist.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = match &cli.command {
            Commands::Init { name: Some(name) } => root.join(name).join(&cli.config),
            _ => root.join(&cli.config),
        };

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);

        match (cli.is_init(), config.config_path.is_file()) {
            (true, true) => bail!(ConfigError::Validation(format!(
                "`{}` already exists; remove it or init in a different path",
                config.config_path.display()
            ))),
            (false, false) => bail!(ConfigError::MissingPath {
                field: "config file",
                path: config.config_path.clone(),
            }),
            (true, false) => {}
            (false, true) => config.validate()?,
        }

        Ok(config)
    }

    fn update_with_build_args(&mut self, args: &BuildArgs) {
        self.build.clean |= args.clean;
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());
        Self::update_option(&mut self.build.feed.enable, args.feed.as_ref());
        if let Some(url) = &args.base_url {
            self.base.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make every configured path absolute.
    ///
    /// `includes`, `layouts`, `data` and `blog` hang off the input
    /// directory; sitemap and feed paths off the output directory.
    pub fn resolve_paths(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);
        if self.config_path.as_os_str().is_empty() {
            self.config_path = root.join(CONFIG_FILE);
        }
        self.config_path = Self::normalize_path(&root.join(&self.config_path));

        let build = &mut self.build;
        build.input = Self::normalize_path(&root.join(&build.input));
        build.output = Self::normalize_path(&root.join(&build.output));
        build.includes = build.input.join(&build.includes);
        build.layouts = build.input.join(&build.layouts);
        build.data = build.input.join(&build.data);
        build.blog = build.input.join(&build.blog);
        build.sitemap.path = build.output.join(&build.sitemap.path);
        build.feed.path = build.output.join(&build.feed.path);

        for path in build.passthrough.iter_mut().chain(build.watch_targets.iter_mut()) {
            *path = Self::normalize_path(&root.join(&*path));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Check that the resolved configuration can be built.
    pub fn validate(&self) -> Result<()> {
        if !self.build.input.is_dir() {
            bail!(ConfigError::MissingPath {
                field: "[build.input]",
                path: self.build.input.clone(),
            });
        }

        if self.build.output == self.build.input || self.build.input.starts_with(&self.build.output) {
            bail!(ConfigError::Validation(
                "[build.output] must not contain [build.input]".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.build.feed.enable && self.base.url.is_none() {
            bail!(ConfigError::Validation(
                "[base.url] is required for feed generation".into()
            ));
        }

        Ok(())
    }

    /// Output-relative URL path for an absolute output file path.
    ///
    /// `/site/_site/about/index.html` → `/about/`
    pub fn url_for_output(&self, output_file: &Path) -> String {
        let rel = output_file
            .strip_prefix(&self.build.output)
            .unwrap_or(output_file);
        let rel = rel.to_string_lossy().replace('\\', "/");
        let rel = rel.strip_suffix("index.html").unwrap_or(&rel);
        format!("/{}", rel.trim_start_matches('/'))
    }
}

// ============================================================================
// Tests
// ============================================================================
