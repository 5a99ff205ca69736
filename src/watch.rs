//! File system watcher for live rebuilds.
//!
//! Monitors the input directory, extra watch targets, passthrough entries
//! and the config file, and rebuilds into the output directory the server
//! is serving.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Event Loop                              │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  Config  → reload +    │  │
//! │                                  │            full build  │  │
//! │                                  │  Source  → full build  │  │
//! │                                  │  Passthrough → copy    │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::{
    assets::{copy_changed, is_passthrough},
    build::build_site,
    cli::Cli,
    config::SiteConfig,
    log,
    logger::WatchStatus,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// What a changed path asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    /// The config file: reload, then rebuild everything.
    Config,
    /// A passthrough file: copy it again.
    Passthrough,
    /// A page, layout, include, data file or watch target: rebuild.
    Source,
    /// Build output or anything unrelated.
    Ignored,
}

fn categorize(path: &Path, config: &SiteConfig) -> ChangeKind {
    let build = &config.build;
    if path == config.config_path {
        ChangeKind::Config
    } else if path.starts_with(&build.output) {
        ChangeKind::Ignored
    } else if is_passthrough(path, config) {
        ChangeKind::Passthrough
    } else if path.starts_with(&build.input)
        || build.watch_targets.iter().any(|target| path.starts_with(target))
    {
        ChangeKind::Source
    } else {
        ChangeKind::Ignored
    }
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// `a.md` or `a.md (+2 more)`.
fn describe(paths: &[&PathBuf], root: &Path) -> String {
    match paths {
        [] => String::new(),
        [only] => rel_path(only, root),
        [first, rest @ ..] => format!("{} (+{} more)", rel_path(first, root), rest.len()),
    }
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: HashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: HashSet::new(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<PathBuf> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Full rebuild. Returns true on success (for cooldown tracking).
fn rebuild(config: &SiteConfig, trigger: &str, status: &mut WatchStatus) -> bool {
    match build_site(config) {
        Ok(report) => {
            status.success(&format!(
                "{trigger}: rebuilt {} pages",
                report.pages + report.projects
            ));
            true
        }
        Err(e) => {
            status.error(&format!("{trigger}: build failed"), &format!("{e:#}"));
            false
        }
    }
}

/// Process one debounced batch. Returns true if a full rebuild succeeded.
fn handle_changes(
    paths: &[PathBuf],
    cli: &Cli,
    config: &mut SiteConfig,
    status: &mut WatchStatus,
) -> bool {
    let mut config_changed = false;
    let mut sources: Vec<&PathBuf> = Vec::new();
    let mut copies: Vec<&PathBuf> = Vec::new();

    for path in paths {
        match categorize(path, config) {
            ChangeKind::Config => config_changed = true,
            ChangeKind::Source => sources.push(path),
            ChangeKind::Passthrough => copies.push(path),
            ChangeKind::Ignored => {}
        }
    }

    if config_changed {
        return match SiteConfig::load(cli) {
            Ok(reloaded) => {
                if reloaded.build.output != config.build.output {
                    log!(
                        "watch";
                        "[build.output] changed, restart the server to serve {}",
                        reloaded.build.output.display()
                    );
                }
                *config = reloaded;
                rebuild(config, "config changed", status)
            }
            Err(e) => {
                status.error("config reload failed", &format!("{e:#}"));
                false
            }
        };
    }

    let root = config.get_root();
    if !sources.is_empty() {
        return rebuild(config, &describe(&sources, root), status);
    }

    // Removed files and freshly created directories have nothing to copy
    copies.retain(|path| path.is_file());
    if copies.is_empty() {
        return false;
    }
    match copies.iter().try_for_each(|path| copy_changed(path, config)) {
        Ok(()) => status.success(&format!("copied {}", describe(&copies, root))),
        Err(e) => status.error(&format!("{}: copy failed", describe(&copies, root)), &format!("{e:#}")),
    }
    false
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to register with the watcher.
///
/// The input directory covers pages, layouts, includes, data and in-tree
/// passthrough; watch targets and passthrough entries outside it (`CNAME`)
/// and the config file are added singly.
fn watched_paths(config: &SiteConfig) -> Vec<(PathBuf, RecursiveMode)> {
    let build = &config.build;
    let mut paths = vec![(build.input.clone(), RecursiveMode::Recursive)];

    for target in build.watch_targets.iter().chain(&build.passthrough) {
        if target.starts_with(&build.input) || paths.iter().any(|(p, _)| p == target) {
            continue;
        }
        let mode = if target.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        paths.push((target.clone(), mode));
    }
    paths.push((config.config_path.clone(), RecursiveMode::NonRecursive));

    paths.retain(|(path, _)| path.exists());
    paths
}

fn setup_watchers(watcher: &mut impl Watcher, paths: &[(PathBuf, RecursiveMode)], root: &Path) -> Result<()> {
    for (path, mode) in paths {
        watcher
            .watch(path, *mode)
            .with_context(|| format!("failed to watch {}", path.display()))?;
    }

    let names: Vec<String> = paths.iter().map(|(path, _)| rel_path(path, root)).collect();
    log!("watch"; "watching {}", names.join(", "));
    Ok(())
}

/// Swap the watched set after a config reload.
fn rewatch(
    watcher: &mut impl Watcher,
    previous: &[(PathBuf, RecursiveMode)],
    current: &[(PathBuf, RecursiveMode)],
    root: &Path,
) -> Result<()> {
    for (path, _) in previous {
        // The path may be gone already
        watcher.unwatch(path).ok();
    }
    setup_watchers(watcher, current, root)
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
///
/// Owns its copy of the configuration so a config reload can replace it.
pub fn watch_for_changes_blocking(cli: &Cli, mut config: SiteConfig) -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;

    let mut watched = watched_paths(&config);
    setup_watchers(&mut watcher, &watched, config.get_root())?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), cli, &mut config, &mut status) {
                    debouncer.mark_rebuild();
                }

                let current = watched_paths(&config);
                if current != watched {
                    rewatch(&mut watcher, &watched, &current, config.get_root())?;
                    watched = current;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // Irrelevant events, events during cooldown, idle timeouts
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/css")).unwrap();
        fs::create_dir_all(root.join("src/_layouts")).unwrap();
        fs::write(root.join("folio.toml"), "").unwrap();
        fs::write(root.join("CNAME"), "janedoe.dev").unwrap();

        let mut config = SiteConfig::default();
        config.resolve_paths(root);
        (dir, config)
    }

    #[test]
    fn test_categorize() {
        let (_dir, config) = setup();
        let input = &config.build.input;
        let root = config.get_root();

        assert_eq!(categorize(&config.config_path, &config), ChangeKind::Config);
        assert_eq!(categorize(&input.join("index.njk"), &config), ChangeKind::Source);
        assert_eq!(categorize(&input.join("_layouts/base.njk"), &config), ChangeKind::Source);
        assert_eq!(categorize(&input.join("_data/projects.toml"), &config), ChangeKind::Source);
        assert_eq!(categorize(&input.join("css/style.css"), &config), ChangeKind::Passthrough);
        assert_eq!(categorize(&root.join("CNAME"), &config), ChangeKind::Passthrough);
        assert_eq!(
            categorize(&config.build.output.join("index.html"), &config),
            ChangeKind::Ignored
        );
        assert_eq!(categorize(&root.join("README.md"), &config), ChangeKind::Ignored);
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("src/index.njk.swp")));
        assert!(is_temp_file(Path::new("src/index.njk~")));
        assert!(is_temp_file(Path::new("src/.DS_Store")));
        assert!(!is_temp_file(Path::new("src/index.njk")));
    }

    #[test]
    fn test_describe() {
        let root = Path::new("/site");
        let a = PathBuf::from("/site/src/a.md");
        let b = PathBuf::from("/site/src/b.md");
        let c = PathBuf::from("/site/src/c.md");
        assert_eq!(describe(&[&a], root), "src/a.md");
        assert_eq!(describe(&[&a, &b, &c], root), "src/a.md (+2 more)");
    }

    #[test]
    fn test_debouncer_batches_and_filters() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));

        debouncer.add(
            Event::new(EventKind::Modify(ModifyKind::Any))
                .add_path(PathBuf::from("/site/src/b.md"))
                .add_path(PathBuf::from("/site/src/.b.md.swp")),
        );
        debouncer.add(
            Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/site/src/a.md")),
        );
        debouncer.add(
            Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from("/site/src/a.md")),
        );

        // Events just arrived, the quiet period has not passed
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_millis(DEBOUNCE_MS));

        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS));
        assert!(debouncer.ready());
        assert_eq!(
            debouncer.take(),
            vec![PathBuf::from("/site/src/a.md"), PathBuf::from("/site/src/b.md")]
        );
        assert!(!debouncer.ready());
    }

    #[test]
    fn test_debouncer_cooldown() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.in_cooldown());
        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }

    #[test]
    fn test_watched_paths() {
        let (_dir, config) = setup();
        let watched = watched_paths(&config);
        let root = config.get_root();

        assert_eq!(
            watched,
            vec![
                (config.build.input.clone(), RecursiveMode::Recursive),
                (root.join("CNAME"), RecursiveMode::NonRecursive),
                (config.config_path.clone(), RecursiveMode::NonRecursive),
            ]
        );
    }

    #[test]
    fn test_handle_changes_copies_passthrough() {
        let (_dir, mut config) = setup();
        let css = config.build.input.join("css/style.css");
        fs::write(&css, "body{}").unwrap();

        let cli = <Cli as clap::Parser>::parse_from(["folio", "build"]);
        let mut status = WatchStatus::new();
        let rebuilt = handle_changes(&[css], &cli, &mut config, &mut status);

        assert!(!rebuilt);
        assert_eq!(
            fs::read_to_string(config.build.output.join("css/style.css")).unwrap(),
            "body{}"
        );
    }

    #[test]
    fn test_handle_changes_rebuilds_on_source() {
        let (_dir, mut config) = setup();
        let page = config.build.input.join("about.md");
        fs::write(&page, "+++\nlayout = \"\"\n+++\nHi").unwrap();

        let cli = <Cli as clap::Parser>::parse_from(["folio", "build"]);
        let mut status = WatchStatus::new();
        assert!(handle_changes(&[page], &cli, &mut config, &mut status));
        assert!(config.build.output.join("about/index.html").is_file());
    }
}
