//! Passthrough copy.
//!
//! Each `[build.passthrough]` entry is copied verbatim into the output:
//! directories recursively, files singly. Paths inside the input dir keep
//! their input-relative location; anything else keeps its root-relative one.
//!
//! | Entry | Output |
//! |-------|--------|
//! | `src/css` | `_site/css/...` |
//! | `src/assets` | `_site/assets/...` |
//! | `CNAME` | `_site/CNAME` |
//!
//! Missing entries are skipped.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Copy every passthrough path. Returns the number of files written.
pub fn copy_passthrough(config: &SiteConfig, clean: bool) -> Result<usize> {
    let files: Vec<(PathBuf, PathBuf)> = config
        .build
        .passthrough
        .iter()
        .filter(|entry| entry.exists())
        .flat_map(|entry| collect_files(entry))
        .map(|source| {
            let dest = passthrough_dest(&source, config);
            (source, dest)
        })
        .collect();

    let copied = files
        .par_iter()
        .map(|(source, dest)| copy_file(source, dest, clean))
        .collect::<Result<Vec<bool>>>()?;
    Ok(copied.into_iter().filter(|&c| c).count())
}

/// Whether `path` is a passthrough entry or lies inside one.
pub fn is_passthrough(path: &Path, config: &SiteConfig) -> bool {
    config
        .build
        .passthrough
        .iter()
        .any(|entry| path.starts_with(entry))
}

/// Output location for a passthrough source file.
pub fn passthrough_dest(source: &Path, config: &SiteConfig) -> PathBuf {
    let build = &config.build;
    let relative = source
        .strip_prefix(&build.input)
        .or_else(|_| source.strip_prefix(config.get_root()))
        .unwrap_or(source);
    build.output.join(relative)
}

fn collect_files(entry: &Path) -> Vec<PathBuf> {
    if entry.is_file() {
        return vec![entry.to_path_buf()];
    }
    WalkDir::new(entry)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Copy one file unless the destination is up to date. Returns whether it copied.
fn copy_file(source: &Path, dest: &Path, clean: bool) -> Result<bool> {
    if !clean && is_up_to_date(source, dest) {
        return Ok(false);
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)
        .with_context(|| format!("failed to copy {} to {}", source.display(), dest.display()))?;
    Ok(true)
}

/// Check if destination is at least as new as source.
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let modified = |p: &Path| -> Option<SystemTime> { p.metadata().ok()?.modified().ok() };
    match (modified(src), modified(dst)) {
        (Some(src_time), Some(dst_time)) => src_time <= dst_time,
        _ => false,
    }
}

/// Copy a single changed passthrough file (watch mode).
pub fn copy_changed(source: &Path, config: &SiteConfig) -> Result<()> {
    copy_file(source, &passthrough_dest(source, config), true).map(|_| ())
}
