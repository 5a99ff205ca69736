//! Global data exposed to templates.
//!
//! Every file in the data directory (`src/_data` by default) becomes one
//! template global named after its file stem:
//!
//! | File | Global |
//! |------|--------|
//! | `projects.toml` / `projects.json` | `projects.all`, `projects.featured` |
//! | `social.json` | `social` |
//! | `skills.toml` | `skills` |
//!
//! `projects` gets typed validation (see [`ProjectTable`]) and is always
//! present, empty without a data file; other files are passed through as
//! plain values.
//!
//! ```jinja
//! {% for project in projects.featured %}
//!   <h3>{{ project.title }}</h3>
//!   {% for tag in project.tech %}<span>{{ tag }}</span>{% endfor %}
//! {% endfor %}
//! ```

mod projects;
mod types;

pub use projects::{ProjectRecord, ProjectTable, format_title};
pub use types::{Collections, NavigationMeta, PageData};

use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Stem of the data file holding project records.
pub const PROJECTS_STEM: &str = "projects";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read data file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("unsupported data file `{0}` (expected .toml or .json)")]
    Unsupported(PathBuf),

    #[error("{0}")]
    Invalid(String),
}

/// All data-directory globals, loaded once per build.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub projects: ProjectTable,
    globals: BTreeMap<String, Value>,
}

impl SiteData {
    /// Load every `.toml`/`.json` file directly under `dir`.
    ///
    /// A missing directory yields empty data; other files are ignored.
    pub fn load(dir: &Path) -> Result<Self, DataError> {
        let mut data = Self::default();
        if !dir.is_dir() {
            return Ok(data);
        }

        let entries = fs::read_dir(dir).map_err(|err| DataError::Io(dir.to_path_buf(), err))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_data_file(path))
            .collect();
        paths.sort();

        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned) else {
                continue;
            };
            if data.globals.contains_key(&stem) {
                return Err(DataError::Invalid(format!(
                    "data global `{stem}` is defined by more than one file"
                )));
            }

            let value = if stem == PROJECTS_STEM {
                data.projects = ProjectTable::load(&path)?;
                serde_json::to_value(&data.projects)
                    .map_err(|err| DataError::Json(path.clone(), err))?
            } else {
                load_value(&path)?
            };
            data.globals.insert(stem, value);
        }

        Ok(data)
    }

    /// Template globals: one entry per data file, `projects` always included.
    pub fn globals(&self) -> BTreeMap<String, Value> {
        let mut globals = self.globals.clone();
        if !globals.contains_key(PROJECTS_STEM)
            && let Ok(empty) = serde_json::to_value(&self.projects)
        {
            globals.insert(PROJECTS_STEM.into(), empty);
        }
        globals
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }
}

fn is_data_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("toml" | "json")
    )
}

fn load_value(path: &Path) -> Result<Value, DataError> {
    let content =
        fs::read_to_string(path).map_err(|err| DataError::Io(path.to_path_buf(), err))?;
    if path.extension().is_some_and(|e| e == "toml") {
        let table: toml::Table =
            toml::from_str(&content).map_err(|err| DataError::Toml(path.to_path_buf(), err))?;
        serde_json::to_value(table).map_err(|err| DataError::Json(path.to_path_buf(), err))
    } else {
        serde_json::from_str(&content).map_err(|err| DataError::Json(path.to_path_buf(), err))
    }
}
