//! Project records shown on the portfolio.
//!
//! Loaded once from `_data/projects.toml` (a `[[projects]]` array) or
//! `_data/projects.json` (a plain array). Records are read-only after load.
//!
//! Templates see the table as `projects.all` and `projects.featured`.
//!
//! ```toml
//! [[projects]]
//! id = "netgrid"
//! title = "NetGrid Power Grid Simulator"
//! overview = "Co-simulation framework for power grids."
//! tech = ["HELICS", "Mosaik", "OpenDSS"]
//! featured = true
//! ```

use super::DataError;
use serde::{Deserialize, Serialize, Serializer};
use std::{collections::HashSet, fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    pub id: String,

    /// Display title. Derived from `id` when left empty.
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub overview: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    /// Technology tags, in display order.
    #[serde(default)]
    pub tech: Vec<String>,

    #[serde(
        default,
        rename = "sourceLink",
        alias = "source_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_link: Option<String>,

    #[serde(
        default,
        rename = "visitSiteLink",
        alias = "visit_site_link",
        skip_serializing_if = "Option::is_none"
    )]
    pub visit_site_link: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

/// All project records, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTable {
    projects: Vec<ProjectRecord>,
}

/// Template-facing shape of a [`ProjectTable`].
#[derive(Serialize)]
struct ProjectsView<'a> {
    all: &'a [ProjectRecord],
    featured: Vec<&'a ProjectRecord>,
}

impl Serialize for ProjectTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProjectsView {
            all: &self.projects,
            featured: self.featured().collect(),
        }
        .serialize(serializer)
    }
}

/// On-disk shape of `projects.toml`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlFile {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

impl ProjectTable {
    /// Build a table, filling derived titles and checking ids.
    pub fn new(mut projects: Vec<ProjectRecord>) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for project in &mut projects {
            if project.id.trim().is_empty() {
                return Err(DataError::Invalid("project with empty id".into()));
            }
            if !seen.insert(project.id.clone()) {
                return Err(DataError::Invalid(format!(
                    "duplicate project id `{}`",
                    project.id
                )));
            }
            if project.title.trim().is_empty() {
                project.title = format_title(&project.id);
            }
        }
        Ok(Self { projects })
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content =
            fs::read_to_string(path).map_err(|err| DataError::Io(path.to_path_buf(), err))?;
        let projects = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::from_str::<TomlFile>(&content)
                    .map_err(|err| DataError::Toml(path.to_path_buf(), err))?
                    .projects
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|err| DataError::Json(path.to_path_buf(), err))?,
            _ => return Err(DataError::Unsupported(path.to_path_buf())),
        };
        Self::new(projects)
    }

    pub fn all(&self) -> &[ProjectRecord] {
        &self.projects
    }

    /// Projects flagged for prominent display, in declaration order.
    pub fn featured(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter().filter(|p| p.featured)
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Title from an id: separators become spaces, words are capitalised.
///
/// `ai-based-customer-support` → `Ai Based Customer Support`
pub fn format_title(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
