//! Template context values.
//!
//! | Variable | Content |
//! |----------|---------|
//! | `site` | `[base]` config plus `site.extra` from `[extra]` |
//! | `collections` | `blog`, `all` |
//! | `<stem>` | one per data file (`projects.all`, `projects.featured`, `social`, ...) |
//! | `page` | current page: `url`, `title`, `date`, `navigation`, front matter extras |
//! | `content` | rendered inner HTML (layouts only) |

use crate::config::SiteConfig;
use crate::content::SourcePage;
use crate::data::{Collections, ProjectRecord, SiteData};
use crate::utils::date::format_iso;
use minijinja::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Context shared by every page of one build.
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    vars: BTreeMap<String, Value>,
}

#[derive(Serialize)]
struct SiteValue<'a> {
    #[serde(flatten)]
    base: &'a crate::config::BaseConfig,
    extra: &'a BTreeMap<String, toml::Value>,
}

impl SharedContext {
    pub fn new(config: &SiteConfig, data: &SiteData, collections: &Collections) -> Self {
        let mut vars: BTreeMap<String, Value> = data
            .globals()
            .into_iter()
            .map(|(name, value)| (name, Value::from_serialize(&value)))
            .collect();

        let site = SiteValue {
            base: &config.base,
            extra: &config.extra,
        };
        vars.insert("site".into(), Value::from_serialize(&site));
        vars.insert("collections".into(), Value::from_serialize(collections));
        Self { vars }
    }

    /// Context for one render: shared vars plus `page` and optional `content`.
    pub fn with_page(&self, page: Value, content: Option<&str>) -> BTreeMap<String, Value> {
        let mut vars = self.vars.clone();
        vars.insert("page".into(), page);
        if let Some(content) = content {
            vars.insert("content".into(), Value::from_safe_string(content.to_string()));
        }
        vars
    }

    /// Context for a project detail page, which also gets `project`.
    pub fn with_project(
        &self,
        page: Value,
        project: &ProjectRecord,
        content: &str,
    ) -> BTreeMap<String, Value> {
        let mut vars = self.with_page(page, Some(content));
        vars.insert("project".into(), Value::from_serialize(project));
        vars
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }
}

/// `page` variable for a source page.
pub fn page_value(page: &SourcePage) -> Value {
    let mut map: BTreeMap<String, Value> = page
        .front
        .extra
        .iter()
        .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
        .collect();

    map.insert("url".into(), Value::from(page.url.clone()));
    map.insert("title".into(), Value::from(page.title()));
    map.insert("inputPath".into(), Value::from(page.relative.clone()));
    map.insert("draft".into(), Value::from(page.front.draft));
    map.insert("tags".into(), Value::from_serialize(&page.front.tags));
    if let Some(date) = page.front.date {
        map.insert("date".into(), Value::from(format_iso(date)));
    }
    if let Some(description) = &page.front.description {
        map.insert("description".into(), Value::from(description.clone()));
    }
    if let Some(layout) = &page.front.layout {
        map.insert("layout".into(), Value::from(layout.clone()));
    }
    if let Some(navigation) = &page.front.navigation {
        map.insert("navigation".into(), Value::from_serialize(navigation));
    }
    Value::from(map)
}

/// `page` variable for a generated project page.
pub fn project_page_value(project: &ProjectRecord, url: &str) -> Value {
    let mut map = BTreeMap::new();
    map.insert("url", Value::from(url));
    map.insert("title", Value::from(project.title.clone()));
    if let Some(subtitle) = &project.subtitle {
        map.insert("description", Value::from(subtitle.clone()));
    }
    Value::from(map)
}
