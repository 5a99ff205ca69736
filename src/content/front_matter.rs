//! TOML front matter delimited by `+++` lines.
//!
//! ```text
//! +++
//! title = "Hello"
//! date = 2026-01-15
//! layout = "post"
//!
//! [navigation]
//! key = "Hello"
//! parent = "Blog"
//! +++
//! Body starts here.
//! ```

use super::ContentError;
use crate::data::NavigationMeta;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use std::path::Path;
use toml::{Table, Value};

const DELIMITER: &str = "+++";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// `None` = use the default layout; `Some("")` = no layout.
    pub layout: Option<String>,
    pub permalink: Option<String>,
    pub description: Option<String>,
    pub draft: bool,
    pub tags: Vec<String>,
    pub navigation: Option<NavigationMeta>,
    /// Any other keys, exposed to templates as `page.<key>`.
    pub extra: Table,
}

impl FrontMatter {
    /// Split `source` into front matter and body.
    ///
    /// A source without an opening `+++` line has empty front matter.
    pub fn split<'a>(source: &'a str, path: &Path) -> Result<(Self, &'a str), ContentError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let Some(rest) = strip_delimiter_line(source) else {
            return Ok((Self::default(), source));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let front = Self::parse(&rest[..offset], path)?;
                return Ok((front, &rest[offset + line.len()..]));
            }
            offset += line.len();
        }
        Err(ContentError::UnclosedFrontMatter(path.to_path_buf()))
    }

    /// Parse the TOML between the delimiters.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ContentError> {
        let mut table: Table = toml::from_str(text)
            .map_err(|err| ContentError::FrontMatter(path.to_path_buf(), err))?;

        let invalid = |key: &'static str, expected: &'static str| ContentError::InvalidField {
            path: path.to_path_buf(),
            key,
            expected,
        };

        let mut take_string = |key: &'static str| match table.remove(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(key, "a string")),
        };
        let title = take_string("title")?;
        let layout = take_string("layout")?;
        let permalink = take_string("permalink")?;
        let description = take_string("description")?;

        let date = match table.remove("date") {
            None => None,
            Some(Value::Datetime(dt)) => Some(
                parse_date(&dt.to_string()).ok_or_else(|| invalid("date", "a calendar date"))?,
            ),
            Some(Value::String(s)) => {
                Some(parse_date(&s).ok_or_else(|| invalid("date", "a calendar date"))?)
            }
            Some(_) => return Err(invalid("date", "a date")),
        };

        let draft = match table.remove("draft") {
            None => false,
            Some(Value::Boolean(b)) => b,
            Some(_) => return Err(invalid("draft", "a boolean")),
        };

        let tags = match table.remove("tags") {
            None => Vec::new(),
            Some(Value::String(tag)) => vec![tag],
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(tag) => Ok(tag),
                    _ => Err(invalid("tags", "an array of strings")),
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(invalid("tags", "an array of strings")),
        };

        let navigation = match table.remove("navigation") {
            None => None,
            Some(value) => {
                let expected = "a table with a non-empty `key`";
                let nav: NavigationMeta = value
                    .try_into()
                    .map_err(|_| invalid("navigation", expected))?;
                if nav.key.trim().is_empty() {
                    return Err(invalid("navigation", expected));
                }
                Some(nav)
            }
        };

        Ok(Self {
            title,
            date,
            layout,
            permalink,
            description,
            draft,
            tags,
            navigation,
            extra: table,
        })
    }

    /// Resolve the layout to apply, given the configured default.
    pub fn layout_or<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        match self.layout.as_deref() {
            Some("") => None,
            Some(layout) => Some(layout),
            None => default,
        }
    }
}

fn strip_delimiter_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(DELIMITER)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(source: &str) -> Result<(FrontMatter, &str), ContentError> {
        FrontMatter::split(source, Path::new("test.md"))
    }

    #[test]
    fn test_no_front_matter() {
        let (front, body) = split("# Title\n\nBody").unwrap();
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, "# Title\n\nBody");
    }

    #[test]
    fn test_full_front_matter() {
        let source = "+++\ntitle = \"Hello\"\ndate = 2026-01-15\nlayout = \"post\"\n\
                      description = \"First\"\ntags = [\"rust\", \"web\"]\nhero = true\n+++\nBody\n";
        let (front, body) = split(source).unwrap();
        assert_eq!(front.title.as_deref(), Some("Hello"));
        assert_eq!(front.date, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert_eq!(front.layout.as_deref(), Some("post"));
        assert_eq!(front.description.as_deref(), Some("First"));
        assert_eq!(front.tags, vec!["rust", "web"]);
        assert!(!front.draft);
        assert_eq!(front.extra.get("hero"), Some(&Value::Boolean(true)));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_date_as_string_and_datetime() {
        let (front, _) = split("+++\ndate = \"2025-03-01\"\n+++\n").unwrap();
        assert_eq!(front.date, NaiveDate::from_ymd_opt(2025, 3, 1));

        let (front, _) = split("+++\ndate = 2025-03-01T10:00:00Z\n+++\n").unwrap();
        assert_eq!(front.date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_crlf_delimiters() {
        let (front, body) = split("+++\r\ntitle = \"Win\"\r\n+++\r\nBody").unwrap();
        assert_eq!(front.title.as_deref(), Some("Win"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unclosed() {
        assert!(matches!(
            split("+++\ntitle = \"x\"\n"),
            Err(ContentError::UnclosedFrontMatter(_))
        ));
    }

    #[test]
    fn test_wrong_type() {
        let err = split("+++\ndraft = \"yes\"\n+++\n").unwrap_err();
        assert!(err.to_string().contains("`draft`"));
    }

    #[test]
    fn test_navigation_table() {
        let source = "+++\ntitle = \"Uses\"\n\n[navigation]\nkey = \"Uses\"\nparent = \"About\"\norder = 2\n+++\n";
        let (front, _) = split(source).unwrap();
        let nav = front.navigation.unwrap();
        assert_eq!(nav.key, "Uses");
        assert_eq!(nav.parent.as_deref(), Some("About"));
        assert_eq!(nav.order, 2);
        assert!(!front.extra.contains_key("navigation"));

        let (front, _) = split("+++\n[navigation]\nkey = \"Home\"\n+++\n").unwrap();
        assert_eq!(front.navigation.unwrap().order, 0);
    }

    #[test]
    fn test_navigation_requires_key() {
        for source in [
            "+++\nnavigation = \"Home\"\n+++\n",
            "+++\n[navigation]\norder = 1\n+++\n",
            "+++\n[navigation]\nkey = \" \"\n+++\n",
            "+++\n[navigation]\nkey = \"Home\"\nweight = 1\n+++\n",
        ] {
            let err = split(source).unwrap_err();
            assert!(err.to_string().contains("`navigation`"), "{source}");
        }
    }

    #[test]
    fn test_invalid_date() {
        assert!(split("+++\ndate = \"someday\"\n+++\n").is_err());
    }

    #[test]
    fn test_layout_or() {
        let default = Some("post");
        let mut front = FrontMatter::default();
        assert_eq!(front.layout_or(default), Some("post"));
        front.layout = Some("home".into());
        assert_eq!(front.layout_or(default), Some("home"));
        front.layout = Some(String::new());
        assert_eq!(front.layout_or(default), None);
    }
}
