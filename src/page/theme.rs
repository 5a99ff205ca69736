//! Light/dark theme persisted in browser-local storage.

use std::{collections::HashMap, fmt, str::FromStr};

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// Page attribute the theme is applied to.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

/// Key-value storage that survives page visits (`localStorage` in a browser).
pub trait ThemeStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory storage, for hosts without persistence and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// Read the stored theme. Missing or unrecognised values mean `Light`.
pub fn load_theme(storage: &impl ThemeStorage) -> Theme {
    storage
        .get(THEME_KEY)
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Flip `current`, persist the result and return it for the page attribute.
pub fn toggle_theme(current: Theme, storage: &mut impl ThemeStorage) -> Theme {
    let next = current.flipped();
    storage.set(THEME_KEY, next.as_str());
    next
}
