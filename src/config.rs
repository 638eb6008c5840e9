/// Viewer configuration
///
/// Everything is read from environment variables so the viewer needs no
/// config file:
/// - `COURSE_VIEWER_DIR`: directory the file dialog opens in
/// - `COURSE_VIEWER_SORT`: initial sort key ("title-asc", "date-new", ...)
/// - `COURSE_VIEWER_THEME`: "dark" or "light"
/// - `COURSE_VIEWER_LOG`: tracing filter directive (e.g. "debug")
use std::path::PathBuf;
use thiserror::Error;

use crate::state::query::SortKey;

pub const DIR_VAR: &str = "COURSE_VIEWER_DIR";
pub const SORT_VAR: &str = "COURSE_VIEWER_SORT";
pub const THEME_VAR: &str = "COURSE_VIEWER_THEME";
pub const LOG_VAR: &str = "COURSE_VIEWER_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("COURSE_VIEWER_SORT: {0}")]
    InvalidSort(String),

    #[error("COURSE_VIEWER_THEME: unknown theme '{0}' (expected 'dark' or 'light')")]
    InvalidTheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Starting directory of the file dialog
    pub start_dir: Option<PathBuf>,
    /// Sort key applied before the user picks one
    pub initial_sort: SortKey,
    pub dark_theme: bool,
    pub log_filter: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            start_dir: default_start_dir(),
            initial_sort: SortKey::None,
            dark_theme: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from any key/value source.
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(DIR_VAR) {
            config.start_dir = Some(PathBuf::from(dir));
        }

        if let Some(sort) = get(SORT_VAR) {
            config.initial_sort = sort.parse().map_err(ConfigError::InvalidSort)?;
        }

        if let Some(theme) = get(THEME_VAR) {
            config.dark_theme = match theme.trim().to_ascii_lowercase().as_str() {
                "dark" => true,
                "light" => false,
                _ => return Err(ConfigError::InvalidTheme(theme)),
            };
        }

        if let Some(filter) = get(LOG_VAR) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

/// Documents folder if there is one, else the home directory
fn default_start_dir() -> Option<PathBuf> {
    dirs::document_dir().or_else(dirs::home_dir)
}
