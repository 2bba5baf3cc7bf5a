//! Compiler configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Dialect, join::JoinType};

/// Point in the pipeline at which `recordsFiltered` is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilteredCount {
    /// After the global search and every per-column filter
    #[default]
    AfterColumnFilters,
    /// After the global search only
    AfterGlobalSearch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GridConfig {
    pub dialect: Dialect,
    pub join: JoinType,
    /// Upper bound on the page size; also bounds "all rows" requests when set
    pub max_page_length: Option<u64>,
    pub trim_search_values: bool,
    pub filtered_count: FilteredCount,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            join: JoinType::default(),
            max_page_length: None,
            trim_search_values: true,
            filtered_count: FilteredCount::default(),
        }
    }
}

impl GridConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse("config".into(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.into(), e))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.display().to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_length == Some(0) {
            return Err(ConfigError::Invalid("max-page-length must be positive".into()));
        }
        Ok(())
    }

    /// The LIMIT for a requested page `length`; `None` means no limit.
    ///
    /// Negative lengths request every row.
    pub fn page_limit(&self, length: i64) -> Option<u64> {
        match (u64::try_from(length).ok(), self.max_page_length) {
            (Some(length), Some(max)) => Some(length.min(max)),
            (Some(length), None) => Some(length),
            (None, max) => max,
        }
    }

    /// Normalizes a search or filter value before it reaches the predicate builder.
    pub fn search_value<'v>(&self, value: &'v str) -> &'v str {
        if self.trim_search_values {
            value.trim()
        } else {
            value
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    /// Parse failure, labelled with the file it came from when there is one
    #[error("failed to parse {0}: {1}")]
    Parse(String, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GridConfig::from_toml_str("").unwrap();
        assert_eq!(config, GridConfig::default());
        assert!(config.trim_search_values);
        assert_eq!(config.join, JoinType::Left);
        assert_eq!(config.filtered_count, FilteredCount::AfterColumnFilters);
    }

    #[test]
    fn parses_all_keys() {
        let config = GridConfig::from_toml_str(
            r#"
            dialect = "postgresql"
            join = "inner"
            max-page-length = 100
            trim-search-values = false
            filtered-count = "after-global-search"
            "#,
        )
        .unwrap();
        assert_eq!(config.dialect, Dialect::PostgreSQL);
        assert_eq!(config.join, JoinType::Inner);
        assert_eq!(config.max_page_length, Some(100));
        assert!(!config.trim_search_values);
        assert_eq!(config.filtered_count, FilteredCount::AfterGlobalSearch);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GridConfig::from_toml_str("join = \"cross\""),
            Err(ConfigError::Parse(_, _))
        ));
        assert!(matches!(
            GridConfig::from_toml_str("max-page-length = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn page_limit() {
        let open = GridConfig::default();
        assert_eq!(open.page_limit(10), Some(10));
        assert_eq!(open.page_limit(0), Some(0));
        assert_eq!(open.page_limit(-1), None);

        let capped = GridConfig {
            max_page_length: Some(50),
            ..GridConfig::default()
        };
        assert_eq!(capped.page_limit(10), Some(10));
        assert_eq!(capped.page_limit(500), Some(50));
        assert_eq!(capped.page_limit(-1), Some(50));
    }

    #[test]
    fn search_value_trimming() {
        assert_eq!(GridConfig::default().search_value("  ann "), "ann");
        let raw = GridConfig {
            trim_search_values: false,
            ..GridConfig::default()
        };
        assert_eq!(raw.search_value(" ann "), " ann ");
    }
}
