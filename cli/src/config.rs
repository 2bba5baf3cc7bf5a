//! `gridquery.toml`: database location, compiler settings and the entity schema.
//!
//! ```toml
//! database = "./app.db"
//!
//! [grid]
//! join = "left"
//! max-page-length = 100
//!
//! [[entities]]
//! name = "user"
//! table = "users"
//! fields = [
//!     { name = "id", kind = "integer" },
//!     { name = "name", kind = "text" },
//! ]
//! relations = [
//!     { name = "department", target = "department", local_key = "department_id" },
//! ]
//! ```

use gridquery_core::{EntityDescriptor, GridConfig, Schema};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "gridquery.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQLite database file, relative to the working directory
    #[serde(default)]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub entities: Vec<EntityDescriptor>,
}

impl Config {
    /// Load from default config file
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.entities.is_empty() {
            return Err(Error::Invalid("no entities declared".into()));
        }
        self.grid
            .validate()
            .map_err(|e| Error::Invalid(e.to_string()))?;
        self.schema()
            .validate()
            .map_err(|e| Error::Invalid(e.to_string()))
    }

    /// The entity registry described by `[[entities]]`.
    pub fn schema(&self) -> Schema {
        self.entities.iter().cloned().fold(Schema::new(), Schema::with)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
