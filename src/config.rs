//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bloodline/bloodline.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `BLOODLINE_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::VampireRecord;

/// Year after which a converted vampire counts as a millennial.
pub const DEFAULT_MILLENNIAL_YEAR: i32 = 1980;

/// Unified configuration for bloodline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default threshold for `after` queries
    pub millennial_year: i32,
    /// Declared lineage, empty means the built-in sample lineage
    pub lineage: Vec<VampireRecord>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            millennial_year: DEFAULT_MILLENNIAL_YEAR,
            lineage: Vec::new(),
        }
    }
}

/// Raw settings for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub millennial_year: Option<i32>,
    pub lineage: Option<Vec<VampireRecord>>,
}

/// Get the XDG config directory for bloodline.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bloodline").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bloodline.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn env_source() -> Environment {
    Environment::with_prefix("BLOODLINE")
        .prefix_separator("_")
        .separator("__")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Lineage: a declared lineage replaces the base lineage as a whole
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            millennial_year: overlay.millennial_year.unwrap_or(self.millennial_year),
            lineage: overlay
                .lineage
                .clone()
                .unwrap_or_else(|| self.lineage.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/bloodline/bloodline.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `BLOODLINE_*` prefix
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current.apply_env_overrides(env_source())
    }

    /// Load a single config file on top of defaults, without global config or env vars.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply `BLOODLINE_*` variables from `source` as explicit overrides.
    pub fn apply_env_overrides(mut self, source: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("millennial_year") {
            self.millennial_year = val.trim().parse().map_err(|_| ApplicationError::Config {
                message: format!("invalid BLOODLINE_MILLENNIAL_YEAR: {}", val),
            })?;
        }

        Ok(self)
    }

    /// Apply overrides from an explicit variable map instead of the process environment.
    pub fn with_env_vars(self, vars: HashMap<String, String>) -> Result<Self, ApplicationError> {
        self.apply_env_overrides(env_source().source(Some(vars)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_with_keeps_unspecified_fields() {
        let base = Settings {
            millennial_year: 1900,
            lineage: vec![VampireRecord::original("Base", 1)],
        };
        let merged = base.merge_with(&RawSettings {
            millennial_year: Some(2000),
            lineage: None,
        });
        assert_eq!(merged.millennial_year, 2000);
        assert_eq!(merged.lineage, base.lineage);
    }

    #[test]
    fn test_merge_with_replaces_lineage() {
        let base = Settings {
            lineage: vec![VampireRecord::original("Base", 1)],
            ..Settings::default()
        };
        let merged = base.merge_with(&RawSettings {
            millennial_year: None,
            lineage: Some(vec![VampireRecord::original("Other", 2)]),
        });
        assert_eq!(merged.lineage, vec![VampireRecord::original("Other", 2)]);
        assert_eq!(merged.millennial_year, DEFAULT_MILLENNIAL_YEAR);
    }
}
