//! Runtime configuration.
//!
//! Values come from an optional TOML file (with the `toml-config` feature)
//! and are then overridden by environment variables.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::puzzle::PuzzleDate;
use crate::puzzle::date::{FIRST_DAY, current_year};

pub const SESSION_ENV: &str = "PUZZLEKIT_SESSION";
pub const YEAR_ENV: &str = "PUZZLEKIT_YEAR";
pub const DAY_ENV: &str = "PUZZLEKIT_DAY";
pub const CONFIG_ENV: &str = "PUZZLEKIT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
    #[cfg(feature = "toml-config")]
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "toml-config")]
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Session cookie used to download puzzle input.
    pub session: Option<String>,
    pub year: Option<i32>,
    pub day: Option<u32>,
}

impl Config {
    /// Loads the config file (when enabled and present), then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file()?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    #[cfg(feature = "toml-config")]
    fn from_file() -> Result<Self, ConfigError> {
        match config_file_path() {
            Some(path) if path.exists() => Self::from_toml_file(&path),
            _ => Ok(Self::default()),
        }
    }

    #[cfg(not(feature = "toml-config"))]
    fn from_file() -> Result<Self, ConfigError> {
        Ok(Self::default())
    }

    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides fields with values from `lookup`, keyed by environment
    /// variable name. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(session) = non_empty(SESSION_ENV) {
            self.session = Some(session.trim().to_string());
        }
        if let Some(year) = non_empty(YEAR_ENV) {
            self.year = Some(parse_number(YEAR_ENV, &year)?);
        }
        if let Some(day) = non_empty(DAY_ENV) {
            self.day = Some(parse_number(DAY_ENV, &day)?);
        }
        Ok(())
    }

    /// Puzzle selected by this config, defaulting to day 1 of the current
    /// year.
    pub fn puzzle_date(&self) -> PuzzleDate {
        PuzzleDate::new(
            self.year.unwrap_or_else(current_year),
            self.day.unwrap_or(FIRST_DAY),
        )
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

/// Location of the config file: `PUZZLEKIT_CONFIG` when set, otherwise
/// `config.toml` in the platform config directory.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var(CONFIG_ENV) {
        return Some(PathBuf::from(custom));
    }
    ProjectDirs::from("", "", "puzzlekit").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn environment_overrides_fields() {
        let mut config = Config {
            session: Some("from-file".into()),
            year: Some(2020),
            day: None,
        };
        config
            .apply_overrides(lookup_from(&[
                (SESSION_ENV, " abc123 "),
                (DAY_ENV, "16"),
                (YEAR_ENV, ""),
            ]))
            .expect("valid overrides");

        assert_eq!(config.session.as_deref(), Some("abc123"));
        assert_eq!(config.year, Some(2020));
        assert_eq!(config.day, Some(16));
        assert_eq!(config.puzzle_date().day(), 16);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(lookup_from(&[(YEAR_ENV, "twenty")]))
            .expect_err("not a number");
        assert!(matches!(err, ConfigError::InvalidNumber { key, .. } if key == YEAR_ENV));
    }

    #[test]
    fn defaults_select_day_one() {
        let date = Config::default().puzzle_date();
        assert_eq!(date.day(), 1);
        assert_eq!(date.year(), current_year());
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn reads_toml_files() -> anyhow::Result<()> {
        let dir = tempfile::Builder::new()
            .prefix("puzzlekit-config-test")
            .tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session = \"s3cr3t\"\nyear = 2022\nday = 6\n")?;

        let config = Config::from_toml_file(&path)?;
        assert_eq!(config.session.as_deref(), Some("s3cr3t"));
        assert_eq!(config.puzzle_date(), PuzzleDate::new(2022, 6));
        Ok(())
    }
}
