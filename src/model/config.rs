use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::failure::ErrorKindTable;

const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub functions: FunctionsConfig,
    pub error_kinds: ErrorKindTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    pub directory: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionsConfig {
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl FunctionsConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|disabled| disabled == name)
    }
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let user_path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|candidate| candidate.exists()),
        };

        let user_str = match user_path.as_ref() {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?,
            ),
            None => None,
        };

        let mut config = Self::parse(user_str.as_deref())?;

        if config.logging.directory.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            config.logging.directory =
                config
                    .logging
                    .directory
                    .replacen('~', &home.to_string_lossy(), 1);
        }

        Ok(config)
    }

    /// Merge `user` over the built-in defaults and validate the result.
    pub fn parse(user: Option<&str>) -> Result<Self> {
        let mut merged: toml::Table = toml::from_str(DEFAULTS)?;

        if let Some(user) = user {
            let overrides: toml::Table = toml::from_str(user)?;
            merge_tables(&mut merged, overrides);
        }

        let config: AppConfig = toml::Value::Table(merged).try_into()?;
        config.error_kinds.validate()?;
        Ok(config)
    }

    pub fn log_dir(&self) -> PathBuf {
        if !self.logging.directory.is_empty() {
            return PathBuf::from(&self.logging.directory);
        }

        directories::ProjectDirs::from("", "", "debug-functions")
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("/tmp"))
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(inner) => {
                if let Some(toml::Value::Table(base_inner)) = base.get_mut(&key) {
                    merge_tables(base_inner, inner);
                    continue;
                }
                base.insert(key, toml::Value::Table(inner));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "debug-functions")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
