// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Process configuration.
//!
//! Built once in `main` and handed to the client constructors. Values come
//! from a YAML file and the environment:
//!
//! ```yaml
//! notion:
//!   integration_token: ${NOTION_INTEGRATION_TOKEN}
//!   database_ids:
//!     finance: 0123456789abcdef0123456789abcdef
//! ```
//!
//! `${VAR}` values are resolved from the environment, and the
//! `NOTION_INTEGRATION_TOKEN` / `NOTION_FINANCE_DATABASE_ID` variables win
//! over whatever the file says. A `.env` file in the working directory or
//! next to the config file fills in variables the process does not set;
//! the one next to the config wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::notion::NOTION_API_URL;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "NotionFinance", "notion-finance"));

pub const CONFIG_PATH_ENV: &str = "NOTION_FINANCE_CONFIG";
pub const TOKEN_ENV: &str = "NOTION_INTEGRATION_TOKEN";
pub const DATABASE_ENV: &str = "NOTION_FINANCE_DATABASE_ID";
pub const ENV_FILE: &str = ".env";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotionConfig {
    #[serde(default)]
    pub integration_token: String,
    #[serde(default)]
    pub database_ids: DatabaseIds,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        NotionConfig {
            integration_token: String::new(),
            database_ids: DatabaseIds::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseIds {
    #[serde(default)]
    pub finance: String,
}

fn default_base_url() -> String {
    NOTION_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(ConfigError::NoConfigDir)?;
    Ok(proj.config_dir().join("config.yml"))
}

impl Config {
    /// Loads the config for this process. An explicit path (flag or
    /// `NOTION_FINANCE_CONFIG`) must exist; the platform default may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, |key: &str| std::env::var(key).ok())
    }

    /// [`Config::load`] with `env` standing in for the process environment.
    pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from));
        let (path, required) = match explicit {
            Some(p) => (p, true),
            None => (default_config_path()?, false),
        };

        let raw = if required || path.exists() {
            tracing::debug!(path = %path.display(), "reading config");
            Some(fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?)
        } else {
            None
        };

        let mut dotenv = HashMap::new();
        if let Ok(cwd) = std::env::current_dir() {
            read_env_file(&cwd.join(ENV_FILE), &mut dotenv)?;
        }
        if let Some(dir) = path.parent() {
            read_env_file(&dir.join(ENV_FILE), &mut dotenv)?;
        }
        let lookup = |key: &str| {
            env(key)
                .filter(|v| !v.is_empty())
                .or_else(|| dotenv.get(key).cloned())
        };
        Self::resolve(raw.as_deref(), &path.display().to_string(), lookup)
    }

    /// Parses, expands and validates. `lookup` stands in for the process
    /// environment.
    pub fn resolve<F>(raw: Option<&str>, origin: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg: Config = match raw {
            Some(text) if !text.trim().is_empty() => {
                serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
                    path: origin.to_string(),
                    source,
                })?
            }
            _ => Config::default(),
        };

        let notion = &mut cfg.notion;
        notion.integration_token = expand(&notion.integration_token, &lookup)?;
        notion.database_ids.finance = expand(&notion.database_ids.finance, &lookup)?;
        notion.base_url = expand(&notion.base_url, &lookup)?;

        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            notion.integration_token = token;
        }
        if let Some(id) = lookup(DATABASE_ENV).filter(|v| !v.is_empty()) {
            notion.database_ids.finance = id;
        }

        if notion.integration_token.trim().is_empty() {
            return Err(ConfigError::MissingValue("notion.integration_token"));
        }
        if notion.database_ids.finance.trim().is_empty() {
            return Err(ConfigError::MissingValue("notion.database_ids.finance"));
        }
        Ok(cfg)
    }
}

/// Adds the pairs of a dotenv file to `vars`; a missing file adds nothing.
fn read_env_file(path: &Path, vars: &mut HashMap<String, String>) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "reading env file");
    let err = |source: dotenvy::Error| ConfigError::DotEnv {
        path: path.display().to_string(),
        source,
    };
    for item in dotenvy::from_path_iter(path).map_err(err)? {
        let (key, value) = item.map_err(err)?;
        vars.insert(key, value);
    }
    Ok(())
}

/// Replaces a whole-value `${VAR}` reference with the variable's value.
fn expand<F>(value: &str, lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let trimmed = value.trim();
    match trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(key) => lookup(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::UnsetVariable(key.to_string())),
        None => Ok(value.to_string()),
    }
}
