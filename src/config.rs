use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub(crate) const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Base of the management REST API, without a trailing slash.
    pub(crate) api_base: String,
    /// Path prefix the console pages live under, e.g. `/kafka`.
    pub(crate) url_prefix: String,
    pub(crate) region: String,
    pub(crate) username: String,
    pub(crate) role: i32,
    /// Shows the topic edit action for owners and admins.
    pub(crate) edit_enabled: bool,
    /// Page address the console opens with when none is given on the command line.
    pub(crate) start_url: String,
    /// Extra PEM bundle trusted next to the platform roots.
    pub(crate) ca_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8080/api/v1".to_string(),
            url_prefix: "/kafka".to_string(),
            region: "cn".to_string(),
            username: "admin".to_string(),
            role: 2,
            edit_enabled: false,
            start_url: "http://127.0.0.1:8080/kafka/topic/topic-detail?clusterId=1&topic=demo"
                .to_string(),
            ca_file: None,
        }
    }
}

impl Config {
    pub(crate) fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub(crate) fn url_prefix(&self) -> &str {
        self.url_prefix.trim_end_matches('/')
    }
}

pub(crate) fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "kmui", "kmui").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Loads the user config, falling back to defaults when no file exists yet.
pub(crate) fn load() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

pub(crate) fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

pub(crate) fn parse(text: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = parse(
            r#"
            api_base = "https://km.example.com/api/v1/"
            role = 0
            edit_enabled = true
            ca_file = "/etc/km/ca.pem"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base(), "https://km.example.com/api/v1");
        assert_eq!(config.role, 0);
        assert!(config.edit_enabled);
        assert_eq!(config.ca_file, Some(PathBuf::from("/etc/km/ca.pem")));
        assert_eq!(config.url_prefix(), "/kafka");
    }

    #[test]
    fn malformed_file_is_reported() {
        assert!(matches!(parse("role = \"admin\""), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("kmui-missing-config-for-test.toml");
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }
}
