//! Server configuration.
//!
//! Values come from built-in defaults, then an optional JSON file named by
//! `KERCKHOFF_CONFIG`, then individual `KERCKHOFF_*` environment variables.

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

const CONFIG_FILE_VAR: &str = "KERCKHOFF_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Root folder of the local cache provider: `<root>/<set>/<package>/`.
    pub source_root: PathBuf,
    /// Folder the publisher writes package JSON documents into.
    pub publish_root: PathBuf,
    pub json_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("kerckhoff.sqlite"),
            source_root: PathBuf::from("drive"),
            publish_root: PathBuf::from("published"),
            json_limit_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

/// Partial configuration as read from the JSON file; absent keys keep defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    database_path: Option<PathBuf>,
    source_root: Option<PathBuf>,
    publish_root: Option<PathBuf>,
    json_limit_bytes: Option<usize>,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = vars.get(CONFIG_FILE_VAR) {
            let path = PathBuf::from(path);
            let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let file: FileConfig = serde_json::from_str(&raw)
                .map_err(|source| ConfigError::Parse { path, source })?;
            config.apply_file(file);
        }

        if let Some(host) = vars.get("KERCKHOFF_HOST") {
            config.host = host.clone();
        }
        if let Some(port) = vars.get("KERCKHOFF_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidVar {
                var: "KERCKHOFF_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(path) = vars.get("KERCKHOFF_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(path) = vars.get("KERCKHOFF_SOURCE_ROOT") {
            config.source_root = PathBuf::from(path);
        }
        if let Some(path) = vars.get("KERCKHOFF_PUBLISH_ROOT") {
            config.publish_root = PathBuf::from(path);
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(path) = file.database_path {
            self.database_path = path;
        }
        if let Some(path) = file.source_root {
            self.source_root = path;
        }
        if let Some(path) = file.publish_root {
            self.publish_root = path;
        }
        if let Some(limit) = file.json_limit_bytes {
            self.json_limit_bytes = limit;
        }
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn env_vars_override_defaults() {
        let config = AppConfig::from_vars(&vars(&[
            ("KERCKHOFF_PORT", "9000"),
            ("KERCKHOFF_DATABASE", "/tmp/k.sqlite"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/k.sqlite"));
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_vars(&vars(&[("KERCKHOFF_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "KERCKHOFF_PORT", .. }));
    }

    #[test]
    fn file_values_apply_before_env() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 7000, "source_root": "/srv/drive"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = AppConfig::from_vars(&vars(&[
            ("KERCKHOFF_CONFIG", &path),
            ("KERCKHOFF_PORT", "7001"),
        ]))
        .unwrap();
        assert_eq!(config.port, 7001);
        assert_eq!(config.source_root, PathBuf::from("/srv/drive"));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"prot": 7000}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let err = AppConfig::from_vars(&vars(&[("KERCKHOFF_CONFIG", &path)])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
