//! Configuration file loading.
//!
//! ```toml
//! [accounts.demo]
//! name = "Demo account"
//! login = 5001
//! password = "..."
//! server = "Demo-Server"
//! path = "/path/to/terminal"
//!
//! [export]
//! format = "csv"
//! output_dir = "."
//!
//! [logging]
//! level = "info"
//! dir = "logs"
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tickgetter_lib::AccountBook;

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) accounts: AccountBook,
    pub(crate) export: ExportConfig,
    pub(crate) logging: LoggingConfig,
}

/// Defaults for the fetch command's export step.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct ExportConfig {
    pub(crate) format: String,
    pub(crate) output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Log filter and log file location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    pub(crate) level: String,
    pub(crate) dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Returns `<config dir>/tickgetter/config.toml`, or `./config.toml`
    /// when no home directory is known.
    pub(crate) fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "tickgetter").map_or_else(
            || PathBuf::from(CONFIG_FILE),
            |dirs| dirs.config_dir().join(CONFIG_FILE),
        )
    }

    /// Loads the config from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[accounts.Demo]
name = "Demo account"
login = 5001
password = "demo-pass"
server = "Demo-Server"
path = "/opt/archive"

[export]
format = "xlsx"
output_dir = "/tmp/out"

[logging]
level = "debug"
dir = "/var/log/tickgetter"
"#;

    #[test]
    fn test_parse_full() {
        let config: Config = toml::from_str(FULL).unwrap();

        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts.get("demo").unwrap().login, 5001);
        assert_eq!(config.export.format, "xlsx");
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.dir, PathBuf::from("/var/log/tickgetter"));
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("[export]\nformat = \"json\"\n").unwrap();

        assert!(config.accounts.is_empty());
        assert_eq!(config.export.format, "json");
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, FULL).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.export.format, "xlsx");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export\nformat = 1").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
