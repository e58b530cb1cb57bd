use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Store configuration, matching the `[store]` table of the agent's
/// TOML configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Filesystem path of the `SQLite` database file.
    pub path: PathBuf,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    /// Whether to request WAL journaling on open.
    pub wal: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("twinmeta.db"),
            busy_timeout_ms: 5_000,
            wal: true,
        }
    }
}

/// Wrapper for the TOML file layout: `[store]` section only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    store: Option<StoreConfig>,
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    ///
    /// A file without a `[store]` section yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Invalid(format!("{}: {e}", path.display())))?;
        Self::parse(&raw)
    }

    /// Parse configuration from TOML text.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = file.store.unwrap_or_default();
        if config.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store.path must not be empty".into()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("twinmeta.db"));
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(config.wal);
    }

    #[test]
    fn parses_store_section() {
        let config = StoreConfig::parse(
            r#"
            [store]
            path = "/var/lib/agent/twin.db"
            busy_timeout_ms = 250
            wal = false
            "#,
        )
        .unwrap();
        assert_eq!(config.path, PathBuf::from("/var/lib/agent/twin.db"));
        assert_eq!(config.busy_timeout_ms, 250);
        assert!(!config.wal);
    }

    #[test]
    fn missing_section_falls_back_to_defaults() {
        let config = StoreConfig::parse("[other]\nx = 1\n").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = StoreConfig::parse("[store]\npath = \"\"\nbusy_timeout_ms = 1\nwal = true\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = StoreConfig::load(Path::new("/nonexistent/twinmeta.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
