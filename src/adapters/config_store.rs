use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::{AppConfig, DomainError};
use crate::ports::ConfigStore;

const APP_DIR: &str = "VoxRelay";

/// TOML-based configuration store with OS-specific paths.
pub struct TomlConfigStore {
    config_dir: PathBuf,
    logs_dir: PathBuf,
}

impl TomlConfigStore {
    /// Store rooted in the OS configuration directory.
    /// - macOS: ~/Library/Application Support/VoxRelay/
    /// - Windows: %APPDATA%\VoxRelay\
    /// - Linux: ~/.config/VoxRelay/
    pub fn new() -> Result<Self, DomainError> {
        let config_dir = dirs::config_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or_else(|| DomainError::Config("Could not find configuration directory".to_string()))?;

        // Logs go to the local data dir where the platform has one.
        let logs_dir = dirs::data_local_dir()
            .map(|p| p.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| config_dir.join("logs"));

        fs::create_dir_all(&config_dir)?;
        info!(config_dir = ?config_dir, "ConfigStore initialized");

        Ok(Self {
            config_dir,
            logs_dir,
        })
    }

    /// Store keeping everything under `dir`.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            config_dir: dir.to_path_buf(),
            logs_dir: dir.join("logs"),
        }
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DomainError> {
        let path = self.config_path();

        if !path.exists() {
            info!(path = ?path, "Configuration file not found, writing defaults");
            let config = AppConfig::new();
            self.save(&config)?;
            return Ok(config);
        }

        debug!(path = ?path, "Loading configuration");
        let config: AppConfig = toml::from_str(&fs::read_to_string(&path)?)?;
        info!(path = ?path, "Configuration loaded");
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<(), DomainError> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, toml::to_string_pretty(config)?)?;
        info!(path = ?path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    fn logs_dir(&self) -> PathBuf {
        self.logs_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("voxrelay_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_store_paths() {
        let dir = temp_dir("paths");
        let store = TomlConfigStore::at(&dir);

        assert!(store.config_path().ends_with("config.toml"));
        assert!(store.logs_dir().ends_with("logs"));
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = temp_dir("defaults");
        let store = TomlConfigStore::at(&dir);

        let config = store.load().unwrap();
        assert_eq!(config, AppConfig::new());
        assert!(store.config_path().exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = temp_dir("roundtrip");
        let store = TomlConfigStore::at(&dir);

        let mut config = AppConfig::new();
        config.logging.level = "debug".to_string();
        config.retry.max_attempts = 5;
        config.endpoints.client_host = "studio.local".to_string();
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.retry.max_attempts, 5);
        assert_eq!(loaded.endpoints.client_host, "studio.local");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = temp_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[retry]\nmax_attempts = 1\n").unwrap();
        let store = TomlConfigStore::at(&dir);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.retry.max_attempts, 1);
        assert_eq!(loaded.retry.backoff_ms, 1000);
        assert_eq!(loaded.upload.max_file_size_bytes, 50 * 1024 * 1024);

        let _ = fs::remove_dir_all(&dir);
    }
}
