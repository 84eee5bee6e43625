use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Persistence for the client configuration (endpoints, retry policy,
/// upload rules). Read once at startup; endpoint candidates are derived
/// from the loaded value and never re-read per call.
pub trait ConfigStore: Send + Sync {
    /// Load the configuration, writing defaults first if none is stored.
    fn load(&self) -> Result<AppConfig, DomainError>;

    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    fn config_path(&self) -> PathBuf;

    /// Directory receiving rotated log files.
    fn logs_dir(&self) -> PathBuf;
}
