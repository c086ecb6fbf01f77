// Global configuration for the properties database
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default file name of the database archive inside the data directory
pub const DEFAULT_DATABASE_FILE_NAME: &str = "database.json";

// Global configuration for database location and lookup policy
pub static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::new()));

/// Global configuration container for the properties database.
///
/// The configuration names the directory holding the data files and the
/// database archive, and the default temperature policy used by the
/// convenience lookups (exact match or nearest match).
///
/// A single global instance is exposed via the `CONFIG` static (a
/// `Lazy<Mutex<Config>>`). Most code should obtain a guard with
/// [`Config::global`] rather than accessing the mutex directly.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the data files and the database archive.
    pub data_directory: Option<PathBuf>,
    /// File name of the database archive inside `data_directory`.
    pub database_file_name: String,
    /// Require an exact evaluation temperature in convenience lookups.
    pub require_exact_temperature: bool,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Config {
            data_directory: None,
            database_file_name: DEFAULT_DATABASE_FILE_NAME.to_string(),
            require_exact_temperature: false,
        }
    }

    /// Set the directory holding the data files
    pub fn set_data_directory(&mut self, directory: impl AsRef<Path>) {
        self.data_directory = Some(directory.as_ref().to_path_buf());
    }

    /// Set the database archive file name (relative to the data directory)
    pub fn set_database_file_name(&mut self, file_name: impl AsRef<str>) {
        self.database_file_name = file_name.as_ref().to_string();
    }

    /// Full path of the database archive, if a data directory is set
    pub fn database_path(&self) -> Option<PathBuf> {
        self.data_directory
            .as_ref()
            .map(|directory| directory.join(&self.database_file_name))
    }

    /// Restore the default values
    pub fn clear(&mut self) {
        *self = Config::new();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Get the global configuration instance
    pub fn global() -> std::sync::MutexGuard<'static, Self> {
        CONFIG
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.database_file_name, "database.json");
        assert!(config.data_directory.is_none());
        assert!(!config.require_exact_temperature);
        assert_eq!(config.database_path(), None);
    }

    #[test]
    fn test_database_path_joins_directory() {
        let mut config = Config::new();
        config.set_data_directory("/data/nuclear");
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/data/nuclear/database.json"))
        );
        config.set_database_file_name("props.json");
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/data/nuclear/props.json"))
        );
    }

    #[test]
    fn test_clear_restores_defaults() {
        let mut config = Config::new();
        config.set_data_directory("/tmp");
        config.require_exact_temperature = true;
        config.clear();
        assert!(config.data_directory.is_none());
        assert!(!config.require_exact_temperature);
    }
}
