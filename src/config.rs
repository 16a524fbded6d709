//! Application configuration.

use crate::consts::cli_consts::refresh::{CALL_REFRESH_DELAY_MS, POLL_INTERVAL_SECS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

/// Get the path to the dashboard config file, typically located at ~/.collections/config.json.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    let config_path = home_path.join(".collections").join("config.json");
    Ok(config_path)
}

fn default_poll_interval_secs() -> u64 {
    POLL_INTERVAL_SECS
}

fn default_call_refresh_delay_ms() -> u64 {
    CALL_REFRESH_DELAY_MS
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the backend. Empty means the local default.
    #[serde(default)]
    pub api_url: String,

    /// Seconds between customer list polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Milliseconds to wait after an accepted call before refreshing.
    #[serde(default = "default_call_refresh_delay_ms")]
    pub call_refresh_delay_ms: u64,

    /// Paint a dark background behind the dashboard.
    #[serde(default)]
    pub with_background_color: bool,

    /// Seconds between agent roster refreshes. `None` loads the roster once per session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_refresh_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            poll_interval_secs: POLL_INTERVAL_SECS,
            call_refresh_delay_ms: CALL_REFRESH_DELAY_MS,
            with_background_color: false,
            agent_refresh_secs: None,
        }
    }
}

impl Config {
    /// Create Config pointing at the given backend URL.
    pub fn new(api_url: String) -> Self {
        Config {
            api_url,
            ..Default::default()
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Remove the config file, if present.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        // A zero interval would spin the poll loop.
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn call_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.call_refresh_delay_ms)
    }

    pub fn agent_refresh_interval(&self) -> Option<Duration> {
        self.agent_refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::new("http://10.1.2.3:8000".to_string());
        config.agent_refresh_secs = Some(600);
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::default();
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config1 = Config::new("http://first:8000".to_string());
        config1.save(&path).unwrap();

        let config2 = Config::new("http://second:8000".to_string());
        config2.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // Missing fields fall back to the documented defaults.
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_url": "http://backend:8000"}"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.api_url, "http://backend:8000");
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.call_refresh_delay(), Duration::from_millis(2_000));
        assert_eq!(config.agent_refresh_interval(), None);
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save(&path).unwrap();

        Config::clear(&path).unwrap();
        assert!(!path.exists());
        assert!(Config::clear(&path).is_ok());
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }
}
