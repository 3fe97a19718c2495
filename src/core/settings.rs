//! Application settings management

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Daemon
    /// Address the process manager daemon listens on
    pub listen_address: String,
    /// Port the process manager daemon listens on
    pub listen_port: u16,

    // Sync
    /// Poll interval in ms
    pub poll_interval_ms: u64,
    /// Per-request timeout in ms
    pub request_timeout_ms: u64,
    /// Drop the selection when its server disappears from the daemon config
    pub clear_selection_on_removal: bool,

    // Appearance
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1".to_string(),
            listen_port: 6969,
            poll_interval_ms: 1000,
            request_timeout_ms: 5000,
            clear_selection_on_removal: true,
            theme: Theme::Dark,
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("procmgr-dashboard").join("settings.json"))
    }

    /// Load settings from `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Creating default settings file at {:?}", path);
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read settings from {:?}", path))?;
        let mut settings: Self = serde_json::from_str(&content)
            .context(format!("Failed to parse settings in {:?}", path))?;
        settings.validate();
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(self)?;
        std::fs::write(path, encoded).context(format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    /// Validate settings and fix any invalid values
    pub fn validate(&mut self) {
        self.poll_interval_ms = self.poll_interval_ms.max(100);
        self.request_timeout_ms = self.request_timeout_ms.max(100);
        if self.listen_address.trim().is_empty() {
            self.listen_address = Self::default().listen_address;
        }
    }

    /// Base URL of the daemon's HTTP API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.listen_address, self.listen_port)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_daemon() {
        let settings = Settings::default();
        assert_eq!(settings.base_url(), "http://127.0.0.1:6969");
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings::load_or_create(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert_eq!(Settings::load_or_create(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"listen_address": "10.0.0.5", "listen_port": 7000, "poll_interval_ms": 5}"#,
        )
        .unwrap();

        let settings = Settings::load_or_create(&path).unwrap();

        assert_eq!(settings.base_url(), "http://10.0.0.5:7000");
        assert_eq!(settings.poll_interval_ms, 100);
        assert_eq!(settings.request_timeout_ms, 5000);
        assert!(settings.clear_selection_on_removal);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Settings::load_or_create(&path).is_err());
    }
}
