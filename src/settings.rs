use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_log_level() -> String {
    crate::DEFAULT_LOG_LEVEL.to_string()
}

pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("javac-locator")
        .join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub java: JavaSettings,
    pub advanced: AdvancedSettings,
}

/// Overrides for values otherwise read from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaSettings {
    pub java_home: Option<PathBuf>,
    pub java_version: Option<String>,
    pub os_name: Option<String>,
    /// Searched after every `PATH` entry.
    pub extra_search_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedSettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

pub struct SettingsManager {
    settings: Settings,
    settings_path: PathBuf,
    dirty: bool,
}

impl SettingsManager {
    pub fn new(settings_path: PathBuf) -> Result<Self> {
        let mut manager = Self {
            settings: Settings::default(),
            settings_path,
            dirty: false,
        };

        manager.load()?;
        Ok(manager)
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn set_java_setting<T>(&mut self, setter: impl FnOnce(&mut JavaSettings) -> T) -> T {
        self.dirty = true;
        setter(&mut self.settings.java)
    }

    pub fn set_advanced_setting<T>(&mut self, setter: impl FnOnce(&mut AdvancedSettings) -> T) -> T {
        self.dirty = true;
        setter(&mut self.settings.advanced)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self.settings)?;
        std::fs::write(&self.settings_path, content)?;
        self.dirty = false;

        log::info!("Settings saved to {:?}", self.settings_path);
        Ok(())
    }

    /// A missing file leaves the defaults in place without writing one.
    pub fn load(&mut self) -> Result<()> {
        if !self.settings_path.exists() {
            log::debug!("No settings file at {:?}, using defaults", self.settings_path);
            self.settings = Settings::default();
            self.dirty = false;
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.settings_path)?;
        self.settings = toml::from_str(&content)?;
        self.validate()?;

        self.dirty = false;
        log::debug!("Settings loaded from {:?}", self.settings_path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let java = &self.settings.java;

        if java.java_home.as_ref().is_some_and(|home| home.as_os_str().is_empty()) {
            return Err(Error::Settings("java_home cannot be empty".to_string()));
        }

        if java.os_name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(Error::Settings("os_name cannot be empty".to_string()));
        }

        if java.java_version.as_ref().is_some_and(|v| v.trim().is_empty()) {
            return Err(Error::Settings("java_version cannot be empty".to_string()));
        }

        log::LevelFilter::from_str(&self.settings.advanced.log_level).map_err(|_| {
            Error::Settings(format!("Unknown log level: {}", self.settings.advanced.log_level))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");

        let manager = SettingsManager::new(path.clone()).unwrap();
        assert_eq!(manager.get(), &Settings::default());
        assert_eq!(manager.get().advanced.log_level, "info");
        assert!(!manager.is_dirty());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");

        let mut manager = SettingsManager::new(path.clone()).unwrap();
        manager.set_java_setting(|java| {
            java.java_home = Some(PathBuf::from("/opt/jdk17"));
            java.extra_search_paths = vec![PathBuf::from("/opt/tools/bin")];
        });
        manager.set_advanced_setting(|advanced| advanced.log_level = "debug".to_string());
        assert!(manager.is_dirty());
        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = SettingsManager::new(path).unwrap();
        assert_eq!(reloaded.get(), manager.get());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[java]\nos_name = \"Windows 10\"\n").unwrap();

        let manager = SettingsManager::new(path).unwrap();
        assert_eq!(manager.get().java.os_name.as_deref(), Some("Windows 10"));
        assert_eq!(manager.get().java.java_home, None);
        assert_eq!(manager.get().advanced.log_level, "info");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[advanced]\nlog_level = \"loud\"\n").unwrap();

        assert!(matches!(SettingsManager::new(path), Err(Error::Settings(_))));
    }

    #[test]
    fn test_malformed_file_is_toml_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[java\n").unwrap();

        assert!(matches!(SettingsManager::new(path), Err(Error::Toml(_))));
    }
}
