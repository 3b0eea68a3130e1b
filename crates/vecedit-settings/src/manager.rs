//! Settings manager
//!
//! Owns the active [`EditorSettings`] and the file they were read from.

use crate::config::EditorSettings;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vecedit";
const CONFIG_FILE: &str = "settings.json";

/// Loads, holds and saves editor settings
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    settings: EditorSettings,
    path: Option<PathBuf>,
}

impl SettingsManager {
    /// Create a manager holding default settings and no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config path, e.g. `~/.config/vecedit/settings.json` on Linux
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load settings from a JSON or TOML file
    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let settings = EditorSettings::load_from_file(path)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(Self {
            settings,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load settings from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self {
                settings: EditorSettings::default(),
                path: Some(path.to_path_buf()),
            })
        }
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&mut self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        self.settings.save_to_file(path)?;
        tracing::info!("Saved settings to {}", path.display());
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save settings back to the file they were loaded from
    pub fn save(&mut self) -> SettingsResult<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| SettingsError::SaveError("no settings file selected".to_string()))?;
        self.save_to(&path)
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the settings after validating them
    pub fn update(&mut self, settings: EditorSettings) -> SettingsResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }
}
