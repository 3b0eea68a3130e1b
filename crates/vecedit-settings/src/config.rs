//! Configuration and settings management for VecEdit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Canvas dimensions for new documents
//! - Default stroke style for newly created shapes
//! - Stroke width limits enforced by the property inspector
//! - History depth
//! - Pointer interaction tolerances

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas size used for new documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Canvas width in scene units
    pub width: f64,
    /// Canvas height in scene units
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Stroke style applied to newly created shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeDefaults {
    /// Stroke color as `#rrggbb`
    pub stroke_color: String,
    /// Stroke width in whole units
    pub stroke_width: u32,
}

impl Default for StrokeDefaults {
    fn default() -> Self {
        Self {
            stroke_color: "#000000".to_string(),
            stroke_width: 2,
        }
    }
}

/// Range of stroke widths accepted by the property inspector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeLimits {
    pub min_stroke_width: u32,
    pub max_stroke_width: u32,
}

impl Default for StrokeLimits {
    fn default() -> Self {
        Self {
            min_stroke_width: 1,
            max_stroke_width: 50,
        }
    }
}

impl StrokeLimits {
    /// Clamp a requested width into the configured range
    ///
    /// Inverted limits resolve to the maximum. The result is never zero.
    pub fn clamp(&self, width: u32) -> u32 {
        width
            .max(self.min_stroke_width)
            .min(self.max_stroke_width)
            .max(1)
    }
}

/// Undo history settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable commands; `None` keeps everything
    pub max_depth: Option<usize>,
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Distance in scene units within which a press hits a shape's bounds
    pub hit_tolerance: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self { hit_tolerance: 3.0 }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub canvas: CanvasSettings,
    pub defaults: StrokeDefaults,
    pub limits: StrokeLimits,
    pub history: HistorySettings,
    pub interaction: InteractionSettings,
}

impl EditorSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let settings: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(invalid("canvas", "Canvas dimensions must be > 0"));
        }

        if !is_hex_color(&self.defaults.stroke_color) {
            return Err(invalid(
                "defaults.stroke_color",
                "Stroke color must be #rrggbb or 'black'",
            ));
        }

        if self.limits.min_stroke_width == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "limits.min_stroke_width".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.limits.min_stroke_width > self.limits.max_stroke_width {
            return Err(invalid(
                "limits",
                "Minimum stroke width exceeds maximum stroke width",
            ));
        }

        let width = self.defaults.stroke_width;
        if width < self.limits.min_stroke_width || width > self.limits.max_stroke_width {
            return Err(ConfigError::ValueOutOfRange {
                key: "defaults.stroke_width".to_string(),
                value: width.to_string(),
            }
            .into());
        }

        if self.history.max_depth == Some(0) {
            return Err(invalid("history.max_depth", "History depth must be > 0"));
        }

        if self.interaction.hit_tolerance < 0.0 {
            return Err(invalid(
                "interaction.hit_tolerance",
                "Hit tolerance must be >= 0",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn is_hex_color(value: &str) -> bool {
    if value.eq_ignore_ascii_case("black") {
        return true;
    }
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
