//! VecEdit Settings Crate
//!
//! Handles editor configuration: canvas size, default stroke style, history
//! depth and pointer hit tolerance, persisted as JSON or TOML.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{
    CanvasSettings, EditorSettings, HistorySettings, InteractionSettings, StrokeDefaults,
    StrokeLimits,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::SettingsManager;
