//! # VecEdit
//!
//! A vector drawing editor core: nestable shapes, undoable commands,
//! position-preserving grouping and a pointer tool state machine.
//!
//! ## Architecture
//!
//! VecEdit is organized as a workspace with multiple crates:
//!
//! 1. **vecedit-core** - Error types and the scene event bus
//! 2. **vecedit-settings** - Editor configuration (JSON/TOML)
//! 3. **vecedit-designer** - Shape model, scene, commands, history, grouping,
//!    serialization and tools
//! 4. **vecedit** - This crate: logging setup and the command-line front end

pub mod cli;

pub use vecedit_core::{
    CommandError, DocumentError, Error, EventBus, EventCategory, EventFilter, GeometryError,
    Result, SceneEvent,
};
pub use vecedit_designer as designer;
pub use vecedit_designer::{
    DesignFile, DesignerState, DrawingMode, DrawingObject, History, Point, PointerEvent,
    PrimitiveKind, Scene, Shape, ShapeType,
};
pub use vecedit_settings::{config::EditorSettings, manager::SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
