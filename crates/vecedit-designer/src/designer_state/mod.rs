//! Designer state manager for UI integration.
//!
//! Owns the scene, its history and the pointer tools, and is the one place a
//! front end (property inspector, toolbar, file menu) talks to.
//!
//! - `shapes`: delete, group, ungroup and selection helpers
//! - `properties`: style and position setters for the selection
//! - `file_io`: save/load operations

mod file_io;
mod properties;
mod shapes;

use std::path::PathBuf;

use vecedit_core::Result;
use vecedit_settings::config::EditorSettings;

use crate::commands::DesignerCommand;
use crate::history::History;
use crate::model::{Color, Point};
use crate::scene::Scene;
use crate::tools::{DrawingMode, PointerEvent, SessionConfig, ToolController};

/// Designer state for UI integration
#[derive(Debug, Clone)]
pub struct DesignerState {
    pub scene: Scene,
    pub history: History,
    pub tools: ToolController,
    pub settings: EditorSettings,
    pub session: SessionConfig,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
    pub design_name: String,
}

impl DesignerState {
    /// Creates a new designer state with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            scene: Scene::with_size(settings.canvas.width, settings.canvas.height),
            history: History::with_max_depth(settings.history.max_depth),
            tools: ToolController::new(),
            session: SessionConfig::from_settings(&settings),
            settings,
            current_file_path: None,
            is_modified: false,
            design_name: "Untitled".to_string(),
        }
    }

    /// Sets the drawing mode.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.tools.set_mode(mode);
    }

    /// Stroke color for shapes created from now on.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.session.stroke.color = color;
    }

    /// Stroke width for shapes created from now on, clamped to the limits.
    pub fn set_stroke_width(&mut self, width: u32) {
        self.session.stroke.width = self.settings.limits.clamp(width);
    }

    pub fn pointer_press(&mut self, event: PointerEvent) -> Result<()> {
        let revision = self.history.revision();
        let result = self
            .tools
            .press(&mut self.scene, &mut self.history, event, &self.session);
        self.track_changes(revision);
        result
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.tools.move_to(&mut self.scene, point);
    }

    pub fn pointer_release(&mut self, event: PointerEvent) -> Result<()> {
        let revision = self.history.revision();
        let result = self.tools.release(&mut self.scene, &mut self.history, event);
        self.track_changes(revision);
        result
    }

    /// Executes a command and records it for undo.
    pub fn push_command(&mut self, command: DesignerCommand) -> Result<()> {
        self.history.execute(command, &mut self.scene)?;
        self.is_modified = true;
        Ok(())
    }

    pub fn undo(&mut self) -> Result<bool> {
        let undone = self.history.undo(&mut self.scene)?;
        self.is_modified |= undone;
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool> {
        let redone = self.history.redo(&mut self.scene)?;
        self.is_modified |= redone;
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn track_changes(&mut self, revision: u64) {
        if self.history.revision() != revision {
            self.is_modified = true;
        }
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
