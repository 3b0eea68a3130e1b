//! Property setters for the selected shapes, as used by an inspector.

use vecedit_core::Result;

use super::DesignerState;
use crate::commands::{ChangeColor, ChangeStrokeWidth, DesignerCommand, MoveShapes};
use crate::model::{Color, Colorable, Point};

impl DesignerState {
    /// Style of the primary selection as (color, stroke width).
    pub fn selected_style(&self) -> Option<(Color, u32)> {
        self.scene
            .primary_selection()
            .map(|o| (o.stroke_color(), o.stroke_width()))
    }

    pub fn set_selected_color(&mut self, color: Color) -> Result<bool> {
        let ids = self.scene.selected_ids();
        if ids.is_empty() {
            return Ok(false);
        }
        let cmd = ChangeColor::capture(&self.scene, &ids, color)?;
        self.push_command(DesignerCommand::ChangeColor(cmd))?;
        Ok(true)
    }

    /// Sets the stroke width of every selected shape, clamped to the
    /// configured limits.
    pub fn set_selected_stroke_width(&mut self, width: u32) -> Result<bool> {
        let ids = self.scene.selected_ids();
        if ids.is_empty() {
            return Ok(false);
        }
        let width = self.settings.limits.clamp(width);
        let cmd = ChangeStrokeWidth::capture(&self.scene, &ids, width)?;
        self.push_command(DesignerCommand::ChangeStrokeWidth(cmd))?;
        Ok(true)
    }

    /// Moves the primary selection to `(x, y)`, carrying the rest of the
    /// selection along by the same offset.
    pub fn set_selected_position(&mut self, x: f64, y: f64) -> Result<bool> {
        let Some(primary) = self.scene.primary_selection() else {
            return Ok(false);
        };
        let delta = Point::new(x, y) - primary.position;
        let ids = self.scene.selected_ids();
        let cmd = MoveShapes::translate(&self.scene, &ids, delta.x, delta.y)?;
        if cmd.is_noop() {
            return Ok(false);
        }
        self.push_command(DesignerCommand::MoveShapes(cmd))?;
        Ok(true)
    }
}
