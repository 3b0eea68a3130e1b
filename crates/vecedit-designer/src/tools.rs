//! Pointer tool state machine.
//!
//! The controller turns press/move/release events (in scene coordinates) into
//! scene edits and history commands. The active [`DrawingMode`] is switched
//! from outside; the controller never changes it on its own.

use std::mem;

use vecedit_core::Result;
use vecedit_settings::config::EditorSettings;

use crate::commands::{AddShape, DesignerCommand, MoveShapes};
use crate::history::History;
use crate::model::{Bounds, Color, DrawingObject, Point, PrimitiveKind, Stroke};
use crate::scene::Scene;

/// Drawing modes for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    #[default]
    Select,
    Create(PrimitiveKind),
}

/// Style and interaction parameters handed to every tool transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub stroke: Stroke,
    pub hit_tolerance: f64,
}

impl SessionConfig {
    /// Builds the session from editor settings.
    ///
    /// An unparsable default color falls back to black.
    pub fn from_settings(settings: &EditorSettings) -> Self {
        let color = settings
            .defaults
            .stroke_color
            .parse::<Color>()
            .unwrap_or_else(|err| {
                tracing::warn!("Using black stroke: {}", err);
                Color::BLACK
            });
        Self {
            stroke: Stroke::new(color, settings.defaults.stroke_width.max(1)),
            hit_tolerance: settings.interaction.hit_tolerance,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift/Ctrl style "add to selection"
    pub additive: bool,
}

/// A pointer event in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub point: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    pub fn additive(mut self) -> Self {
        self.modifiers.additive = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Interaction {
    #[default]
    Idle,
    Dragging {
        start: Point,
        ids: Vec<u64>,
        origins: Vec<Point>,
    },
    Marquee {
        start: Point,
        current: Point,
        additive: bool,
    },
    Creating {
        id: u64,
        start: Point,
    },
}

/// Interprets pointer input for the current mode.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    mode: DrawingMode,
    interaction: Interaction,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// Switches mode. An interaction in progress still ends on its release.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        tracing::debug!("Drawing mode {:?}", mode);
        self.mode = mode;
    }

    pub fn is_idle(&self) -> bool {
        self.interaction == Interaction::Idle
    }

    /// Rubber-band rectangle while a marquee is being dragged.
    pub fn marquee(&self) -> Option<Bounds> {
        match &self.interaction {
            Interaction::Marquee { start, current, .. } => {
                Some(Bounds::from_corners(*start, *current))
            }
            _ => None,
        }
    }

    pub fn press(
        &mut self,
        scene: &mut Scene,
        history: &mut History,
        event: PointerEvent,
        config: &SessionConfig,
    ) -> Result<()> {
        if !self.is_idle() {
            tracing::debug!("Press during an interaction, releasing it first");
            self.release(scene, history, event)?;
        }

        let point = event.point;
        self.interaction = match self.mode {
            DrawingMode::Select => match scene.shape_at(point, config.hit_tolerance) {
                Some(id) if event.modifiers.additive => {
                    scene.toggle_selection(id);
                    Interaction::Idle
                }
                Some(id) => {
                    if !scene.is_selected(id) {
                        scene.select(id, false);
                    }
                    let ids = scene.selected_ids();
                    let origins = ids
                        .iter()
                        .filter_map(|&id| scene.get_top(id).map(|o| o.position))
                        .collect();
                    Interaction::Dragging {
                        start: point,
                        ids,
                        origins,
                    }
                }
                None => Interaction::Marquee {
                    start: point,
                    current: point,
                    additive: event.modifiers.additive,
                },
            },
            DrawingMode::Create(kind) => {
                let id = scene.generate_id();
                scene.add_top(
                    DrawingObject::new(id, kind.create(config.stroke)).with_position(point),
                );
                tracing::debug!("Started {} {} at ({}, {})", kind, id, point.x, point.y);
                Interaction::Creating { id, start: point }
            }
        };
        Ok(())
    }

    pub fn move_to(&mut self, scene: &mut Scene, point: Point) {
        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::Dragging {
                start,
                ids,
                origins,
            } => {
                let delta = point - *start;
                for (&id, &origin) in ids.iter().zip(origins.iter()) {
                    scene.set_position(id, origin + delta);
                }
            }
            Interaction::Marquee { current, .. } => *current = point,
            Interaction::Creating { id, start } => {
                scene.update_geometry(*id, Point::default(), point - *start);
            }
        }
    }

    pub fn release(
        &mut self,
        scene: &mut Scene,
        history: &mut History,
        event: PointerEvent,
    ) -> Result<()> {
        let point = event.point;
        match mem::take(&mut self.interaction) {
            Interaction::Idle => Ok(()),
            Interaction::Dragging {
                start,
                ids,
                origins,
            } => {
                let delta = point - start;
                let targets: Vec<Point> = origins.iter().map(|&o| o + delta).collect();
                for (&id, &target) in ids.iter().zip(&targets) {
                    scene.set_position(id, target);
                }
                let cmd = MoveShapes::new(ids, origins, targets);
                if cmd.is_noop() {
                    return Ok(());
                }
                history.execute(DesignerCommand::MoveShapes(cmd), scene)
            }
            Interaction::Marquee {
                start, additive, ..
            } => {
                let rect = Bounds::from_corners(start, point);
                let additive = additive || event.modifiers.additive;
                let hits = scene.select_in_rect(&rect, additive);
                tracing::debug!("Marquee selected {:?}", hits);
                Ok(())
            }
            Interaction::Creating { id, start } => {
                scene.update_geometry(id, Point::default(), point - start);
                match scene.get_top(id).map(AddShape::placed) {
                    Some(cmd) => history.execute(DesignerCommand::AddShape(cmd), scene),
                    None => {
                        tracing::warn!("Created shape {} vanished before release", id);
                        Ok(())
                    }
                }
            }
        }
    }
}
