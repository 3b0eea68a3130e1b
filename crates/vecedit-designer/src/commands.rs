//! Reversible scene mutations.
//!
//! Each command captures the state it needs to undo itself when it is
//! constructed. Multi-shape commands check every captured shape before
//! touching the scene, so they apply to all of them or to none.

use vecedit_core::{CommandError, Result};

use crate::grouping;
use crate::model::{Color, Colorable, DrawingObject, Point, ShapeType, StyleSnapshot};
use crate::scene::Scene;

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum DesignerCommand {
    AddShape(AddShape),
    DeleteShapes(DeleteShapes),
    MoveShapes(MoveShapes),
    ChangeColor(ChangeColor),
    ChangeStrokeWidth(ChangeStrokeWidth),
    GroupShapes(GroupShapes),
    UngroupShapes(UngroupShapes),
    CompositeCommand(CompositeCommand),
}

/// Several commands undone and redone as one step
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCommand {
    pub commands: Vec<DesignerCommand>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddShape {
    pub id: u64,
    pub kind: ShapeType,
    /// Some while the shape is off the scene
    pub object: Option<DrawingObject>,
    /// Slot the shape occupied when it was last undone
    pub index: Option<usize>,
}

impl AddShape {
    /// Adds a shape that is not yet in the scene.
    pub fn new(object: DrawingObject) -> Self {
        Self {
            id: object.id,
            kind: object.shape_type(),
            object: Some(object),
            index: None,
        }
    }

    /// Records a shape that a tool already placed in the scene.
    pub fn placed(object: &DrawingObject) -> Self {
        Self {
            id: object.id,
            kind: object.shape_type(),
            object: None,
            index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteShapes {
    pub ids: Vec<u64>,
    /// Removed shapes with their former slots, ascending by slot
    pub removed: Vec<(usize, DrawingObject)>,
}

impl DeleteShapes {
    pub fn new(ids: Vec<u64>) -> Self {
        Self {
            ids,
            removed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveShapes {
    pub ids: Vec<u64>,
    pub old_positions: Vec<Point>,
    pub new_positions: Vec<Point>,
}

impl MoveShapes {
    pub fn new(ids: Vec<u64>, old_positions: Vec<Point>, new_positions: Vec<Point>) -> Self {
        Self {
            ids,
            old_positions,
            new_positions,
        }
    }

    /// Captures current positions and moves every shape by the same offset.
    pub fn translate(scene: &Scene, ids: &[u64], dx: f64, dy: f64) -> Result<Self> {
        let name = plural("Move", ids.len());
        let old_positions = ids
            .iter()
            .map(|&id| top_level(scene, &name, id).map(|o| o.position))
            .collect::<Result<Vec<_>>>()?;
        let new_positions = old_positions
            .iter()
            .map(|p| Point::new(p.x + dx, p.y + dy))
            .collect();
        Ok(Self::new(ids.to_vec(), old_positions, new_positions))
    }

    pub fn is_noop(&self) -> bool {
        self.old_positions == self.new_positions
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeColor {
    pub ids: Vec<u64>,
    pub old_colors: Vec<StyleSnapshot<Color>>,
    pub new_color: Color,
}

impl ChangeColor {
    pub fn capture(scene: &Scene, ids: &[u64], new_color: Color) -> Result<Self> {
        let old_colors = ids
            .iter()
            .map(|&id| top_level(scene, "Change Color", id).map(|o| o.capture_colors()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ids: ids.to_vec(),
            old_colors,
            new_color,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeStrokeWidth {
    pub ids: Vec<u64>,
    pub old_widths: Vec<StyleSnapshot<u32>>,
    pub new_width: u32,
}

impl ChangeStrokeWidth {
    pub fn capture(scene: &Scene, ids: &[u64], new_width: u32) -> Result<Self> {
        let old_widths = ids
            .iter()
            .map(|&id| top_level(scene, "Change Stroke Width", id).map(|o| o.capture_widths()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ids: ids.to_vec(),
            old_widths,
            new_width,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupShapes {
    /// Members in child order
    pub ids: Vec<u64>,
    pub group_id: u64,
    /// Top-level slot of each member before grouping
    pub slots: Vec<usize>,
    /// Position of each member before grouping
    pub positions: Vec<Point>,
}

impl GroupShapes {
    /// Plans a grouping of top-level shapes.
    ///
    /// Returns `None` when fewer than two distinct top-level shapes are named;
    /// that request is ignored rather than treated as an error.
    pub fn new(scene: &mut Scene, ids: &[u64]) -> Option<Self> {
        grouping::plan_group(scene, ids)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UngroupShapes {
    pub group_id: u64,
    pub position: Point,
    pub child_ids: Vec<u64>,
    /// Child offsets inside the group
    pub offsets: Vec<Point>,
}

impl UngroupShapes {
    /// Returns `None` unless `group_id` is a top-level group.
    pub fn new(scene: &Scene, group_id: u64) -> Option<Self> {
        grouping::plan_ungroup(scene, group_id)
    }
}

impl DesignerCommand {
    /// Display name used for undo/redo labels.
    pub fn name(&self) -> String {
        match self {
            DesignerCommand::AddShape(cmd) => format!("Add {}", cmd.kind),
            DesignerCommand::DeleteShapes(cmd) => plural("Delete", cmd.ids.len()),
            DesignerCommand::MoveShapes(cmd) => plural("Move", cmd.ids.len()),
            DesignerCommand::ChangeColor(_) => "Change Color".to_string(),
            DesignerCommand::ChangeStrokeWidth(_) => "Change Stroke Width".to_string(),
            DesignerCommand::GroupShapes(cmd) => format!("Group {} Shapes", cmd.ids.len()),
            DesignerCommand::UngroupShapes(_) => "Ungroup".to_string(),
            DesignerCommand::CompositeCommand(cmd) => cmd.name.clone(),
        }
    }

    pub fn apply(&mut self, scene: &mut Scene) -> Result<()> {
        let name = self.name();
        match self {
            DesignerCommand::AddShape(cmd) => match cmd.object.take() {
                Some(obj) => {
                    match cmd.index.take() {
                        Some(index) => scene.insert_top_at(index, obj),
                        None => scene.add_top(obj),
                    }
                    Ok(())
                }
                // Placed by a tool before the command existed
                None if scene.contains_top(cmd.id) => Ok(()),
                None => Err(missing(&name, cmd.id)),
            },
            DesignerCommand::DeleteShapes(cmd) => {
                if !cmd.removed.is_empty() {
                    return Ok(());
                }
                let mut slots = cmd
                    .ids
                    .iter()
                    .map(|&id| {
                        scene
                            .top_level_index(id)
                            .map(|index| (index, id))
                            .ok_or_else(|| missing(&name, id))
                    })
                    .collect::<Result<Vec<_>>>()?;
                slots.sort_unstable_by(|a, b| b.0.cmp(&a.0));
                slots.dedup();

                let mut removed = Vec::with_capacity(slots.len());
                for (_, id) in slots {
                    if let Some(entry) = scene.remove(id) {
                        removed.push(entry);
                    }
                }
                removed.reverse();
                cmd.removed = removed;
                Ok(())
            }
            DesignerCommand::MoveShapes(cmd) => {
                set_positions(scene, &name, &cmd.ids, &cmd.new_positions)
            }
            DesignerCommand::ChangeColor(cmd) => {
                check_all(scene, &name, &cmd.ids)?;
                for &id in &cmd.ids {
                    scene.update_top(id, |obj| obj.set_stroke_color(cmd.new_color));
                }
                Ok(())
            }
            DesignerCommand::ChangeStrokeWidth(cmd) => {
                check_all(scene, &name, &cmd.ids)?;
                for &id in &cmd.ids {
                    scene.update_top(id, |obj| obj.set_stroke_width(cmd.new_width));
                }
                Ok(())
            }
            DesignerCommand::GroupShapes(cmd) => grouping::group(scene, cmd, &name),
            DesignerCommand::UngroupShapes(cmd) => grouping::ungroup(scene, cmd, &name),
            DesignerCommand::CompositeCommand(cmd) => {
                for i in 0..cmd.commands.len() {
                    if let Err(err) = cmd.commands[i].apply(scene) {
                        // Roll back the part that did apply
                        for done in cmd.commands[..i].iter_mut().rev() {
                            done.undo(scene)?;
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }

    pub fn undo(&mut self, scene: &mut Scene) -> Result<()> {
        let name = self.name();
        match self {
            DesignerCommand::AddShape(cmd) => {
                if cmd.object.is_some() {
                    return Ok(());
                }
                let (index, obj) = scene.remove(cmd.id).ok_or_else(|| missing(&name, cmd.id))?;
                cmd.object = Some(obj);
                cmd.index = Some(index);
                Ok(())
            }
            DesignerCommand::DeleteShapes(cmd) => {
                if cmd.removed.is_empty() {
                    return check_all(scene, &name, &cmd.ids);
                }
                for (index, obj) in cmd.removed.drain(..) {
                    scene.insert_top_at(index, obj);
                }
                Ok(())
            }
            DesignerCommand::MoveShapes(cmd) => {
                set_positions(scene, &name, &cmd.ids, &cmd.old_positions)
            }
            DesignerCommand::ChangeColor(cmd) => {
                check_all(scene, &name, &cmd.ids)?;
                for (&id, snapshot) in cmd.ids.iter().zip(&cmd.old_colors) {
                    scene.update_top(id, |obj| obj.restore_colors(snapshot));
                }
                Ok(())
            }
            DesignerCommand::ChangeStrokeWidth(cmd) => {
                check_all(scene, &name, &cmd.ids)?;
                for (&id, snapshot) in cmd.ids.iter().zip(&cmd.old_widths) {
                    scene.update_top(id, |obj| obj.restore_widths(snapshot));
                }
                Ok(())
            }
            DesignerCommand::GroupShapes(cmd) => grouping::undo_group(scene, cmd, &name),
            DesignerCommand::UngroupShapes(cmd) => grouping::undo_ungroup(scene, cmd, &name),
            DesignerCommand::CompositeCommand(cmd) => {
                let len = cmd.commands.len();
                for i in (0..len).rev() {
                    if let Err(err) = cmd.commands[i].undo(scene) {
                        for done in cmd.commands[i + 1..].iter_mut() {
                            done.apply(scene)?;
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }
}

pub(crate) fn missing(command: &str, id: u64) -> vecedit_core::Error {
    CommandError::MissingShape {
        command: command.to_string(),
        id,
    }
    .into()
}

pub(crate) fn check_all(scene: &Scene, command: &str, ids: &[u64]) -> Result<()> {
    match ids.iter().find(|&&id| !scene.contains_top(id)) {
        Some(&id) => Err(missing(command, id)),
        None => Ok(()),
    }
}

fn top_level<'a>(scene: &'a Scene, command: &str, id: u64) -> Result<&'a DrawingObject> {
    scene.get_top(id).ok_or_else(|| missing(command, id))
}

fn set_positions(scene: &mut Scene, command: &str, ids: &[u64], positions: &[Point]) -> Result<()> {
    if ids.len() != positions.len() {
        return Err(CommandError::InvariantViolation {
            command: command.to_string(),
            reason: format!("{} shapes but {} positions", ids.len(), positions.len()),
        }
        .into());
    }
    check_all(scene, command, ids)?;
    for (&id, &position) in ids.iter().zip(positions) {
        scene.set_position(id, position);
    }
    Ok(())
}

fn plural(verb: &str, count: usize) -> String {
    if count == 1 {
        format!("{verb} Shape")
    } else {
        format!("{verb} {count} Shapes")
    }
}
