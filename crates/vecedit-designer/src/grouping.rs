//! Grouping engine.
//!
//! Grouping and ungrouping only change coordinate spaces: every shape keeps
//! its absolute position. A member's offset inside a group is its absolute
//! position minus the group origin, and ungrouping adds the origin back.

use vecedit_core::{CommandError, Result};

use crate::commands::{check_all, missing, GroupShapes, UngroupShapes};
use crate::model::{DesignGroup, DrawingObject, Point, Shape};
use crate::scene::Scene;

/// Members of a valid grouping request: distinct top-level shapes in input
/// order, at least two of them.
pub fn group_members(scene: &Scene, ids: &[u64]) -> Option<Vec<u64>> {
    let mut members: Vec<u64> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !scene.contains_top(id) {
            return None;
        }
        if !members.contains(&id) {
            members.push(id);
        }
    }
    (members.len() >= 2).then_some(members)
}

pub fn can_group(scene: &Scene, ids: &[u64]) -> bool {
    group_members(scene, ids).is_some()
}

/// Top-level origin that grouping `ids` would produce.
pub fn group_origin(scene: &Scene, ids: &[u64]) -> Option<Point> {
    let mut origin: Option<Point> = None;
    for &id in ids {
        let p = scene.get_top(id)?.position;
        origin = Some(match origin {
            Some(o) => Point::new(o.x.min(p.x), o.y.min(p.y)),
            None => p,
        });
    }
    origin
}

pub(crate) fn plan_group(scene: &mut Scene, ids: &[u64]) -> Option<GroupShapes> {
    let Some(members) = group_members(scene, ids) else {
        tracing::warn!("Ignoring group request for {:?}: need two top-level shapes", ids);
        return None;
    };

    let mut slots = Vec::with_capacity(members.len());
    let mut positions = Vec::with_capacity(members.len());
    for &id in &members {
        slots.push(scene.top_level_index(id)?);
        positions.push(scene.get_top(id)?.position);
    }

    Some(GroupShapes {
        ids: members,
        group_id: scene.generate_id(),
        slots,
        positions,
    })
}

pub(crate) fn plan_ungroup(scene: &Scene, group_id: u64) -> Option<UngroupShapes> {
    let Some(group) = scene.get_top(group_id).filter(|o| o.is_group()) else {
        tracing::warn!("Ignoring ungroup request: {} is not a top-level group", group_id);
        return None;
    };

    Some(UngroupShapes {
        group_id,
        position: group.position,
        child_ids: group.children().iter().map(|c| c.id).collect(),
        offsets: group.children().iter().map(|c| c.position).collect(),
    })
}

pub(crate) fn group(scene: &mut Scene, cmd: &GroupShapes, name: &str) -> Result<()> {
    check_all(scene, name, &cmd.ids)?;
    if scene.contains(cmd.group_id) {
        return Err(violation(name, format!("shape {} already exists", cmd.group_id)));
    }

    let origin = group_origin(scene, &cmd.ids).ok_or_else(|| missing(name, cmd.group_id))?;

    let mut slots: Vec<(usize, u64)> = cmd
        .ids
        .iter()
        .filter_map(|&id| scene.top_level_index(id).map(|index| (index, id)))
        .collect();
    let topmost = slots.iter().map(|&(index, _)| index).max().unwrap_or(0);
    slots.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    slots.dedup();

    let mut members = Vec::with_capacity(slots.len());
    for (_, id) in slots {
        if let Some((_, obj)) = scene.remove(id) {
            members.push(obj);
        }
    }

    let member_count = members.len();
    let children = cmd
        .ids
        .iter()
        .filter_map(|id| {
            let index = members.iter().position(|m| m.id == *id)?;
            let mut child = members.swap_remove(index);
            child.position = child.position - origin;
            child.selected = false;
            Some(child)
        })
        .collect();

    let mut group = DrawingObject::new(cmd.group_id, Shape::Group(DesignGroup::new(children)))
        .with_position(origin);
    group.selected = true;

    // The group takes the drawing slot of its topmost member
    let slot = (topmost + 1).saturating_sub(member_count);
    scene.clear_selection();
    scene.insert_top_at(slot, group);
    tracing::debug!("Grouped {:?} into {} at slot {}", cmd.ids, cmd.group_id, slot);
    Ok(())
}

pub(crate) fn undo_group(scene: &mut Scene, cmd: &GroupShapes, name: &str) -> Result<()> {
    let children = take_group_children(scene, cmd.group_id, &cmd.ids, name)?;

    let mut restored: Vec<(usize, DrawingObject)> = children
        .into_iter()
        .zip(cmd.slots.iter().zip(&cmd.positions))
        .map(|(mut child, (&slot, &position))| {
            child.position = position;
            child.selected = true;
            (slot, child)
        })
        .collect();
    restored.sort_unstable_by_key(|(slot, _)| *slot);

    for (slot, child) in restored {
        scene.insert_top_at(slot, child);
    }
    Ok(())
}

pub(crate) fn ungroup(scene: &mut Scene, cmd: &UngroupShapes, name: &str) -> Result<()> {
    let slot = scene
        .top_level_index(cmd.group_id)
        .ok_or_else(|| missing(name, cmd.group_id))?;
    let origin = scene
        .get_top(cmd.group_id)
        .map(|g| g.position)
        .unwrap_or_default();
    let children = take_group_children(scene, cmd.group_id, &cmd.child_ids, name)?;

    scene.clear_selection();
    for (i, mut child) in children.into_iter().enumerate() {
        child.position = origin + child.position;
        child.selected = true;
        scene.insert_top_at(slot + i, child);
    }
    tracing::debug!("Ungrouped {} into {:?}", cmd.group_id, cmd.child_ids);
    Ok(())
}

pub(crate) fn undo_ungroup(scene: &mut Scene, cmd: &UngroupShapes, name: &str) -> Result<()> {
    check_all(scene, name, &cmd.child_ids)?;
    if cmd.child_ids.len() != cmd.offsets.len() {
        return Err(violation(name, "offsets do not match children".to_string()));
    }

    let slot = cmd
        .child_ids
        .iter()
        .filter_map(|&id| scene.top_level_index(id))
        .min()
        .unwrap_or(0);

    let mut children = Vec::with_capacity(cmd.child_ids.len());
    for (&id, &offset) in cmd.child_ids.iter().zip(&cmd.offsets) {
        let (_, mut child) = scene.remove(id).ok_or_else(|| missing(name, id))?;
        child.position = offset;
        child.selected = false;
        children.push(child);
    }

    let mut group = DrawingObject::new(cmd.group_id, Shape::Group(DesignGroup::new(children)))
        .with_position(cmd.position);
    group.selected = true;
    scene.insert_top_at(slot, group);
    Ok(())
}

/// Removes a top-level group and returns its children, checking that they
/// are exactly `expected` in order.
fn take_group_children(
    scene: &mut Scene,
    group_id: u64,
    expected: &[u64],
    name: &str,
) -> Result<Vec<DrawingObject>> {
    let group = scene
        .get_top(group_id)
        .ok_or_else(|| missing(name, group_id))?;
    let Some(contents) = group.shape.as_group() else {
        return Err(violation(name, format!("shape {group_id} is not a group")));
    };
    let actual: Vec<u64> = contents.children.iter().map(|c| c.id).collect();
    if actual != expected {
        return Err(violation(
            name,
            format!("group {group_id} holds {actual:?}, expected {expected:?}"),
        ));
    }

    match scene.remove(group_id) {
        Some((_, DrawingObject { shape: Shape::Group(g), .. })) => Ok(g.children),
        _ => Err(missing(name, group_id)),
    }
}

fn violation(command: &str, reason: String) -> vecedit_core::Error {
    CommandError::InvariantViolation {
        command: command.to_string(),
        reason,
    }
    .into()
}
