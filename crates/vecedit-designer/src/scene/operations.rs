//! Tree queries and in-place shape edits for [`Scene`].

use super::Scene;
use crate::model::{Bounds, DrawingObject, Movable, Point};

impl Scene {
    /// Gets a top-level shape by ID.
    pub fn get_top(&self, id: u64) -> Option<&DrawingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Slot of a top-level shape in draw order.
    pub fn top_level_index(&self, id: u64) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn contains_top(&self, id: u64) -> bool {
        self.top_level_index(id).is_some()
    }

    /// Finds a shape anywhere in the tree.
    pub fn find(&self, id: u64) -> Option<&DrawingObject> {
        self.objects.iter().find_map(|o| o.find(id))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    /// Chain of IDs from a top-level shape down to `id` inclusive.
    pub fn path_to(&self, id: u64) -> Option<Vec<u64>> {
        fn walk(obj: &DrawingObject, id: u64, path: &mut Vec<u64>) -> bool {
            path.push(obj.id);
            if obj.id == id || obj.children().iter().any(|c| walk(c, id, path)) {
                return true;
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        self.objects
            .iter()
            .any(|o| walk(o, id, &mut path))
            .then_some(path)
    }

    /// ID of the group directly containing `id`, or `None` for top-level
    /// shapes and unknown IDs.
    pub fn parent_of(&self, id: u64) -> Option<u64> {
        let path = self.path_to(id)?;
        path.len()
            .checked_sub(2)
            .and_then(|i| path.get(i).copied())
    }

    /// Position of a shape in scene coordinates: its own offset plus the
    /// absolute position of every enclosing group.
    pub fn absolute_position(&self, id: u64) -> Option<Point> {
        fn walk(obj: &DrawingObject, id: u64, parent_abs: Point) -> Option<Point> {
            let abs = parent_abs + obj.position;
            if obj.id == id {
                return Some(abs);
            }
            obj.children().iter().find_map(|c| walk(c, id, abs))
        }

        self.objects
            .iter()
            .find_map(|o| walk(o, id, Point::default()))
    }

    /// Bounds of a shape in scene coordinates.
    pub fn absolute_bounds(&self, id: u64) -> Option<Bounds> {
        let object = self.find(id)?;
        let abs = self.absolute_position(id)?;
        Some(object.shape.bounds().translate(abs))
    }

    /// Moves a top-level shape to a new offset.
    pub fn set_position(&mut self, id: u64, position: Point) -> bool {
        self.update_top(id, |obj| obj.set_position(position))
            .is_some()
    }

    /// Re-derives a top-level primitive's local geometry from two corners.
    pub fn update_geometry(&mut self, id: u64, p1: Point, p2: Point) -> bool {
        self.update_top(id, |obj| obj.shape.update_geometry(p1, p2))
            .unwrap_or(false)
    }

    /// Applies an edit to a top-level shape and notifies observers.
    ///
    /// Returns `None` when `id` is not a top-level shape.
    pub fn update_top<R>(&mut self, id: u64, f: impl FnOnce(&mut DrawingObject) -> R) -> Option<R> {
        let obj = self.objects.iter_mut().find(|o| o.id == id)?;
        let result = f(obj);
        self.notify_selection_changed();
        Some(result)
    }
}
