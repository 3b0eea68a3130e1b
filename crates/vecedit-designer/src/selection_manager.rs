use crate::model::{Bounds, DrawingObject, Point};

/// Manages shape selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Tracking which shape is the "primary" selected shape
/// - Handling point-based selection (clicking on shapes)
/// - Handling rectangle-based selection (marquee)
/// - Multi-select operations (additive modifier)
///
/// # Selection Model
///
/// - **Primary Selection**: One shape is designated as the "primary" selection (stored in `primary_id`)
/// - **Multiple Selection**: Multiple shapes can have their `selected` flag set to `true`
/// - **Atomic Groups**: Only top-level objects carry a selection flag. Selecting a
///   group selects it as one unit; its children are never individually selected.
///
/// # Design
///
/// The manager works on the scene's top-level slice, in draw order
/// (bottom-most first). It does not emit notifications itself; the
/// [`Scene`](crate::scene::Scene) does that after every call.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the primary selected shape, if any
    primary_id: Option<u64>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecedit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.primary_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { primary_id: None }
    }

    /// Returns the ID of the primary selected shape.
    ///
    /// # Returns
    ///
    /// `Some(id)` if a shape is selected, `None` otherwise.
    pub fn primary_id(&self) -> Option<u64> {
        self.primary_id
    }

    /// Deselects all shapes and clears the primary selection.
    ///
    /// # Arguments
    ///
    /// * `objects` - The top-level objects to deselect
    pub fn deselect_all(&mut self, objects: &mut [DrawingObject]) {
        for obj in objects.iter_mut() {
            obj.selected = false;
        }
        self.primary_id = None;
    }

    /// Selects all shapes.
    ///
    /// Sets the primary selection to the topmost (last in draw order) shape.
    ///
    /// # Arguments
    ///
    /// * `objects` - The top-level objects to select
    pub fn select_all(&mut self, objects: &mut [DrawingObject]) {
        for obj in objects.iter_mut() {
            obj.selected = true;
        }
        self.primary_id = objects.last().map(|o| o.id);
    }

    /// Selects a shape by ID.
    ///
    /// # Arguments
    ///
    /// * `objects` - The top-level objects to select from
    /// * `id` - The ID of the shape to select
    /// * `additive` - If `true`, adds to the existing selection; if `false`, replaces it
    ///
    /// # Returns
    ///
    /// `true` if `id` names a top-level object.
    pub fn select_id(&mut self, objects: &mut [DrawingObject], id: u64, additive: bool) -> bool {
        if !additive {
            self.deselect_all(objects);
        }

        match objects.iter_mut().find(|o| o.id == id) {
            Some(obj) => {
                obj.selected = true;
                self.primary_id = Some(id);
                true
            }
            None => false,
        }
    }

    /// Toggles a single shape's selection, leaving every other shape untouched.
    ///
    /// # Returns
    ///
    /// The new selection state of the shape, or `None` if `id` is not a
    /// top-level object.
    pub fn toggle(&mut self, objects: &mut [DrawingObject], id: u64) -> Option<bool> {
        let obj = objects.iter_mut().find(|o| o.id == id)?;
        obj.selected = !obj.selected;
        let now_selected = obj.selected;

        if now_selected {
            self.primary_id = Some(id);
        } else if self.primary_id == Some(id) {
            // Fall back to the topmost remaining selected shape
            self.primary_id = objects.iter().rev().find(|o| o.selected).map(|o| o.id);
        }
        Some(now_selected)
    }

    /// Removes one shape from the selection.
    pub fn deselect_id(&mut self, objects: &mut [DrawingObject], id: u64) {
        if let Some(obj) = objects.iter_mut().find(|o| o.id == id) {
            obj.selected = false;
        }
        if self.primary_id == Some(id) {
            self.primary_id = objects.iter().rev().find(|o| o.selected).map(|o| o.id);
        }
    }

    /// Finds the topmost shape whose bounds contain the given point.
    ///
    /// Hit testing uses axis-aligned bounds only.
    ///
    /// # Arguments
    ///
    /// * `objects` - The top-level objects to search
    /// * `point` - The point to test, in scene coordinates
    /// * `tolerance` - Distance outside the bounds still counted as a hit
    pub fn hit_test(objects: &[DrawingObject], point: Point, tolerance: f64) -> Option<u64> {
        objects
            .iter()
            .rev()
            .find(|o| o.bounds().contains_point(point, tolerance))
            .map(|o| o.id)
    }

    /// Selects all shapes whose bounds intersect the given rectangle.
    ///
    /// # Arguments
    ///
    /// * `objects` - The top-level objects to select from
    /// * `rect` - Selection rectangle in scene coordinates
    /// * `additive` - If `true`, adds to the existing selection; if `false`, replaces it
    ///
    /// # Returns
    ///
    /// The IDs of the shapes hit by the rectangle, in draw order.
    pub fn select_in_rect(
        &mut self,
        objects: &mut [DrawingObject],
        rect: &Bounds,
        additive: bool,
    ) -> Vec<u64> {
        if !additive {
            self.deselect_all(objects);
        }

        let mut hit = Vec::new();
        for obj in objects.iter_mut() {
            if obj.bounds().intersects(rect) {
                obj.selected = true;
                hit.push(obj.id);
            }
        }

        if let Some(&last) = hit.last() {
            if self.primary_id.is_none() {
                self.primary_id = Some(last);
            }
        }
        hit
    }

    /// Returns the IDs of the selected shapes in draw order.
    pub fn selected_ids(objects: &[DrawingObject]) -> Vec<u64> {
        objects.iter().filter(|o| o.selected).map(|o| o.id).collect()
    }

    /// Returns the number of currently selected shapes.
    pub fn selected_count(objects: &[DrawingObject]) -> usize {
        objects.iter().filter(|o| o.selected).count()
    }

    /// Drops the primary selection if that shape is no longer selected.
    pub(crate) fn sync(&mut self, objects: &[DrawingObject]) {
        let still_selected = self
            .primary_id
            .is_some_and(|id| objects.iter().any(|o| o.id == id && o.selected));
        if !still_selected {
            self.primary_id = objects.iter().rev().find(|o| o.selected).map(|o| o.id);
        }
    }
}
