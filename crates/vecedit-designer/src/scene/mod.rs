//! Scene: the forest of top-level shapes and the current selection.
//!
//! Top-level order is draw order: later entries paint on top. Every mutation
//! publishes [`SceneEvent::SelectionChanged`] on the scene's event bus.

mod operations;

use vecedit_core::{EventBus, SceneEvent};

use crate::model::{Bounds, DrawingObject, Point};
use crate::selection_manager::SelectionManager;

/// Scene state owning the shape tree.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<DrawingObject>,
    selection: SelectionManager,
    next_id: u64,
    width: f64,
    height: f64,
    events: EventBus,
}

impl Scene {
    /// Creates an empty 800x600 scene.
    pub fn new() -> Self {
        Self::with_size(800.0, 600.0)
    }

    /// Creates a scene with specified canvas dimensions.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            objects: Vec::new(),
            selection: SelectionManager::new(),
            next_id: 1,
            width,
            height,
            events: EventBus::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Event bus carrying selection-changed notifications.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Sets the next ID to be generated.
    ///
    /// Never moves the counter below an identity already in the tree.
    pub fn set_next_id(&mut self, id: u64) {
        let floor = self.max_id().map_or(1, |max| max + 1);
        self.next_id = id.max(floor);
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Top-level objects in draw order.
    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    /// Returns the number of top-level shapes.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Appends a shape on top of the drawing order.
    pub fn add_top(&mut self, object: DrawingObject) {
        self.reserve_ids(&object);
        self.objects.push(object);
        self.selection.sync(&self.objects);
        self.notify_selection_changed();
    }

    /// Inserts a shape at a top-level slot, clamped to the current length.
    pub fn insert_top_at(&mut self, index: usize, object: DrawingObject) {
        self.reserve_ids(&object);
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        self.selection.sync(&self.objects);
        self.notify_selection_changed();
    }

    /// Removes a top-level shape, returning its former slot.
    ///
    /// A shape that is not a top-level member is left alone and `None` is
    /// returned.
    pub fn remove(&mut self, id: u64) -> Option<(usize, DrawingObject)> {
        let index = self.top_level_index(id)?;
        let object = self.objects.remove(index);
        self.selection.sync(&self.objects);
        self.notify_selection_changed();
        Some((index, object))
    }

    /// Selects a top-level shape; without `additive` the previous selection is
    /// cleared first.
    pub fn select(&mut self, id: u64, additive: bool) -> bool {
        let found = self.selection.select_id(&mut self.objects, id, additive);
        self.notify_selection_changed();
        found
    }

    /// Flips one shape's selection without touching the others.
    pub fn toggle_selection(&mut self, id: u64) -> Option<bool> {
        let state = self.selection.toggle(&mut self.objects, id);
        self.notify_selection_changed();
        state
    }

    pub fn deselect(&mut self, id: u64) {
        self.selection.deselect_id(&mut self.objects, id);
        self.notify_selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selection.deselect_all(&mut self.objects);
        self.notify_selection_changed();
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&mut self.objects);
        self.notify_selection_changed();
    }

    /// Marquee selection by strict bounds intersection.
    pub fn select_in_rect(&mut self, rect: &Bounds, additive: bool) -> Vec<u64> {
        let hit = self
            .selection
            .select_in_rect(&mut self.objects, rect, additive);
        self.notify_selection_changed();
        hit
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.objects.iter().any(|o| o.id == id && o.selected)
    }

    /// Selected top-level IDs in draw order.
    pub fn selected_ids(&self) -> Vec<u64> {
        SelectionManager::selected_ids(&self.objects)
    }

    pub fn selected_count(&self) -> usize {
        SelectionManager::selected_count(&self.objects)
    }

    /// The most recently selected shape, if still selected.
    pub fn primary_selection(&self) -> Option<&DrawingObject> {
        self.selection.primary_id().and_then(|id| self.get_top(id))
    }

    /// Returns the union bounding box of all selected shapes.
    /// Returns `None` when no shapes are selected.
    pub fn selection_bounds(&self) -> Option<Bounds> {
        self.objects
            .iter()
            .filter(|o| o.selected)
            .map(DrawingObject::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Topmost top-level shape hit by `point`.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<u64> {
        SelectionManager::hit_test(&self.objects, point, tolerance)
    }

    /// Replace the whole tree, e.g. after loading a document.
    pub fn replace_all(&mut self, objects: Vec<DrawingObject>) {
        self.objects = objects;
        self.selection = SelectionManager::new();
        self.selection.sync(&self.objects);
        let floor = self.max_id().map_or(1, |max| max + 1);
        self.next_id = floor;
        self.notify_selection_changed();
    }

    /// Removes every shape.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    pub(crate) fn notify_selection_changed(&self) {
        self.events.publish(SceneEvent::SelectionChanged {
            selected: self.selected_ids(),
        });
    }

    fn reserve_ids(&mut self, object: &DrawingObject) {
        if let Some(max) = object.ids().into_iter().max() {
            if max >= self.next_id {
                self.next_id = max + 1;
            }
        }
    }

    fn max_id(&self) -> Option<u64> {
        self.objects.iter().flat_map(|o| o.ids()).max()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
