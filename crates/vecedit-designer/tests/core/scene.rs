use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vecedit_core::{EventCategory, EventFilter, SceneEvent};
use vecedit_designer::{Bounds, Point, Scene};

use crate::support::{line_at, rect_at, top_ids};

#[test]
fn test_scene_creation() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.width(), 800.0);
    assert_eq!(scene.height(), 600.0);
    assert_eq!(scene.next_id(), 1);
}

#[test]
fn test_add_and_remove_keep_draw_order() {
    let mut scene = Scene::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let c = rect_at(&mut scene, 40.0, 0.0, 10.0, 10.0);
    assert_eq!(top_ids(&scene), vec![a, b, c]);

    let (slot, removed) = scene.remove(b).unwrap();
    assert_eq!(slot, 1);
    assert_eq!(removed.id, b);
    assert_eq!(top_ids(&scene), vec![a, c]);

    scene.insert_top_at(slot, removed);
    assert_eq!(top_ids(&scene), vec![a, b, c]);
}

#[test]
fn test_remove_non_member_is_noop() {
    let mut scene = Scene::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    assert!(scene.remove(a + 100).is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_select_additive_and_replace() {
    let mut scene = Scene::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 20.0, 0.0, 10.0, 10.0);

    assert!(scene.select(a, false));
    assert!(scene.select(b, true));
    assert_eq!(scene.selected_ids(), vec![a, b]);

    scene.select(b, false);
    assert_eq!(scene.selected_ids(), vec![b]);

    scene.clear_selection();
    assert_eq!(scene.selected_count(), 0);
    assert!(!scene.select(999, false));
}

#[test]
fn test_selection_bounds_union() {
    let mut scene = Scene::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = line_at(&mut scene, 50.0, 20.0, 10.0, -5.0);
    assert!(scene.selection_bounds().is_none());

    scene.select(a, false);
    scene.select(b, true);
    assert_eq!(
        scene.selection_bounds(),
        Some(Bounds::new(0.0, 0.0, 60.0, 20.0))
    );
}

#[test]
fn test_shape_at_picks_topmost() {
    let mut scene = Scene::new();
    let _below = rect_at(&mut scene, 0.0, 0.0, 50.0, 50.0);
    let above = rect_at(&mut scene, 25.0, 25.0, 50.0, 50.0);

    assert_eq!(scene.shape_at(Point::new(30.0, 30.0), 0.0), Some(above));
    assert_eq!(scene.shape_at(Point::new(200.0, 200.0), 3.0), None);
    assert_eq!(scene.shape_at(Point::new(77.0, 77.0), 3.0), Some(above));
}

#[test]
fn test_select_in_rect() {
    let mut scene = Scene::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 100.0, 0.0, 10.0, 10.0);
    let c = rect_at(&mut scene, 200.0, 0.0, 10.0, 10.0);

    let hit = scene.select_in_rect(&Bounds::new(-5.0, -5.0, 105.0, 5.0), false);
    assert_eq!(hit, vec![a, b]);

    scene.select_in_rect(&Bounds::new(195.0, -5.0, 215.0, 5.0), true);
    assert_eq!(scene.selected_ids(), vec![a, b, c]);

    scene.select_in_rect(&Bounds::new(195.0, -5.0, 215.0, 5.0), false);
    assert_eq!(scene.selected_ids(), vec![c]);
}

#[test]
fn test_ids_stay_unique_after_replace() {
    let mut scene = Scene::new();
    rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let objects = scene.objects().to_vec();

    let mut other = Scene::new();
    other.set_next_id(1);
    other.replace_all(objects);
    assert_eq!(other.next_id(), 2);

    other.set_next_id(0);
    assert_eq!(other.next_id(), 2);
}

#[test]
fn test_mutations_publish_selection_changed() {
    let mut scene = Scene::new();
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    scene.events().subscribe(
        EventFilter::Categories(vec![EventCategory::Selection]),
        move |event| {
            if let SceneEvent::SelectionChanged { .. } = event {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        },
    );

    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    scene.select(a, false);
    scene.set_position(a, Point::new(5.0, 5.0));
    scene.remove(a);

    assert_eq!(count.load(Ordering::SeqCst), 4);
}
