use proptest::prelude::*;

use vecedit_designer::commands::{GroupShapes, UngroupShapes};
use vecedit_designer::grouping::{can_group, group_origin};
use vecedit_designer::{DesignerCommand, History, Point, Scene};

use crate::support::{ellipse_at, line_at, rect_at, structure, top_ids};

fn group(scene: &mut Scene, history: &mut History, ids: &[u64]) -> u64 {
    let cmd = GroupShapes::new(scene, ids).unwrap();
    let gid = cmd.group_id;
    history
        .execute(DesignerCommand::GroupShapes(cmd), scene)
        .unwrap();
    gid
}

fn ungroup(scene: &mut Scene, history: &mut History, gid: u64) {
    let cmd = UngroupShapes::new(scene, gid).unwrap();
    history
        .execute(DesignerCommand::UngroupShapes(cmd), scene)
        .unwrap();
}

#[test]
fn test_group_two_shapes_at_known_positions() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 20.0, 20.0);
    let b = rect_at(&mut scene, 50.0, 0.0, 20.0, 20.0);

    let gid = group(&mut scene, &mut history, &[a, b]);
    let g = scene.get_top(gid).unwrap();
    assert_eq!(g.position, Point::new(0.0, 0.0));
    assert_eq!(g.children()[0].position, Point::new(0.0, 0.0));
    assert_eq!(g.children()[1].position, Point::new(50.0, 0.0));
    assert_eq!(scene.selected_ids(), vec![gid]);

    ungroup(&mut scene, &mut history, gid);
    assert_eq!(top_ids(&scene), vec![a, b]);
    assert_eq!(scene.absolute_position(a), Some(Point::new(0.0, 0.0)));
    assert_eq!(scene.absolute_position(b), Some(Point::new(50.0, 0.0)));
    assert_eq!(scene.selected_ids(), vec![a, b]);
}

#[test]
fn test_group_origin_is_minimum_corner() {
    let mut scene = Scene::new();
    let a = rect_at(&mut scene, 30.0, 5.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 10.0, 40.0, 10.0, 10.0);
    assert_eq!(group_origin(&scene, &[a, b]), Some(Point::new(10.0, 5.0)));

    let mut history = History::new();
    let gid = group(&mut scene, &mut history, &[a, b]);
    let g = scene.get_top(gid).unwrap();
    assert_eq!(g.children()[0].position, Point::new(20.0, 0.0));
    assert_eq!(g.children()[1].position, Point::new(0.0, 35.0));
    assert_eq!(scene.absolute_position(a), Some(Point::new(30.0, 5.0)));
    assert_eq!(scene.parent_of(a), Some(gid));
}

#[test]
fn test_group_guards() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let c = rect_at(&mut scene, 40.0, 0.0, 10.0, 10.0);

    assert!(!can_group(&scene, &[a]));
    assert!(!can_group(&scene, &[a, a]));
    assert!(!can_group(&scene, &[a, 999]));
    assert!(GroupShapes::new(&mut scene, &[a]).is_none());

    let gid = group(&mut scene, &mut history, &[a, b]);
    // a is now inside a group
    assert!(!can_group(&scene, &[a, c]));
    assert!(can_group(&scene, &[gid, c]));
    assert!(UngroupShapes::new(&scene, c).is_none());
}

#[test]
fn test_group_takes_slot_of_topmost_member() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let a = rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let c = rect_at(&mut scene, 40.0, 0.0, 10.0, 10.0);
    let d = rect_at(&mut scene, 60.0, 0.0, 10.0, 10.0);

    let gid = group(&mut scene, &mut history, &[c, a]);
    assert_eq!(top_ids(&scene), vec![b, gid, d]);
    let children: Vec<u64> = scene
        .get_top(gid)
        .unwrap()
        .children()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(children, vec![c, a]);

    history.undo(&mut scene).unwrap();
    assert_eq!(top_ids(&scene), vec![a, b, c, d]);
}

#[test]
fn test_nested_groups_ungroup_one_level() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let a = rect_at(&mut scene, 10.0, 10.0, 10.0, 10.0);
    let b = ellipse_at(&mut scene, 30.0, 20.0, 10.0, 10.0);
    let c = line_at(&mut scene, 100.0, 5.0, 10.0, 10.0);

    let inner = group(&mut scene, &mut history, &[a, b]);
    let outer = group(&mut scene, &mut history, &[inner, c]);
    assert_eq!(scene.absolute_position(b), Some(Point::new(30.0, 20.0)));
    assert_eq!(scene.path_to(b), Some(vec![outer, inner, b]));

    ungroup(&mut scene, &mut history, outer);
    assert_eq!(top_ids(&scene), vec![inner, c]);
    assert!(scene.get_top(inner).unwrap().is_group());
    assert_eq!(scene.absolute_position(a), Some(Point::new(10.0, 10.0)));
    assert_eq!(scene.absolute_position(c), Some(Point::new(100.0, 5.0)));
}

#[test]
fn test_group_undo_redo_is_exact() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let a = rect_at(&mut scene, 3.0, 4.0, 10.0, 10.0);
    let b = rect_at(&mut scene, 7.0, 1.0, 10.0, 10.0);
    let before = structure(&scene);

    let gid = group(&mut scene, &mut history, &[a, b]);
    let grouped = structure(&scene);
    history.undo(&mut scene).unwrap();
    assert_eq!(structure(&scene), before);
    history.redo(&mut scene).unwrap();
    assert_eq!(structure(&scene), grouped);

    ungroup(&mut scene, &mut history, gid);
    history.undo(&mut scene).unwrap();
    assert_eq!(structure(&scene), grouped);
}

proptest! {
    #[test]
    fn grouping_preserves_absolute_positions(
        coords in prop::collection::vec((-500i32..500, -500i32..500), 2..6),
    ) {
        let mut scene = Scene::new();
        let mut history = History::new();
        let ids: Vec<u64> = coords
            .iter()
            .map(|&(x, y)| rect_at(&mut scene, x as f64, y as f64, 5.0, 5.0))
            .collect();
        let before: Vec<Point> = ids
            .iter()
            .map(|&id| scene.absolute_position(id).unwrap())
            .collect();
        let bounds_before = scene.objects().iter().map(|o| o.bounds()).reduce(|a, b| a.union(&b));

        let gid = group(&mut scene, &mut history, &ids);
        for (&id, &p) in ids.iter().zip(&before) {
            prop_assert_eq!(scene.absolute_position(id), Some(p));
        }
        prop_assert_eq!(scene.absolute_bounds(gid), bounds_before);

        ungroup(&mut scene, &mut history, gid);
        for (&id, &p) in ids.iter().zip(&before) {
            prop_assert_eq!(scene.absolute_position(id), Some(p));
        }
    }
}
