use proptest::prelude::*;

use vecedit_designer::commands::{
    AddShape, ChangeColor, ChangeStrokeWidth, DeleteShapes, GroupShapes, MoveShapes,
    UngroupShapes,
};
use vecedit_designer::{
    Color, DesignRectangle, DesignerCommand, DrawingObject, History, Point, Scene, Shape, Stroke,
};

use crate::support::{rect_at, structure};

fn add_rect(scene: &mut Scene, x: f64, y: f64) -> DesignerCommand {
    let id = scene.generate_id();
    DesignerCommand::AddShape(AddShape::new(
        DrawingObject::new(
            id,
            Shape::Rectangle(DesignRectangle::new(0.0, 0.0, 10.0, 10.0, Stroke::default())),
        )
        .with_position(Point::new(x, y)),
    ))
}

#[test]
fn test_history_starts_empty() {
    let history = History::new();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_depth(), 0);
    assert_eq!(history.redo_depth(), 0);
    assert!(history.undo_text().is_none());
}

#[test]
fn test_undo_redo_at_ends_are_noops() {
    let mut scene = Scene::new();
    let mut history = History::new();
    assert!(!history.undo(&mut scene).unwrap());
    assert!(!history.redo(&mut scene).unwrap());
    assert_eq!(history.revision(), 0);
}

#[test]
fn test_execute_undo_redo_single_command() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let cmd = add_rect(&mut scene, 5.0, 5.0);

    history.execute(cmd, &mut scene).unwrap();
    assert_eq!(scene.len(), 1);
    assert_eq!(history.undo_text().as_deref(), Some("Undo Add Rectangle"));

    assert!(history.undo(&mut scene).unwrap());
    assert!(scene.is_empty());
    assert_eq!(history.redo_text().as_deref(), Some("Redo Add Rectangle"));

    assert!(history.redo(&mut scene).unwrap());
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.objects()[0].position, Point::new(5.0, 5.0));
}

#[test]
fn test_execute_discards_redo_tail() {
    let mut scene = Scene::new();
    let mut history = History::new();
    for i in 0..3 {
        let cmd = add_rect(&mut scene, i as f64 * 20.0, 0.0);
        history.execute(cmd, &mut scene).unwrap();
    }
    history.undo(&mut scene).unwrap();
    history.undo(&mut scene).unwrap();
    assert_eq!(history.redo_depth(), 2);

    let cmd = add_rect(&mut scene, 100.0, 100.0);
    history.execute(cmd, &mut scene).unwrap();
    assert_eq!(history.undo_depth(), 2);
    assert_eq!(history.redo_depth(), 0);
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_failed_command_is_not_recorded() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let cmd = DesignerCommand::MoveShapes(MoveShapes::new(
        vec![42],
        vec![Point::new(0.0, 0.0)],
        vec![Point::new(1.0, 1.0)],
    ));

    let err = history.execute(cmd, &mut scene).unwrap_err();
    assert!(err.is_invariant_violation());
    assert!(!history.can_undo());
}

#[test]
fn test_max_depth_evicts_oldest() {
    let mut scene = Scene::new();
    let mut history = History::with_max_depth(Some(2));
    for i in 0..4 {
        let cmd = add_rect(&mut scene, i as f64, 0.0);
        history.execute(cmd, &mut scene).unwrap();
    }
    assert_eq!(history.undo_depth(), 2);
    history.undo(&mut scene).unwrap();
    history.undo(&mut scene).unwrap();
    assert!(!history.can_undo());
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_clear_forgets_everything() {
    let mut scene = Scene::new();
    let mut history = History::new();
    let cmd = add_rect(&mut scene, 0.0, 0.0);
    history.execute(cmd, &mut scene).unwrap();
    history.clear();
    assert!(!history.can_undo());
    assert_eq!(scene.len(), 1);
}

#[derive(Debug, Clone)]
enum Op {
    Add(i32, i32),
    Move(usize, i32, i32),
    Color(usize, u8),
    Width(usize, u32),
    Delete(usize),
    Group(usize, usize),
    Ungroup(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i32..50, -50i32..50).prop_map(|(x, y)| Op::Add(x, y)),
        2 => (0usize..8, -20i32..20, -20i32..20).prop_map(|(i, dx, dy)| Op::Move(i, dx, dy)),
        1 => (0usize..8, any::<u8>()).prop_map(|(i, c)| Op::Color(i, c)),
        1 => (0usize..8, 1u32..10).prop_map(|(i, w)| Op::Width(i, w)),
        1 => (0usize..8).prop_map(Op::Delete),
        2 => (0usize..8, 0usize..8).prop_map(|(i, j)| Op::Group(i, j)),
        1 => (0usize..8).prop_map(Op::Ungroup),
    ]
}

/// Turns an abstract op into a command against the current scene, if the
/// scene has something for it to act on.
fn build(scene: &mut Scene, op: &Op) -> Option<DesignerCommand> {
    let ids: Vec<u64> = scene.objects().iter().map(|o| o.id).collect();
    let pick = |i: usize| (!ids.is_empty()).then(|| ids[i % ids.len()]);
    match *op {
        Op::Add(x, y) => Some(add_rect(scene, x as f64, y as f64)),
        Op::Move(i, dx, dy) => {
            let id = pick(i)?;
            MoveShapes::translate(scene, &[id], dx as f64, dy as f64)
                .ok()
                .map(DesignerCommand::MoveShapes)
        }
        Op::Color(i, c) => {
            let id = pick(i)?;
            ChangeColor::capture(scene, &[id], Color::rgb(c, 0, 255 - c))
                .ok()
                .map(DesignerCommand::ChangeColor)
        }
        Op::Width(i, w) => {
            let id = pick(i)?;
            ChangeStrokeWidth::capture(scene, &[id], w)
                .ok()
                .map(DesignerCommand::ChangeStrokeWidth)
        }
        Op::Delete(i) => {
            let id = pick(i)?;
            Some(DesignerCommand::DeleteShapes(DeleteShapes::new(vec![id])))
        }
        Op::Group(i, j) => {
            let (a, b) = (pick(i)?, pick(j)?);
            GroupShapes::new(scene, &[a, b]).map(DesignerCommand::GroupShapes)
        }
        Op::Ungroup(i) => {
            let id = pick(i)?;
            UngroupShapes::new(scene, id).map(DesignerCommand::UngroupShapes)
        }
    }
}

proptest! {
    #[test]
    fn undo_all_then_redo_all_restores_scene(ops in prop::collection::vec(op_strategy(), 1..24)) {
        let mut scene = Scene::new();
        rect_at(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let mut history = History::new();

        let mut states = vec![structure(&scene)];
        for op in &ops {
            if let Some(cmd) = build(&mut scene, op) {
                history.execute(cmd, &mut scene).unwrap();
                states.push(structure(&scene));
            }
        }
        let done = structure(&scene);
        let n = history.undo_depth();
        prop_assert_eq!(n, states.len() - 1);

        for i in (0..n).rev() {
            prop_assert!(history.undo(&mut scene).unwrap());
            prop_assert_eq!(&structure(&scene), &states[i]);
        }
        for _ in 0..n {
            prop_assert!(history.redo(&mut scene).unwrap());
        }
        prop_assert_eq!(structure(&scene), done);
    }
}
