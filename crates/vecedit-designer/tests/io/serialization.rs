use proptest::prelude::*;
use tempfile::TempDir;

use vecedit_core::DocumentError;
use vecedit_designer::{
    Color, Colorable, DesignEllipse, DesignFile, DesignGroup, DesignLine, DesignRectangle,
    DesignerState, DrawingMode, DrawingObject, Point, PointerEvent, PrimitiveKind, Serializable,
    Shape, ShapeType, Stroke,
};

fn sample_state() -> DesignerState {
    let mut state = DesignerState::new();
    for (kind, from, to) in [
        (PrimitiveKind::Rectangle, (10.0, 10.0), (60.0, 60.0)),
        (PrimitiveKind::Line, (100.0, 20.0), (140.0, 5.0)),
        (PrimitiveKind::Ellipse, (200.0, 200.0), (230.0, 260.0)),
    ] {
        state.set_mode(DrawingMode::Create(kind));
        state
            .pointer_press(PointerEvent::new(from.0, from.1))
            .unwrap();
        state
            .pointer_release(PointerEvent::new(to.0, to.1))
            .unwrap();
    }
    state.set_mode(DrawingMode::Select);
    let ids: Vec<u64> = state.scene.objects().iter().take(2).map(|o| o.id).collect();
    state.scene.select(ids[0], false);
    state.scene.select(ids[1], true);
    state.group_selected().unwrap();
    state
}

#[test]
fn test_document_layout() {
    let state = sample_state();
    let json: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

    assert_eq!(json["version"], "1.0");
    assert_eq!(json["canvas_width"], 800.0);
    let shapes = json["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0]["type"], "group");
    assert_eq!(shapes[0]["pos"], serde_json::json!([10.0, 10.0]));
    assert_eq!(shapes[0]["children"][0]["type"], "rect");
    assert_eq!(shapes[0]["children"][1]["pos"], serde_json::json!([90.0, 10.0]));
    assert_eq!(shapes[0]["children"][0]["props"]["w"], 50.0);
    assert_eq!(shapes[1]["props"]["color"], "#000000");
    assert_eq!(shapes[1]["props"]["stroke_width"], 2);
}

#[test]
fn test_save_and_load_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("drawing.json");

    let mut state = sample_state();
    state.design_name = "Sketch".to_string();
    state.save_to_file(&path).unwrap();
    assert!(!state.is_modified);
    assert_eq!(state.display_name(), "drawing.json");

    let mut loaded = DesignerState::new();
    loaded.load_from_file(&path).unwrap();
    assert_eq!(loaded.design_name, "Sketch");
    assert!(!loaded.can_undo());
    assert_eq!(loaded.scene.len(), 2);

    let original: Vec<_> = state.scene.objects().iter().map(|o| o.to_data()).collect();
    let restored: Vec<_> = loaded.scene.objects().iter().map(|o| o.to_data()).collect();
    assert_eq!(original, restored);
}

#[test]
fn test_loaded_ids_are_fresh_and_unique() {
    let state = sample_state();
    let mut loaded = DesignerState::new();
    loaded.load_from_str(&state.to_json().unwrap()).unwrap();

    let mut ids: Vec<u64> = loaded.scene.objects().iter().flat_map(|o| o.ids()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(loaded.scene.next_id(), 5);
}

#[test]
fn test_malformed_document_leaves_scene_untouched() {
    let mut state = sample_state();
    let before = state.scene.objects().to_vec();

    assert!(state.load_from_str("{ not json").is_err());
    assert!(state
        .load_from_str(r#"{"shapes": [{"type": "rectangle"}, {"type": "hexagon"}]}"#)
        .is_err());
    assert!(state.load_from_str(r#"{"version": "3.0"}"#).is_err());

    assert_eq!(state.scene.objects(), before.as_slice());
    assert!(state.can_undo());
}

#[test]
fn test_typed_errors() {
    assert!(matches!(
        DesignFile::parse("[1, 2]"),
        Err(DocumentError::Parse { .. })
    ));
    let design =
        DesignFile::parse(r#"{"shapes": [{"type": "triangle", "pos": [1, 2]}]}"#).unwrap();
    let err = design.decode().unwrap_err();
    assert_eq!(
        err,
        DocumentError::UnknownShapeType {
            type_name: "triangle".to_string()
        }
    );
}

#[test]
fn test_load_missing_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");
    let mut state = DesignerState::new();
    let err = state.load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn test_named_color_accepted_on_input() {
    let design = DesignFile::parse(
        r#"{"shapes": [{"type": "line", "props": {"x2": 5, "color": "black", "stroke_width": 3}}]}"#,
    )
    .unwrap();
    let objects = design.decode().unwrap();
    assert_eq!(objects[0].shape_type(), ShapeType::Line);
    assert_eq!(objects[0].to_data().props.unwrap().color.as_deref(), Some("#000000"));
}

#[test]
fn test_loads_flat_document_without_positions() {
    let json = r##"{
        "version": "1.0",
        "canvas_width": 800.0,
        "canvas_height": 600.0,
        "shapes": [
            {"type": "rect", "props": {"x": 10.0, "y": 10.0, "w": 50.0, "h": 50.0,
                                       "color": "#000000", "stroke_width": 2}},
            {"type": "ellipse", "props": {"x": 100.0, "y": 20.0, "w": 60.0, "h": 60.0,
                                          "color": "#ff0000", "stroke_width": 4}},
            {"type": "line", "props": {"x1": 0.0, "y1": 0.0, "x2": 30.0, "y2": 40.0,
                                       "color": "#000000", "stroke_width": 2}}
        ]
    }"##;

    let mut state = DesignerState::new();
    state.load_from_str(json).unwrap();
    assert_eq!(state.scene.len(), 3);

    let rect = &state.scene.objects()[0];
    assert_eq!(rect.shape_type(), ShapeType::Rectangle);
    assert_eq!(rect.position, Point::new(0.0, 0.0));
    let Shape::Rectangle(r) = &rect.shape else {
        panic!("expected rectangle");
    };
    assert_eq!((r.x, r.y, r.width, r.height), (10.0, 10.0, 50.0, 50.0));
    assert_eq!(r.stroke, Stroke::new(Color::rgb(0, 0, 0), 2));

    let ellipse = &state.scene.objects()[1];
    assert_eq!(ellipse.stroke_color(), Color::rgb(255, 0, 0));
    assert_eq!(ellipse.stroke_width(), 4);

    let saved: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
    assert_eq!(saved["shapes"][0]["type"], "rect");
}

#[test]
fn test_long_rectangle_tag_still_accepted() {
    let design = DesignFile::parse(r#"{"shapes": [{"type": "rectangle"}]}"#).unwrap();
    assert_eq!(design.decode().unwrap()[0].shape_type(), ShapeType::Rectangle);
}

fn leaf() -> impl Strategy<Value = DrawingObject> {
    (
        0u8..3,
        (-400i32..400, -400i32..400),
        (-100i32..100, -100i32..100, 0i32..100, 0i32..100),
        any::<(u8, u8, u8)>(),
        1u32..20,
    )
        .prop_map(|(kind, (px, py), (a, b, c, d), (r, g, bl), width)| {
            let stroke = Stroke::new(Color::rgb(r, g, bl), width);
            let (a, b, c, d) = (a as f64 / 4.0, b as f64 / 4.0, c as f64, d as f64);
            let shape = match kind {
                0 => Shape::Rectangle(DesignRectangle::new(a, b, c, d, stroke)),
                1 => Shape::Ellipse(DesignEllipse::new(a, b, c, d, stroke)),
                _ => Shape::Line(DesignLine::new(a, b, c, d, stroke)),
            };
            DrawingObject::new(0, shape).with_position(Point::new(px as f64 / 2.0, py as f64))
        })
}

fn tree() -> impl Strategy<Value = DrawingObject> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        ((-100i32..100, -100i32..100), prop::collection::vec(inner, 1..4)).prop_map(
            |((x, y), children)| {
                DrawingObject::new(0, Shape::Group(DesignGroup::new(children)))
                    .with_position(Point::new(x as f64, y as f64))
            },
        )
    })
}

proptest! {
    #[test]
    fn serialization_round_trip(shapes in prop::collection::vec(tree(), 0..5)) {
        let mut design = DesignFile::new(640.0, 480.0);
        design.shapes = shapes.iter().map(|s| s.to_data()).collect();
        let json = design.to_json().unwrap();

        let parsed = DesignFile::parse(&json).unwrap();
        prop_assert_eq!(parsed.canvas_width, 640.0);
        let decoded = parsed.decode().unwrap();
        let redone: Vec<_> = decoded.iter().map(|o| o.to_data()).collect();
        prop_assert_eq!(redone, design.shapes);
    }
}
