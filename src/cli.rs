//! Document operations behind the `vecedit` subcommands.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use vecedit_designer::serialization::describe;
use vecedit_designer::{
    DesignFile, DesignerState, DrawingMode, DrawingObject, Point, PointerEvent, PrimitiveKind,
    Scene, ValidationPolicy,
};
use vecedit_settings::config::EditorSettings;
use vecedit_settings::manager::SettingsManager;

/// Settings from an explicit file, or the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<EditorSettings> {
    match path {
        Some(path) => {
            let manager = SettingsManager::load_from(path)
                .with_context(|| format!("Failed to load settings {}", path.display()))?;
            Ok(manager.settings().clone())
        }
        None => Ok(EditorSettings::default()),
    }
}

/// Shape tree of a document, one line per shape with absolute positions.
pub fn inspect(path: &Path, settings: EditorSettings) -> Result<String> {
    let mut state = DesignerState::with_settings(settings);
    state.load_from_file(path)?;

    let mut out = String::new();
    writeln!(
        out,
        "{} ({}x{}, {} top-level shapes)",
        state.design_name,
        state.scene.width(),
        state.scene.height(),
        state.scene.len()
    )?;
    for object in state.scene.objects() {
        write_tree(&mut out, &state.scene, object, 1)?;
    }
    Ok(out)
}

fn write_tree(out: &mut String, scene: &Scene, object: &DrawingObject, depth: usize) -> Result<()> {
    let absolute = scene.absolute_position(object.id).unwrap_or_default();
    writeln!(out, "{}{}", "  ".repeat(depth), describe(object, absolute))?;
    for child in object.children() {
        write_tree(out, scene, child, depth + 1)?;
    }
    Ok(())
}

/// Re-serializes a document in canonical form.
///
/// With `strict`, degenerate shapes (zero size, empty groups) are rejected
/// and nothing is written.
pub fn normalize(
    input: &Path,
    output: &Path,
    settings: EditorSettings,
    strict: bool,
) -> Result<usize> {
    let mut state = DesignerState::with_settings(settings);
    state.load_from_file(input)?;
    if strict {
        let policy = ValidationPolicy::strict();
        for object in state.scene.objects() {
            object
                .validate(&policy)
                .with_context(|| format!("{} #{} failed validation", object.name(), object.id))?;
        }
    }
    state.save_to_file(output)?;
    Ok(state.scene.len())
}

/// Writes an empty document.
pub fn new_document(path: &Path, width: f64, height: f64) -> Result<()> {
    if width <= 0.0 || height <= 0.0 {
        bail!("Canvas dimensions must be > 0, got {}x{}", width, height);
    }
    DesignFile::new(width, height).save_to_file(path)?;
    tracing::info!("Created {}x{} document {}", width, height, path.display());
    Ok(())
}

/// Replays a scripted pointer session and saves the result.
///
/// Draws a rectangle and an ellipse, marquee-selects both, groups them and
/// drags the group.
pub fn demo(path: &Path, settings: EditorSettings) -> Result<DesignerState> {
    let mut state = DesignerState::with_settings(settings);

    drag(&mut state, DrawingMode::Create(PrimitiveKind::Rectangle), (10.0, 10.0), (60.0, 60.0))?;
    drag(&mut state, DrawingMode::Create(PrimitiveKind::Ellipse), (100.0, 20.0), (160.0, 80.0))?;
    drag(&mut state, DrawingMode::Select, (0.0, 0.0), (200.0, 100.0))?;

    let Some(group_id) = state.group_selected()? else {
        bail!("Demo selection could not be grouped");
    };
    drag(&mut state, DrawingMode::Select, (30.0, 30.0), (50.0, 60.0))?;
    tracing::info!(
        "Demo group {} now at {:?}",
        group_id,
        state.scene.absolute_position(group_id)
    );

    state.design_name = "Demo".to_string();
    state.save_to_file(path)?;
    Ok(state)
}

fn drag(
    state: &mut DesignerState,
    mode: DrawingMode,
    from: (f64, f64),
    to: (f64, f64),
) -> Result<()> {
    state.set_mode(mode);
    state.pointer_press(PointerEvent::new(from.0, from.1))?;
    state.pointer_move(Point::new(to.0, to.1));
    state.pointer_release(PointerEvent::new(to.0, to.1))?;
    Ok(())
}
