//! File I/O operations (save, load, new) for designer state.

use std::path::Path;

use anyhow::Context;
use vecedit_core::SceneEvent;

use super::DesignerState;
use crate::serialization::DesignFile;
use crate::tools::ToolController;

impl DesignerState {
    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let design = DesignFile::from_scene(&self.scene).with_name(&self.design_name);
        design.save_to_file(&path)?;

        let shape_count = self.scene.len();
        tracing::info!(
            "Saved {} shapes to {}",
            shape_count,
            path.as_ref().display()
        );
        self.scene
            .events()
            .publish(SceneEvent::DocumentSaved { shape_count });

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load design from file.
    ///
    /// The scene is left untouched if the file cannot be read or decoded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let design = DesignFile::load_from_file(&path)?;
        self.apply_design(&design)
            .with_context(|| format!("Failed to load {}", path.as_ref().display()))?;

        self.design_name = design
            .metadata
            .as_ref()
            .map(|m| m.name.clone())
            .filter(|name| !name.is_empty())
            .or_else(|| {
                path.as_ref()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Untitled".to_string());
        self.current_file_path = Some(path.as_ref().to_path_buf());
        tracing::info!("Loaded {}", path.as_ref().display());
        Ok(())
    }

    /// Load design from document text without a backing file.
    pub fn load_from_str(&mut self, text: &str) -> anyhow::Result<()> {
        let design = DesignFile::parse(text).context("Failed to parse design")?;
        self.apply_design(&design)?;
        self.design_name = design
            .metadata
            .map(|m| m.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());
        self.current_file_path = None;
        Ok(())
    }

    /// Serialize the current scene.
    pub fn to_json(&self) -> anyhow::Result<String> {
        DesignFile::from_scene(&self.scene)
            .with_name(&self.design_name)
            .to_json()
    }

    /// Create new design (clear all).
    pub fn new_design(&mut self) {
        self.scene.clear();
        self.scene
            .set_size(self.settings.canvas.width, self.settings.canvas.height);
        self.reset_session();
        self.current_file_path = None;
        self.design_name = "Untitled".to_string();
    }

    /// Mark design as modified.
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Get display name for the design.
    pub fn display_name(&self) -> String {
        let name = if let Some(path) = &self.current_file_path {
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&self.design_name)
        } else {
            &self.design_name
        };

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    fn apply_design(&mut self, design: &DesignFile) -> anyhow::Result<()> {
        design
            .apply_to(&mut self.scene)
            .context("Failed to decode design")?;
        self.reset_session();

        let shape_count = self.scene.len();
        self.scene
            .events()
            .publish(SceneEvent::DocumentLoaded { shape_count });
        Ok(())
    }

    /// Drops undo history and any pointer interaction in progress.
    fn reset_session(&mut self) {
        let mode = self.tools.mode();
        self.tools = ToolController::new();
        self.tools.set_mode(mode);
        self.history.clear();
        self.is_modified = false;
    }
}
