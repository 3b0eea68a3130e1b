//! Linear undo/redo history.
//!
//! Commands before the cursor are done, commands at or after it are undone.
//! Executing a new command discards the undone tail.

use vecedit_core::{Result, SceneEvent};

use crate::commands::DesignerCommand;
use crate::scene::Scene;

#[derive(Debug, Clone, Default)]
pub struct History {
    commands: Vec<DesignerCommand>,
    cursor: usize,
    max_depth: Option<usize>,
    revision: u64,
}

impl History {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that forgets its oldest commands beyond `max_depth`.
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Applies a command and records it after the cursor.
    ///
    /// A command that fails to apply is not recorded.
    pub fn execute(&mut self, mut command: DesignerCommand, scene: &mut Scene) -> Result<()> {
        let name = command.name();
        if let Err(err) = command.apply(scene) {
            tracing::error!("{} failed to apply: {}", name, err);
            return Err(err);
        }
        tracing::debug!("Applied {}", name);

        self.commands.truncate(self.cursor);
        self.commands.push(command);
        self.cursor += 1;
        self.evict();
        self.revision += 1;

        scene.events().publish(SceneEvent::CommandApplied { name });
        Ok(())
    }

    /// Reverts the command before the cursor.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> Result<bool> {
        if self.cursor == 0 {
            return Ok(false);
        }
        let command = &mut self.commands[self.cursor - 1];
        let name = command.name();
        if let Err(err) = command.undo(scene) {
            tracing::error!("Undo of {} failed: {}", name, err);
            return Err(err);
        }
        tracing::debug!("Undid {}", name);

        self.cursor -= 1;
        self.revision += 1;
        scene.events().publish(SceneEvent::CommandUndone { name });
        Ok(true)
    }

    /// Re-applies the command at the cursor.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<bool> {
        let Some(command) = self.commands.get_mut(self.cursor) else {
            return Ok(false);
        };
        let name = command.name();
        if let Err(err) = command.apply(scene) {
            tracing::error!("Redo of {} failed: {}", name, err);
            return Err(err);
        }
        tracing::debug!("Redid {}", name);

        self.cursor += 1;
        self.revision += 1;
        scene.events().publish(SceneEvent::CommandApplied { name });
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Label for an undo menu entry, e.g. "Undo Move 2 Shapes".
    pub fn undo_text(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(|c| format!("Undo {}", c.name()))
    }

    pub fn redo_text(&self) -> Option<String> {
        self.commands
            .get(self.cursor)
            .map(|c| format!("Redo {}", c.name()))
    }

    /// Number of commands that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of commands that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// Counter bumped by every execute, undo and redo.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
        self.revision += 1;
    }

    fn evict(&mut self) {
        if let Some(max) = self.max_depth {
            if self.commands.len() > max {
                let excess = self.commands.len() - max;
                self.commands.drain(..excess);
                self.cursor -= excess;
            }
        }
    }
}
