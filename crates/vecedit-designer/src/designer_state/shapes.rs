//! Shape operations (delete, group, ungroup, selection) for designer state.

use vecedit_core::Result;

use super::DesignerState;
use crate::commands::{CompositeCommand, DeleteShapes, DesignerCommand, GroupShapes, UngroupShapes};
use crate::grouping;

impl DesignerState {
    /// Check if grouping is possible (at least 2 top-level shapes selected).
    pub fn can_group(&self) -> bool {
        grouping::can_group(&self.scene, &self.scene.selected_ids())
    }

    /// Check if ungrouping is possible (any selected shape is a group).
    pub fn can_ungroup(&self) -> bool {
        !self.selected_groups().is_empty()
    }

    /// Deletes the selected shape(s) as one command.
    ///
    /// Returns `false` when nothing is selected.
    pub fn delete_selected(&mut self) -> Result<bool> {
        let ids = self.scene.selected_ids();
        if ids.is_empty() {
            return Ok(false);
        }
        self.push_command(DesignerCommand::DeleteShapes(DeleteShapes::new(ids)))?;
        Ok(true)
    }

    /// Groups the selection and returns the new group's ID.
    pub fn group_selected(&mut self) -> Result<Option<u64>> {
        let ids = self.scene.selected_ids();
        let Some(cmd) = GroupShapes::new(&mut self.scene, &ids) else {
            return Ok(None);
        };
        let group_id = cmd.group_id;
        self.push_command(DesignerCommand::GroupShapes(cmd))?;
        Ok(Some(group_id))
    }

    /// Dissolves every selected group by one level and selects the freed
    /// children.
    pub fn ungroup_selected(&mut self) -> Result<bool> {
        let groups = self.selected_groups();
        let mut commands: Vec<DesignerCommand> = groups
            .iter()
            .filter_map(|&id| UngroupShapes::new(&self.scene, id))
            .map(DesignerCommand::UngroupShapes)
            .collect();

        let freed: Vec<u64> = commands
            .iter()
            .flat_map(|cmd| match cmd {
                DesignerCommand::UngroupShapes(u) => u.child_ids.clone(),
                _ => Vec::new(),
            })
            .collect();

        let cmd = match commands.len() {
            0 => {
                tracing::warn!("Ignoring ungroup: no group selected");
                return Ok(false);
            }
            1 => commands.remove(0),
            n => DesignerCommand::CompositeCommand(CompositeCommand {
                commands,
                name: format!("Ungroup {} Groups", n),
            }),
        };
        self.push_command(cmd)?;

        for id in freed {
            self.scene.select(id, true);
        }
        Ok(true)
    }

    pub fn select_all(&mut self) {
        self.scene.select_all();
    }

    pub fn deselect_all(&mut self) {
        self.scene.clear_selection();
    }

    fn selected_groups(&self) -> Vec<u64> {
        self.scene
            .selected_ids()
            .into_iter()
            .filter(|&id| self.scene.get_top(id).is_some_and(|o| o.is_group()))
            .collect()
    }
}
