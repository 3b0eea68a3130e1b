//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Root event enum for everything the editor core announces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// The set of selected top-level shapes may have changed.
    ///
    /// Fired after every scene mutation; `selected` lists the selected shape
    /// ids in draw order.
    SelectionChanged {
        /// Selected shape ids, bottom-most first.
        selected: Vec<u64>,
    },
    /// A command was executed or redone
    CommandApplied {
        /// Display name of the command.
        name: String,
    },
    /// A command was undone
    CommandUndone {
        /// Display name of the command.
        name: String,
    },
    /// The whole shape tree was replaced from a document
    DocumentLoaded {
        /// Number of top-level shapes in the document.
        shape_count: usize,
    },
    /// The shape tree was written to a document
    DocumentSaved {
        /// Number of top-level shapes written.
        shape_count: usize,
    },
}

impl SceneEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            SceneEvent::SelectionChanged { .. } => EventCategory::Selection,
            SceneEvent::CommandApplied { .. } | SceneEvent::CommandUndone { .. } => {
                EventCategory::History
            }
            SceneEvent::DocumentLoaded { .. } | SceneEvent::DocumentSaved { .. } => {
                EventCategory::Document
            }
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            SceneEvent::SelectionChanged { selected } => {
                format!("Selection changed ({} selected)", selected.len())
            }
            SceneEvent::CommandApplied { name } => format!("Applied: {name}"),
            SceneEvent::CommandUndone { name } => format!("Undone: {name}"),
            SceneEvent::DocumentLoaded { shape_count } => {
                format!("Document loaded ({shape_count} shapes)")
            }
            SceneEvent::DocumentSaved { shape_count } => {
                format!("Document saved ({shape_count} shapes)")
            }
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection changes.
    Selection,
    /// Command execution, undo and redo.
    History,
    /// Document load and save.
    Document,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Document => write!(f, "Document"),
        }
    }
}
