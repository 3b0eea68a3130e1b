//! # VecEdit Designer
//!
//! The document, command and interaction core of the vector editor.
//!
//! ## Core Components
//!
//! - **Model**: rectangles, lines, ellipses and nestable groups, each placed
//!   at an offset in its parent's coordinate space
//! - **Scene**: the ordered forest of top-level shapes plus the selection
//! - **Commands/History**: reversible edits and a linear undo/redo log
//! - **Grouping**: group/ungroup as pure coordinate-space changes
//! - **Serialization**: recursive JSON documents
//! - **Tools**: pointer state machine for select, marquee, drag and create
//!
//! ## Architecture
//!
//! ```text
//! PointerEvent ──> ToolController ──> DesignerCommand ──> History
//!                        │                                  │
//!                        └──────────────> Scene <───────────┘
//!                                           │
//!                                        EventBus (selection changed)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vecedit_designer::{DesignerState, DrawingMode, PointerEvent, PrimitiveKind};
//!
//! let mut state = DesignerState::new();
//! state.set_mode(DrawingMode::Create(PrimitiveKind::Rectangle));
//! state.pointer_press(PointerEvent::new(10.0, 10.0))?;
//! state.pointer_release(PointerEvent::new(60.0, 60.0))?;
//! state.undo()?;
//! ```

pub mod commands;
pub mod designer_state;
pub mod grouping;
pub mod history;
pub mod model;
pub mod scene;
pub mod selection_manager;
pub mod serialization;
pub mod tools;

pub use commands::DesignerCommand;
pub use designer_state::DesignerState;
pub use history::History;
pub use model::{
    Bounds, Color, Colorable, DesignEllipse, DesignGroup, DesignLine, DesignRectangle,
    DrawingObject, Movable, Point, PrimitiveKind, Shape, ShapeType, Stroke, ValidationPolicy,
};
pub use scene::Scene;
pub use selection_manager::SelectionManager;
pub use serialization::{DesignFile, Serializable, ShapeData, FILE_FORMAT_VERSION};
pub use tools::{DrawingMode, Modifiers, PointerEvent, SessionConfig, ToolController};
