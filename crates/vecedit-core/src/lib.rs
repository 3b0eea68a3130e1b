//! # VecEdit Core
//!
//! Core types shared by every VecEdit crate:
//! - the error taxonomy used by the document model, commands and persistence
//! - the event bus through which the scene announces selection changes

pub mod error;
pub mod event_bus;

pub use error::{CommandError, DocumentError, Error, GeometryError, Result};

pub use event_bus::{EventBus, EventCategory, EventFilter, SceneEvent, SubscriptionId};
