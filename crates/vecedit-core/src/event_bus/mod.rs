//! # Event Bus Module
//!
//! Publish/subscribe channel through which the scene and the designer state
//! announce changes to external observers (a property inspector, a renderer).
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by category and receive events synchronously,
//!   on the thread that mutated the scene
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vecedit_core::event_bus::{EventBus, EventCategory, EventFilter, SceneEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let SceneEvent::SelectionChanged { selected } = event {
//!             println!("{} shapes selected", selected.len());
//!         }
//!     },
//! );
//!
//! bus.publish(SceneEvent::SelectionChanged { selected: vec![1, 2] });
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
