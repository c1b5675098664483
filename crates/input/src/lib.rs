//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`]. Two binding
//! sets are available: the classic arrow/space layout, and a hidden scheme
//! where every action sits on a random letter the player has to discover.
//! Bindings never change what an action does in the engine.

pub mod map;
pub mod scheme;

pub use blockfall_types as types;

pub use map::{classic_action, classic_legend, is_restart, should_quit, Bindings};
pub use scheme::{ControlScheme, RESERVED_LETTERS};
