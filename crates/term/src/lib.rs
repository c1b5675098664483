//! Terminal view of the engine.
//!
//! [`GameView`] paints an [`blockfall_core::EngineSnapshot`] onto a [`Canvas`]
//! without any I/O; [`TerminalRenderer`] flushes canvases to a real terminal
//! through crossterm, redrawing only the cells that changed.

pub mod canvas;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Tone};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
