//! Core game logic - pure, deterministic, and testable
//!
//! The falling-block simulation: board, piece generation, rotation,
//! collision, locking, line clearing, scoring and speed levels. It has no
//! dependencies on UI, input devices, timers, or I/O; a driver advances it
//! with discrete ticks and commands and reads its state back.
//!
//! # Module Structure
//!
//! - [`board`]: the grid, the collision predicate and row clearing
//! - [`pieces`]: canonical shapes, clockwise rotation, piece instances
//! - [`rng`]: uniform random piece selection over an injectable source
//! - [`scoring`]: lock bonus, line-clear points, levels, tick cadence
//! - [`engine`]: the state machine tying it all together
//! - [`snapshot`]: serializable read-only view for drivers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Engine, Phase, Step};
//! use blockfall_core::types::GameAction;
//!
//! let mut engine = Engine::seeded(10, 20, 12345).unwrap();
//! assert_eq!(engine.phase(), Phase::Idle);
//!
//! // The first tick spawns a piece.
//! assert_eq!(engine.advance(), Step::Spawned);
//!
//! engine.apply_action(GameAction::MoveLeft);
//! engine.apply_action(GameAction::Rotate);
//! engine.apply_action(GameAction::HardDrop);
//!
//! // Every lock is worth 10 points.
//! assert!(engine.score() >= 10);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use config::EngineConfig;
pub use engine::{Engine, LockEvent, Phase, Step};
pub use error::EngineError;
pub use pieces::{canonical_shape, Piece, Shape};
pub use rng::PieceGenerator;
pub use scoring::{line_clear_points, next_level, tick_interval};
pub use snapshot::{EngineSnapshot, PieceSnapshot};
