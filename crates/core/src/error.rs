//! Engine errors
//!
//! Normal play never fails: rejected moves are `false` and a blocked spawn is
//! game over. The only error is rejecting a board that cannot exist.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}
