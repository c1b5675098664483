//! Read-only snapshot of everything a driver may observe
//!
//! Serializes with serde so external observers can consume it as JSON.

use serde::Serialize;

use crate::engine::Phase;
use crate::pieces::Piece;
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    /// Current rotation as 0/1 rows
    pub shape: Vec<Vec<u8>>,
    pub x: i32,
    pub y: i32,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape.to_rows(),
            x: piece.x,
            y: piece.y,
        }
    }
}

impl PieceSnapshot {
    /// Absolute `(x, y)` board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &v)| v != 0)
                .map(move |(dx, _)| (self.x + dx as i32, self.y + dy as i32))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EngineSnapshot {
    pub width: usize,
    pub height: usize,
    /// Rows top to bottom, each exactly `width` cells
    pub board: Vec<Vec<Cell>>,
    pub current: Option<PieceSnapshot>,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: Phase,
}

impl EngineSnapshot {
    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Cell at `(x, y)`, `None` when out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board.get(y as usize)?.get(x as usize).copied()
    }
}
