//! Engine module - the complete simulation state machine
//!
//! Ties together the board, piece generation and scoring. The engine has no
//! clock: a driver calls [`Engine::advance`] on its own cadence (see
//! [`Engine::tick_interval`]) and forwards player commands in between.
//!
//! Lifecycle: `Idle` (constructed, nothing spawned) → `Running` after the
//! first spawn → `GameOver` once a spawned piece does not fit. Game over is
//! terminal: every command and tick is then a no-op.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::scoring::{line_clear_points, next_level, tick_interval, LOCK_BONUS};
use crate::snapshot::{EngineSnapshot, PieceSnapshot};
use crate::types::{GameAction, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Constructed, nothing spawned yet
    Idle,
    Running,
    GameOver,
}

/// What happened when a piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: usize,
    /// Lock bonus plus line-clear points
    pub points: u32,
    pub level_up: bool,
    /// The follow-up spawn was blocked
    pub game_over: bool,
}

/// Outcome of one tick (or of the tick that closes a hard drop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Game over; nothing changed
    Halted,
    /// No piece was falling, one was spawned
    Spawned,
    /// The falling piece moved down one row
    Fell,
    /// The falling piece could not move down and was locked
    Locked(LockEvent),
}

struct ClearOutcome {
    lines: usize,
    points: u32,
    level_up: bool,
}

/// The falling-block simulation
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    board: Board,
    current: Option<Piece>,
    next: Piece,
    generator: PieceGenerator<R>,
    score: u32,
    level: u32,
    lines: u32,
    game_over: bool,
    /// Set by the first spawn; a locked piece awaiting its successor is still running
    spawned: bool,
    last_event: Option<LockEvent>,
}

impl Engine<StdRng> {
    /// Create an engine with an OS-seeded generator
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::from_config(&EngineConfig::new(width, height))
    }

    /// Create an engine whose piece sequence is fixed by `seed`
    pub fn seeded(width: usize, height: usize, seed: u64) -> Result<Self, EngineError> {
        Self::from_config(&EngineConfig::new(width, height).with_seed(seed))
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let generator = match config.seed {
            Some(seed) => PieceGenerator::seeded(seed),
            None => PieceGenerator::from_entropy(),
        };
        Ok(Self::build(config.width, config.height, generator))
    }
}

impl Default for Engine<StdRng> {
    fn default() -> Self {
        Self::build(
            DEFAULT_BOARD_WIDTH,
            DEFAULT_BOARD_HEIGHT,
            PieceGenerator::from_entropy(),
        )
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine drawing pieces from the given random source
    pub fn with_rng(width: usize, height: usize, rng: R) -> Result<Self, EngineError> {
        EngineConfig::new(width, height).validate()?;
        Ok(Self::build(width, height, PieceGenerator::new(rng)))
    }

    fn build(width: usize, height: usize, mut generator: PieceGenerator<R>) -> Self {
        let next = Piece::spawn(generator.draw(), width);
        Self {
            board: Board::new(width, height),
            current: None,
            next,
            generator,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
            spawned: false,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.spawned || self.current.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece, absent before the first spawn
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The look-ahead piece that the next spawn will bring into play
    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total rows cleared so far
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Tick cadence for the current level
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.level)
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Mutable board access for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece without any validity check.
    pub fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    /// Replace the look-ahead piece.
    pub fn set_next(&mut self, piece: Piece) {
        self.next = piece;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_rows(),
            current: self.current.as_ref().map(PieceSnapshot::from),
            next: PieceSnapshot::from(&self.next),
            score: self.score,
            level: self.level,
            lines: self.lines,
            phase: self.phase(),
        }
    }

    /// A fresh spawn-placed piece of a uniformly random kind.
    ///
    /// Not checked for validity; that happens when it is spawned.
    pub fn generate_piece(&mut self) -> Piece {
        Piece::spawn(self.generator.draw(), self.board.width())
    }

    /// Whether `piece` may occupy its placement on the current board
    pub fn is_valid_move(&self, piece: &Piece) -> bool {
        self.board.accepts(piece)
    }

    /// Move the falling piece by `(dx, dy)` as one atomic step.
    ///
    /// Returns false, leaving the piece where it was, when the target placement
    /// is invalid, no piece is falling, or the game is over.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.game_over {
            return false;
        }
        let Some(current) = &self.current else {
            return false;
        };

        let candidate = current.translated(dx, dy);
        if self.is_valid_move(&candidate) {
            self.current = Some(candidate);
            return true;
        }

        false
    }

    pub fn move_left(&mut self) -> bool {
        self.move_piece(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_piece(1, 0)
    }

    pub fn soft_drop(&mut self) -> bool {
        self.move_piece(0, 1)
    }

    /// `piece` rotated clockwise in place if that placement is valid,
    /// otherwise an unchanged copy of `piece`. No wall kicks.
    pub fn rotate(&self, piece: &Piece) -> Piece {
        let rotated = piece.rotated();
        if self.is_valid_move(&rotated) {
            rotated
        } else {
            piece.clone()
        }
    }

    /// Rotate the falling piece. Returns whether the rotation was accepted.
    pub fn rotate_current(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(current) = &self.current else {
            return false;
        };

        let rotated = current.rotated();
        if self.is_valid_move(&rotated) {
            self.current = Some(rotated);
            return true;
        }

        false
    }

    /// Lock the falling piece into the board and award the lock bonus.
    ///
    /// Cells above the top row are dropped. The piece leaves play; the next
    /// spawn replaces it.
    pub fn merge_piece(&mut self) {
        if self.game_over {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };

        let written = self.board.stamp(&piece);
        self.score = self.score.saturating_add(LOCK_BONUS);
        debug!(
            "locked {:?} at ({}, {}), {} cells on board",
            piece.kind, piece.x, piece.y, written
        );
    }

    /// Remove all full rows and score them. Returns the number removed.
    pub fn clear_lines(&mut self) -> usize {
        self.clear_and_score().lines
    }

    fn clear_and_score(&mut self) -> ClearOutcome {
        let mut outcome = ClearOutcome {
            lines: 0,
            points: 0,
            level_up: false,
        };
        if self.game_over {
            return outcome;
        }

        outcome.lines = self.board.clear_full_rows();
        if outcome.lines == 0 {
            return outcome;
        }

        outcome.points = line_clear_points(outcome.lines);
        self.score = self.score.saturating_add(outcome.points);
        self.lines = self.lines.saturating_add(outcome.lines as u32);

        let level = next_level(self.score, self.level);
        outcome.level_up = level != self.level;
        self.level = level;

        debug!(
            "cleared {} rows for {} points (score {}, level {})",
            outcome.lines, outcome.points, self.score, self.level
        );
        outcome
    }

    /// Promote the look-ahead piece to falling and generate a new look-ahead.
    ///
    /// If the promoted piece does not fit, the game is over. Returns whether
    /// the spawn fit.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let fresh = self.generate_piece();
        let spawned = std::mem::replace(&mut self.next, fresh);
        let fits = self.is_valid_move(&spawned);
        debug!("spawned {:?} at ({}, {})", spawned.kind, spawned.x, spawned.y);
        self.current = Some(spawned);
        self.spawned = true;

        if !fits {
            self.game_over = true;
            info!(
                "game over: spawn blocked (score {}, level {}, lines {})",
                self.score, self.level, self.lines
            );
        }

        fits
    }

    /// One tick: spawn if nothing is falling, otherwise fall one row, or lock,
    /// clear and spawn when the piece cannot fall.
    pub fn advance(&mut self) -> Step {
        if self.game_over {
            return Step::Halted;
        }

        if self.current.is_none() {
            self.spawn_piece();
            return Step::Spawned;
        }

        if self.move_piece(0, 1) {
            return Step::Fell;
        }

        Step::Locked(self.lock_and_spawn())
    }

    fn lock_and_spawn(&mut self) -> LockEvent {
        let score_before = self.score;
        self.merge_piece();
        let cleared = self.clear_and_score();
        let fits = self.spawn_piece();

        let event = LockEvent {
            lines_cleared: cleared.lines,
            points: self.score - score_before,
            level_up: cleared.level_up,
            game_over: !fits,
        };
        self.last_event = Some(event);
        event
    }

    /// Drop the falling piece as far as it goes, then run one tick, which
    /// locks it and spawns the next piece.
    pub fn hard_drop(&mut self) -> Step {
        if self.game_over {
            return Step::Halted;
        }

        while self.move_piece(0, 1) {}
        self.advance()
    }

    /// Apply a player command. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate_current(),
            GameAction::HardDrop => self.hard_drop() != Step::Halted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn engine() -> Engine {
        Engine::seeded(10, 20, 12345).unwrap()
    }

    fn running_with(kind: PieceKind, x: i32, y: i32) -> Engine {
        let mut engine = engine();
        engine.set_current(Piece::at(kind, x, y));
        engine
    }

    fn fill_row_except(engine: &mut Engine, y: i32, gaps: &[i32]) {
        for x in 0..engine.board().width() as i32 {
            if !gaps.contains(&x) {
                engine.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_engine() {
        let engine = engine();

        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.is_game_over());
        assert!(engine.current().is_none());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.lines(), 0);
        assert_eq!(engine.board().filled_count(), 0);
        assert_eq!(engine.next().y, 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Engine::new(0, 20),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(Engine::seeded(10, 0, 1).is_err());
    }

    #[test]
    fn test_first_advance_spawns_next() {
        let mut engine = engine();
        let next = engine.next().clone();

        assert_eq!(engine.advance(), Step::Spawned);
        assert_eq!(engine.current(), Some(&next));
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_advance_falls_one_row() {
        let mut engine = running_with(PieceKind::T, 3, 0);
        assert_eq!(engine.advance(), Step::Fell);
        assert_eq!(engine.current().unwrap().y, 1);
    }

    #[test]
    fn test_move_piece_is_atomic() {
        let mut engine = running_with(PieceKind::O, 0, 0);

        assert!(!engine.move_piece(-1, 1));
        assert_eq!(engine.current(), Some(&Piece::at(PieceKind::O, 0, 0)));

        assert!(engine.move_piece(2, 3));
        assert_eq!(engine.current(), Some(&Piece::at(PieceKind::O, 2, 3)));
    }

    #[test]
    fn test_move_without_current_piece() {
        let mut engine = engine();
        assert!(!engine.move_left());
        assert!(!engine.rotate_current());
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_walls_stop_movement() {
        let mut engine = running_with(PieceKind::I, 3, 0);
        let mut moved = 0;
        for _ in 0..10 {
            if engine.move_left() {
                moved += 1;
            }
        }
        assert_eq!(moved, 3);
        assert_eq!(engine.current().unwrap().x, 0);
    }

    #[test]
    fn test_rotate_returns_candidate_or_original() {
        let engine = engine();
        let free = Piece::at(PieceKind::T, 3, 5);
        assert_eq!(engine.rotate(&free).shape, free.shape.rotated_cw());

        // Horizontal I on the floor row cannot stand up.
        let floor = Piece::at(PieceKind::I, 3, 19);
        assert_eq!(engine.rotate(&floor), floor);
    }

    #[test]
    fn test_rotate_fails_against_wall_without_kick() {
        // Vertical I against the right wall: rotating back to horizontal
        // would poke through the wall.
        let vertical = Piece::at(PieceKind::I, 0, 0).rotated().translated(9, 0);
        let mut engine = engine();
        engine.set_current(vertical.clone());

        assert!(!engine.rotate_current());
        assert_eq!(engine.current(), Some(&vertical));
    }

    #[test]
    fn test_rotate_o_always_accepted() {
        let mut engine = running_with(PieceKind::O, 8, 18);
        let before = engine.current().cloned();
        assert!(engine.rotate_current());
        assert_eq!(engine.current().cloned(), before);
    }

    #[test]
    fn test_merge_piece_awards_bonus_once() {
        let mut engine = running_with(PieceKind::L, 0, 18);
        engine.merge_piece();

        assert_eq!(engine.score(), 10);
        assert!(engine.current().is_none());
        assert_eq!(engine.board().get(2, 18), Some(Some(PieceKind::L)));
        assert_eq!(engine.board().get(0, 19), Some(Some(PieceKind::L)));
        assert_eq!(engine.board().filled_count(), 4);

        // Nothing left to merge.
        engine.merge_piece();
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn test_direct_merge_mid_game_stays_running() {
        let mut engine = engine();
        engine.advance();
        engine.soft_drop();
        engine.merge_piece();

        assert!(engine.current().is_none());
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.snapshot().phase, Phase::Running);

        // The next tick spawns the successor.
        assert_eq!(engine.advance(), Step::Spawned);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_pluggable_generator_drives_every_spawn() {
        use rand::rngs::mock::StepRng;

        // A source stuck at zero always picks the first kind.
        let mut engine = Engine::with_rng(10, 20, StepRng::new(0, 0)).unwrap();
        assert_eq!(engine.next().kind, PieceKind::I);
        for _ in 0..10 {
            engine.hard_drop();
            assert_eq!(engine.current().map(|p| p.kind), Some(PieceKind::I));
            assert_eq!(engine.next().kind, PieceKind::I);
        }
        assert_eq!(engine.generate_piece().kind, PieceKind::I);
    }

    #[test]
    fn test_clear_lines_scores_and_counts() {
        let mut engine = engine();
        fill_row_except(&mut engine, 19, &[]);
        fill_row_except(&mut engine, 18, &[]);

        assert_eq!(engine.clear_lines(), 2);
        assert_eq!(engine.score(), 300);
        assert_eq!(engine.lines(), 2);
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.board().filled_count(), 0);
    }

    #[test]
    fn test_clear_lines_no_full_rows_changes_nothing() {
        let mut engine = engine();
        fill_row_except(&mut engine, 19, &[4]);
        assert_eq!(engine.clear_lines(), 0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn test_tetris_from_level_one_steps_once() {
        let mut engine = engine();
        for y in 16..20 {
            fill_row_except(&mut engine, y, &[]);
        }
        assert_eq!(engine.clear_lines(), 4);
        assert_eq!(engine.score(), 800);
        assert_eq!(engine.level(), 2);
    }

    #[test]
    fn test_lock_bonus_alone_never_levels_up() {
        let mut engine = engine();
        for _ in 0..40 {
            engine.set_current(Piece::at(PieceKind::O, 0, 0));
            engine.merge_piece();
            engine.board_mut().clear();
        }
        assert_eq!(engine.score(), 400);
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn test_advance_locks_clears_and_spawns() {
        let mut engine = engine();
        fill_row_except(&mut engine, 19, &[3, 4, 5, 6]);
        engine.set_current(Piece::at(PieceKind::I, 3, 19));
        engine.set_next(Piece::spawn(PieceKind::T, 10));

        let step = engine.advance();
        assert_eq!(
            step,
            Step::Locked(LockEvent {
                lines_cleared: 1,
                points: 110,
                level_up: false,
                game_over: false,
            })
        );
        assert_eq!(engine.board().filled_count(), 0);
        assert_eq!(engine.current().unwrap().kind, PieceKind::T);
        assert_eq!(engine.take_last_event().map(|e| e.lines_cleared), Some(1));
        assert_eq!(engine.take_last_event(), None);
    }

    #[test]
    fn test_hard_drop_locks_on_floor() {
        let mut engine = running_with(PieceKind::O, 4, 0);
        engine.set_next(Piece::spawn(PieceKind::I, 10));

        assert!(matches!(engine.hard_drop(), Step::Locked(_)));
        assert_eq!(engine.board().get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(engine.board().get(5, 19), Some(Some(PieceKind::O)));
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.current().unwrap().kind, PieceKind::I);
    }

    #[test]
    fn test_hard_drop_without_piece_spawns() {
        let mut engine = engine();
        assert_eq!(engine.hard_drop(), Step::Spawned);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut engine = engine();
        engine.set_next(Piece::spawn(PieceKind::O, 10));
        engine.board_mut().set(4, 1, Some(PieceKind::J));
        let board_before = engine.board().clone();

        assert!(!engine.spawn_piece());
        assert!(engine.is_game_over());
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.board(), &board_before);
    }

    #[test]
    fn test_game_over_absorbs_everything() {
        let mut engine = engine();
        engine.set_next(Piece::spawn(PieceKind::O, 10));
        engine.board_mut().set(5, 0, Some(PieceKind::J));
        engine.spawn_piece();
        assert!(engine.is_game_over());

        let before = engine.snapshot();
        assert!(!engine.move_left());
        assert!(!engine.move_right());
        assert!(!engine.soft_drop());
        assert!(!engine.rotate_current());
        assert_eq!(engine.hard_drop(), Step::Halted);
        assert_eq!(engine.advance(), Step::Halted);
        assert!(!engine.spawn_piece());
        engine.merge_piece();
        assert_eq!(engine.clear_lines(), 0);
        for action in GameAction::ALL {
            assert!(!engine.apply_action(action));
        }
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut engine = running_with(PieceKind::T, 3, 0);

        assert!(engine.apply_action(GameAction::MoveRight));
        assert_eq!(engine.current().unwrap().x, 4);
        assert!(engine.apply_action(GameAction::MoveLeft));
        assert_eq!(engine.current().unwrap().x, 3);
        assert!(engine.apply_action(GameAction::SoftDrop));
        assert_eq!(engine.current().unwrap().y, 1);
        assert!(engine.apply_action(GameAction::Rotate));
        assert_eq!(engine.current().unwrap().shape.rows(), 3);
        assert!(engine.apply_action(GameAction::HardDrop));
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn test_tick_interval_follows_level() {
        let mut engine = engine();
        let slow = engine.tick_interval();
        for y in 18..20 {
            fill_row_except(&mut engine, y, &[]);
        }
        engine.clear_lines();
        assert_eq!(engine.level(), 2);
        assert!(engine.tick_interval() < slow);
    }
}
