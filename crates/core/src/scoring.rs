//! Scoring module - lock bonus, line-clear points, speed levels and cadence
//!
//! - Every lock awards a flat `LOCK_BONUS`.
//! - Clearing N rows in one pass awards `LINE_SCORES[N]` (marathon values, no
//!   level multiplier). N above 4 cannot come from one tetromino but is clamped
//!   to the 4-row value rather than indexing past the table.
//! - After a clear, the level goes up by one when `score / LEVEL_SCORE_STEP`
//!   exceeds `level - 1`. It never moves more than one step per clear.

use std::time::Duration;

use crate::types::{BASE_TICK_MS, LEVEL_SCORE_STEP, LINE_SCORES, SPEED_FACTOR};

pub use crate::types::LOCK_BONUS;

/// Points for clearing `lines` rows in a single pass
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Level after a line clear brought the score to `score`.
pub fn next_level(score: u32, level: u32) -> u32 {
    if score / LEVEL_SCORE_STEP > level.saturating_sub(1) {
        level + 1
    } else {
        level
    }
}

/// Interval between ticks a driver should use at `level`:
/// `BASE_TICK_MS / (level * SPEED_FACTOR)`, rounded to the microsecond.
pub fn tick_interval(level: u32) -> Duration {
    let level = level.max(1) as f64;
    let micros = (BASE_TICK_MS as f64 * 1000.0) / (level * SPEED_FACTOR);
    Duration::from_micros(micros.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 300);
        assert_eq!(line_clear_points(3), 500);
        assert_eq!(line_clear_points(4), 800);
    }

    #[test]
    fn test_line_clear_points_clamped_above_four() {
        assert_eq!(line_clear_points(5), 800);
        assert_eq!(line_clear_points(20), 800);
    }

    #[test]
    fn test_level_steps_at_300_point_boundaries() {
        assert_eq!(next_level(0, 1), 1);
        assert_eq!(next_level(299, 1), 1);
        assert_eq!(next_level(300, 1), 2);
        assert_eq!(next_level(599, 2), 2);
        assert_eq!(next_level(600, 2), 3);
    }

    #[test]
    fn test_level_single_step_per_clear() {
        // 810 points crosses two boundaries from level 1, but only one step is taken.
        assert_eq!(next_level(810, 1), 2);
        assert_eq!(next_level(810, 2), 3);
        assert_eq!(next_level(810, 3), 3);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(1), Duration::from_millis(250));
        assert_eq!(tick_interval(2), Duration::from_micros(125_000));
        assert_eq!(tick_interval(3), Duration::from_micros(83_333));
        // Level 0 never occurs; treated as level 1 rather than dividing by zero.
        assert_eq!(tick_interval(0), tick_interval(1));
    }

    #[test]
    fn test_tick_interval_decreases_with_level() {
        for level in 1..30 {
            assert!(tick_interval(level + 1) < tick_interval(level));
        }
    }
}
