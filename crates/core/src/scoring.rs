//! Scoring module - line clears, combos, back-to-back, levels and gravity
//!
//! Rules:
//! - Line clears score `LINE_SCORES[n] * level` (100/300/500/800).
//! - A 4-line clear directly after another 4-line clear is multiplied by 3/2
//!   (truncated). Any 1-3 line clear breaks the chain; a lock with no clear
//!   leaves it alone.
//! - Combo counts consecutive clearing locks. From the second one on, each
//!   adds `COMBO_BASE * (combo - 1) * level`. A lock with no clear resets it.
//! - `level = lines / LINES_PER_LEVEL + 1`.
//! - Gravity follows the per-level table in cells per frame at 60Hz.

use crate::types::{
    B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, GRAVITY_TABLE, HARD_DROP_POINTS_PER_CELL,
    LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_INTERVAL_MS, SOFT_DROP_POINTS_PER_CELL,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the clear itself (includes B2B multiplier, excludes combo bonus).
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether a B2B multiplier was applied to this clear.
    pub b2b_applied: bool,
}

/// Base points for clearing `lines` rows at `level`.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_SCORES[lines.min(4) as usize].saturating_mul(level)
}

/// Bonus for the `combo`-th consecutive clearing lock.
pub fn combo_bonus(combo: u32, level: u32) -> u32 {
    if combo <= 1 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo - 1)
        .saturating_mul(level)
}

/// Apply the B2B multiplier (3/2, truncated) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points
        .saturating_mul(B2B_NUMERATOR)
        .saturating_div(B2B_DENOMINATOR)
}

/// Level reached after clearing `total_lines` (1-based).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds per row.
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = (level.max(1) - 1).min(GRAVITY_TABLE.len() as u32 - 1) as usize;
    let cells_per_frame = GRAVITY_TABLE[idx];
    let ms = (1000.0 / (60.0 * cells_per_frame)).round() as u32;
    ms.max(MIN_DROP_INTERVAL_MS)
}

/// Points for a drop of `cells` rows.
pub fn drop_points(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS_PER_CELL
    } else {
        SOFT_DROP_POINTS_PER_CELL
    };
    cells.saturating_mul(per_cell)
}

/// Running score, lines, level, combo and back-to-back state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    score: u32,
    lines: u32,
    level: u32,
    combo: u32,
    back_to_back: bool,
}

impl Scoring {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            back_to_back: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    /// Gravity interval for the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Record the outcome of one lock. The clear is scored at the level in
    /// effect before its lines are counted.
    pub fn apply_clear(&mut self, lines_cleared: u32) -> ScoreResult {
        if lines_cleared == 0 {
            self.combo = 0;
            return ScoreResult::default();
        }

        let level = self.level;
        let difficult = lines_cleared >= 4;
        let b2b_applied = difficult && self.back_to_back;

        let base = line_clear_points(lines_cleared, level);
        let line_clear_score = if b2b_applied {
            apply_b2b_multiplier(base)
        } else {
            base
        };

        self.combo += 1;
        let combo_bonus = combo_bonus(self.combo, level);
        let total = line_clear_score.saturating_add(combo_bonus);

        self.score = self.score.saturating_add(total);
        self.back_to_back = difficult;
        self.lines = self.lines.saturating_add(lines_cleared);
        self.level = level_for_lines(self.lines);

        ScoreResult {
            line_clear_score,
            combo_bonus,
            total,
            b2b_applied,
        }
    }

    /// Award drop points. Returns the points added.
    pub fn add_drop(&mut self, cells: u32, is_hard_drop: bool) -> u32 {
        let points = drop_points(cells, is_hard_drop);
        self.score = self.score.saturating_add(points);
        points
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);
        assert_eq!(line_clear_points(4, 3), 2400);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(combo_bonus(0, 1), 0);
        assert_eq!(combo_bonus(1, 1), 0);
        assert_eq!(combo_bonus(2, 1), 50);
        assert_eq!(combo_bonus(4, 2), 300);
    }

    #[test]
    fn test_b2b_multiplier() {
        assert_eq!(apply_b2b_multiplier(0), 0);
        assert_eq!(apply_b2b_multiplier(800), 1200);
        assert_eq!(apply_b2b_multiplier(101), 151);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(0), 1000);
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 793);
        assert_eq!(drop_interval_ms(14), MIN_DROP_INTERVAL_MS);
        assert_eq!(drop_interval_ms(99), MIN_DROP_INTERVAL_MS);
        for level in 1..20 {
            assert!(drop_interval_ms(level + 1) <= drop_interval_ms(level));
        }
    }

    #[test]
    fn test_drop_points() {
        assert_eq!(drop_points(10, false), 10);
        assert_eq!(drop_points(10, true), 20);
    }

    #[test]
    fn test_no_clear_resets_combo_keeps_b2b() {
        let mut s = Scoring::new();
        s.apply_clear(4);
        s.apply_clear(1);
        assert_eq!(s.combo(), 2);
        s.apply_clear(4);
        assert!(s.back_to_back());
        let r = s.apply_clear(0);
        assert_eq!(r, ScoreResult::default());
        assert_eq!(s.combo(), 0);
        assert!(s.back_to_back());
    }

    #[test]
    fn test_back_to_back_tetris() {
        let mut s = Scoring::new();
        let first = s.apply_clear(4);
        assert_eq!(first.line_clear_score, 800);
        assert_eq!(first.combo_bonus, 0);
        assert!(!first.b2b_applied);

        let second = s.apply_clear(4);
        assert!(second.b2b_applied);
        assert_eq!(second.line_clear_score, 1200);
        assert_eq!(second.combo_bonus, 50);
        assert_eq!(s.score(), 800 + 1200 + 50);
        assert_eq!(s.lines(), 8);
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn test_small_clear_breaks_b2b() {
        let mut s = Scoring::new();
        s.apply_clear(4);
        s.apply_clear(2);
        assert!(!s.back_to_back());
        let r = s.apply_clear(4);
        assert!(!r.b2b_applied);
    }

    #[test]
    fn test_level_up_applies_after_clear() {
        let mut s = Scoring::new();
        for _ in 0..2 {
            s.apply_clear(4);
            s.apply_clear(0);
        }
        assert_eq!(s.lines(), 8);
        // Scored at level 1, then level becomes 2.
        let r = s.apply_clear(2);
        assert_eq!(r.line_clear_score, 300);
        assert_eq!(s.level(), 2);
        assert_eq!(s.drop_interval_ms(), 793);
    }
}
