use std::time::Duration;

use serde::Serialize;

use crate::config::EngineConfig;

/// Game statistics tracking score, lines, and level.
///
/// - **Score**: line-clear points scaled by level, plus drop bonuses
/// - **Lines**: rows cleared since the last level-up
/// - **Level**: goes up each time `lines_per_level` rows have been cleared
/// - **Completed pieces**: number of frozen pieces
/// - **Line clear distribution**: count of drops clearing 0, 1, 2, 3 and 4 rows
///
/// Score and level never go down. The score saturates at `u64::MAX`.
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, GameStats};
///
/// let config = EngineConfig::default();
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4, &config);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    level: usize,
    lines: usize,
    total_cleared_lines: usize,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
    play_time: Duration,
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 0,
            lines: 0,
            total_cleared_lines: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
            play_time: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the rows cleared since the last level-up.
    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of piece drops by number of rows cleared.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the running time accumulated by gravity ticks.
    #[must_use]
    pub const fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Returns the values a scoreboard shows.
    #[must_use]
    pub const fn readout(&self) -> SessionReadout {
        SessionReadout {
            score: self.score,
            lines: self.lines,
            level: self.level,
        }
    }

    pub(crate) fn add_play_time(&mut self, elapsed: Duration) {
        self.play_time = self.play_time.saturating_add(elapsed);
    }

    pub(crate) fn add_drop_bonus(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    #[cfg(test)]
    pub(crate) fn set_progress(&mut self, level: usize, lines: usize) {
        self.level = level;
        self.lines = lines;
    }

    /// Updates statistics after a piece froze and `cleared_lines` rows were removed.
    ///
    /// Any level-up the cleared rows cause happens first, so the line-clear
    /// points use the new level. Returns `true` if the level went up.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, config: &EngineConfig) -> bool {
        self.completed_pieces += 1;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.total_cleared_lines += cleared_lines;
        self.lines += cleared_lines;

        let threshold = config.lines_per_level as usize;
        let level_before = self.level;
        while self.lines >= threshold {
            self.lines -= threshold;
            self.level += 1;
        }

        let points = config.line_clear_score(cleared_lines, self.level);
        self.score = self.score.saturating_add(points);
        self.level > level_before
    }
}

/// Score, lines and level as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionReadout {
    pub score: u64,
    pub lines: usize,
    pub level: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        let config = EngineConfig::default();
        for (lines, points) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut stats = GameStats::new();
            stats.complete_piece_drop(lines, &config);
            assert_eq!(stats.score(), points, "{lines} lines");
        }
    }

    #[test]
    fn test_points_scale_with_level() {
        let config = EngineConfig::default();
        let mut stats = GameStats::new();
        stats.level = 3;
        stats.complete_piece_drop(2, &config);
        assert_eq!(stats.score(), 300 * 4);
    }

    #[test]
    fn test_level_up_after_ten_lines() {
        let config = EngineConfig::default();
        let mut stats = GameStats::new();
        assert!(!stats.complete_piece_drop(4, &config));
        assert!(!stats.complete_piece_drop(4, &config));
        assert_eq!(stats.level(), 0);
        assert_eq!(stats.lines(), 8);

        assert!(stats.complete_piece_drop(3, &config));
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.lines(), 11 - 10);
        assert_eq!(stats.total_cleared_lines(), 11);
    }

    #[test]
    fn test_level_up_clear_scores_at_new_level() {
        let config = EngineConfig::default();
        let mut stats = GameStats::new();
        stats.complete_piece_drop(4, &config);
        stats.complete_piece_drop(4, &config);
        let before = stats.score();
        stats.complete_piece_drop(2, &config);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.score() - before, 300 * 2);
    }

    #[test]
    fn test_score_saturates() {
        let config = EngineConfig {
            line_clear_points: [0, 100, 300, 500, u64::MAX / 2],
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let mut stats = GameStats::new();
        stats.set_progress(3, 0);
        stats.complete_piece_drop(4, &config);
        assert_eq!(stats.score(), u64::MAX);

        stats.add_drop_bonus(2);
        stats.complete_piece_drop(1, &config);
        assert_eq!(stats.score(), u64::MAX);
    }

    #[test]
    fn test_small_threshold_can_level_twice() {
        let config = EngineConfig {
            lines_per_level: 2,
            ..EngineConfig::default()
        };
        let mut stats = GameStats::new();
        assert!(stats.complete_piece_drop(4, &config));
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.lines(), 0);
    }

    #[test]
    fn test_counters() {
        let config = EngineConfig::default();
        let mut stats = GameStats::new();
        for lines in [0, 1, 1, 4, 0, 0] {
            stats.complete_piece_drop(lines, &config);
        }
        assert_eq!(stats.completed_pieces(), 6);
        assert_eq!(stats.line_cleared_counter(), &[3, 2, 0, 0, 1]);
    }

    #[test]
    fn test_readout() {
        let config = EngineConfig::default();
        let mut stats = GameStats::new();
        stats.add_drop_bonus(6);
        stats.complete_piece_drop(1, &config);
        assert_eq!(
            stats.readout(),
            SessionReadout {
                score: 106,
                lines: 1,
                level: 0,
            }
        );
        let json = serde_json::to_string(&stats.readout()).unwrap();
        assert_eq!(json, r#"{"score":106,"lines":1,"level":0}"#);
    }
}
