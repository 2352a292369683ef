use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable rules of a game session.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it changes. Unknown fields are rejected.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// config.validate().unwrap();
///
/// assert_eq!(config.gravity_interval(0), Duration::from_millis(1000));
/// assert_eq!(config.gravity_interval(1), Duration::from_millis(720));
/// assert_eq!(config.gravity_interval(42), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Gravity interval at level 0, in milliseconds.
    pub initial_gravity_ms: u64,
    /// Gravity intervals by level, in milliseconds.
    ///
    /// Level `n > 0` uses entry `n`; levels past the end use the last entry.
    pub gravity_table_ms: Vec<u64>,
    /// Lines to clear before the level goes up.
    pub lines_per_level: u32,
    /// Base points for clearing 0, 1, 2, 3 and 4 rows at once.
    ///
    /// The awarded score is the base multiplied by `level + 1`.
    pub line_clear_points: [u64; 5],
    /// Whether soft and hard drops award points per row.
    pub drop_bonus: bool,
    /// Points per row moved by a soft drop.
    pub soft_drop_points: u64,
    /// Points per row moved by a hard drop.
    pub hard_drop_points: u64,
    /// Size of one board cell, in the render sink's units.
    pub cell_size: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_gravity_ms: 1000,
            gravity_table_ms: vec![800, 720, 630, 550, 480, 400, 350, 300, 250, 200],
            lines_per_level: 10,
            line_clear_points: [0, 100, 300, 500, 800],
            drop_bonus: true,
            soft_drop_points: 1,
            hard_drop_points: 2,
            cell_size: 2,
        }
    }
}

impl EngineConfig {
    /// Checks the invariants the engine relies on.
    ///
    /// Gravity must never speed down as the level rises, and the level
    /// threshold must be reachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(&first) = self.gravity_table_ms.first() else {
            return Err(ConfigError::EmptyGravityTable);
        };
        if self.initial_gravity_ms == 0 {
            return Err(ConfigError::ZeroGravityInterval { level: 0 });
        }
        if let Some(level) = self.gravity_table_ms.iter().position(|&ms| ms == 0) {
            return Err(ConfigError::ZeroGravityInterval { level });
        }
        let level_one = self.gravity_table_ms.get(1).copied().unwrap_or(first);
        if level_one > self.initial_gravity_ms {
            return Err(ConfigError::GravityNotMonotonic { level: 1 });
        }
        if let Some(i) = self
            .gravity_table_ms
            .windows(2)
            .position(|pair| pair[1] > pair[0])
        {
            return Err(ConfigError::GravityNotMonotonic { level: i + 1 });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if let Some(i) = self
            .line_clear_points
            .windows(2)
            .position(|pair| pair[1] < pair[0])
        {
            return Err(ConfigError::LineClearPointsNotMonotonic { lines: i + 1 });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Ok(())
    }

    /// Returns the gravity interval for a level.
    ///
    /// # Panics
    ///
    /// Panics if the gravity table is empty; [`validate`](Self::validate)
    /// rejects such configurations.
    #[must_use]
    pub fn gravity_interval(&self, level: usize) -> Duration {
        if level == 0 {
            return Duration::from_millis(self.initial_gravity_ms);
        }
        let last = self.gravity_table_ms.len() - 1;
        Duration::from_millis(self.gravity_table_ms[usize::min(level, last)])
    }

    /// Returns the points for clearing `lines` rows at `level`.
    ///
    /// Saturates at `u64::MAX` instead of overflowing.
    #[must_use]
    pub fn line_clear_score(&self, lines: usize, level: usize) -> u64 {
        let base = self.line_clear_points[usize::min(lines, self.line_clear_points.len() - 1)];
        let multiplier = u64::try_from(level).map_or(u64::MAX, |level| level.saturating_add(1));
        base.saturating_mul(multiplier)
    }
}

/// Configuration rejected by [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("gravity table must not be empty")]
    EmptyGravityTable,
    #[display("gravity interval for level {level} must be positive")]
    ZeroGravityInterval { level: usize },
    #[display("gravity interval for level {level} is slower than the level before it")]
    GravityNotMonotonic { level: usize },
    #[display("lines per level must be positive")]
    ZeroLinesPerLevel,
    #[display("points for clearing {lines} lines are lower than for {} lines", lines - 1)]
    LineClearPointsNotMonotonic { lines: usize },
    #[display("cell size must be positive")]
    ZeroCellSize,
}
