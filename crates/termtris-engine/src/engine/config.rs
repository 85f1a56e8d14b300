use std::time::Duration;

use crate::{ConfigError, PieceSeed};

/// Maps the score to the gravity interval.
///
/// `interval_ms = max(floor_ms, initial_ms - score / score_divisor)`
///
/// With the defaults the game starts at 800 ms per row and speeds up by 100 ms every
/// 500 points until it reaches 200 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedCurve {
    pub initial_ms: u32,
    pub floor_ms: u32,
    pub score_divisor: u32,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            initial_ms: 800,
            floor_ms: 200,
            score_divisor: 5,
        }
    }
}

impl SpeedCurve {
    #[must_use]
    pub fn interval_for(&self, score: u32) -> Duration {
        let reduction = score / self.score_divisor.max(1);
        let millis = self.initial_ms.saturating_sub(reduction).max(self.floor_ms);
        Duration::from_millis(u64::from(millis))
    }
}

/// Settings of one play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Seed of the piece bag; `None` picks a random one.
    pub seed: Option<PieceSeed>,
    pub speed: SpeedCurve,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            seed: None,
            speed: SpeedCurve::default(),
        }
    }
}

impl GameConfig {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;
    /// Spawn offsets put the widest piece in columns 3..=6.
    pub const MIN_WIDTH: usize = 7;
    /// The tallest rotation state spans four rows.
    pub const MIN_HEIGHT: usize = 4;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < Self::MIN_WIDTH {
            return Err(ConfigError::BoardTooNarrow {
                width: self.width,
                min: Self::MIN_WIDTH,
            });
        }
        if self.height < Self::MIN_HEIGHT {
            return Err(ConfigError::BoardTooShort {
                height: self.height,
                min: Self::MIN_HEIGHT,
            });
        }
        Ok(())
    }
}
