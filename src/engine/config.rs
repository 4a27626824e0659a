use std::time::Duration;

use anyhow::{Result, ensure};

use crate::engine::{board::MAX_SIDE, history::RepetitionPolicy};

/// Settings fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesConfig {
    pub width: usize,
    pub height: usize,
    pub repetition: RepetitionPolicy,
    /// Whole-game clock. `None` plays untimed. The engine never reads a
    /// clock itself; the front-end calls `expire_clock` when this runs out.
    pub time_limit: Option<Duration>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 7,
            repetition: RepetitionPolicy::Superko,
            time_limit: Some(Duration::from_secs(300)),
        }
    }
}

impl RulesConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_SIDE).contains(&self.width),
            "board width must be between 1 and {}, got {}",
            MAX_SIDE,
            self.width
        );
        ensure!(
            (1..=MAX_SIDE).contains(&self.height),
            "board height must be between 1 and {}, got {}",
            MAX_SIDE,
            self.height
        );
        if let Some(limit) = self.time_limit {
            ensure!(!limit.is_zero(), "time limit must be positive");
        }
        Ok(())
    }
}
