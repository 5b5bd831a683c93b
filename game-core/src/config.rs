use std::time::Duration;
use thiserror::Error;

pub const ROUND_DURATION_SECS: u32 = 10;
pub const SCORE_PER_HIT: u32 = 1;
pub const TARGET_LIFETIME: Duration = Duration::from_millis(1000);
pub const PRIZE_THRESHOLD: u32 = 30;
pub const TARGET_SIZE: u32 = 80;
pub const COUNTDOWN_FROM: u32 = 3;
pub const COUNTDOWN_TICK: Duration = Duration::from_millis(1000);
pub const CLOCK_TICK: Duration = Duration::from_millis(1000);
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    MustBePositive { field: &'static str },
}

/// Tunables for a round. Every field has a named default above.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundConfig {
    pub round_duration_secs: u32,
    pub score_per_hit: u32,
    pub target_lifetime: Duration,
    pub prize_threshold: u32,
    pub target_size: u32,
    pub countdown_from: u32,
    pub countdown_tick: Duration,
    pub clock_tick: Duration,
    pub timestamp_format: String,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_duration_secs: ROUND_DURATION_SECS,
            score_per_hit: SCORE_PER_HIT,
            target_lifetime: TARGET_LIFETIME,
            prize_threshold: PRIZE_THRESHOLD,
            target_size: TARGET_SIZE,
            countdown_from: COUNTDOWN_FROM,
            countdown_tick: COUNTDOWN_TICK,
            clock_tick: CLOCK_TICK,
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("round_duration_secs", self.round_duration_secs == 0),
            ("score_per_hit", self.score_per_hit == 0),
            ("target_lifetime", self.target_lifetime.is_zero()),
            ("target_size", self.target_size == 0),
            ("countdown_tick", self.countdown_tick.is_zero()),
            ("clock_tick", self.clock_tick.is_zero()),
        ];

        match checks.iter().find(|(_, invalid)| *invalid) {
            Some((field, _)) => Err(ConfigError::MustBePositive { field: *field }),
            None => Ok(()),
        }
    }
}
