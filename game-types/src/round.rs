use crate::RoundId;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Lifecycle phase of the single round owned by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundPhase {
    Idle,         // Entry UI shown, waiting for a nickname
    CountingDown, // 3, 2, 1, Go
    Running,      // Clock ticking, targets spawning
    Ended,        // Summary shown, waiting for reset
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundPhase::Idle => "idle",
            RoundPhase::CountingDown => "counting-down",
            RoundPhase::Running => "running",
            RoundPhase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Identity of one spawned target. Doubles as the marker handle the
/// presentation layer echoes back on click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-left corner of a marker, in play-area pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayBounds {
    pub width: u32,
    pub height: u32,
}

impl DisplayBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a square marker of `size` placed at `position` lies fully inside.
    pub fn contains_marker(&self, position: Position, size: u32) -> bool {
        position.x <= self.width.saturating_sub(size) && position.y <= self.height.saturating_sub(size)
    }
}

/// Value shown by the pre-round countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CountdownValue {
    Count(u32),
    Go,
}

impl fmt::Display for CountdownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownValue::Count(n) => write!(f, "{}", n),
            CountdownValue::Go => f.write_str("Go"),
        }
    }
}

/// Score-based outcome tier shown on the summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RewardTier {
    PrizeWon,
    NeedMore { points: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSummary {
    pub round_id: RoundId,
    pub nickname: String,
    pub score: u32,
    pub timestamp: String, // Local wall-clock time at round end, human readable
    pub reward_tier: RewardTier,
    pub reward_message: String,
    pub reward_notice: String,
}

impl RoundSummary {
    pub fn prize_won(&self) -> bool {
        matches!(self.reward_tier, RewardTier::PrizeWon)
    }
}
