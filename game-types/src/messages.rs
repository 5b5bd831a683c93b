use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{CountdownValue, Position, RoundPhase, RoundSummary, TargetId};

/// Input events delivered from the presentation layer to the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    StartRound { nickname: String },
    ClickTarget { target_id: TargetId },
    ResetRound,
    ResizePlayArea { width: u32, height: u32 },
}

/// Display updates emitted by the round for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    Countdown { value: CountdownValue },
    RoundStarted { nickname: String },
    TargetSpawned { target_id: TargetId, position: Position, size: u32 },
    TargetRemoved { target_id: TargetId },
    ScoreUpdate { score: u32 },
    TimeRemaining { seconds: u32 },
    RoundOver { summary: RoundSummary },
    ShowEntry,
    ValidationFailed { message: String },
    RequestRejected { message: String, phase: RoundPhase },
}
