use crate::RoundPhase;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Request failures surfaced to the player. Stale clicks and timer firings are
/// not errors and never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundError {
    #[error("Please enter a nickname before starting")]
    EmptyNickname,
    #[error("Cannot {operation} while the round is {phase}")]
    InvalidPhase { operation: String, phase: RoundPhase },
}

impl RoundError {
    pub fn invalid_phase(operation: &str, phase: RoundPhase) -> Self {
        RoundError::InvalidPhase {
            operation: operation.to_string(),
            phase,
        }
    }
}
