use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The person playing the current round. Fixed from countdown end until reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub nickname: String,
}

impl Player {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
        }
    }
}
