use game_types::{Position, RoundId, RoundSummary, TargetId};

use crate::TargetResolution;

#[derive(Debug, Clone)]
pub enum RoundEvent {
    CountdownStarted {
        round_id: RoundId,
        from: u32,
    },
    RoundStarted {
        round_id: RoundId,
        nickname: String,
        duration_seconds: u32,
    },
    TargetSpawned {
        round_id: RoundId,
        target_id: TargetId,
        position: Position,
    },
    TargetHit {
        round_id: RoundId,
        target_id: TargetId,
        score: u32,
    },
    TargetMissed {
        round_id: RoundId,
        target_id: TargetId,
    },
    TargetCleared {
        round_id: RoundId,
        target_id: TargetId,
    },
    ClockTicked {
        round_id: RoundId,
        remaining_seconds: u32,
    },
    RoundEnded {
        round_id: RoundId,
        summary: RoundSummary,
    },
    RoundReset {
        round_id: RoundId,
    },
}

impl RoundEvent {
    pub fn round_id(&self) -> RoundId {
        match self {
            RoundEvent::CountdownStarted { round_id, .. } => *round_id,
            RoundEvent::RoundStarted { round_id, .. } => *round_id,
            RoundEvent::TargetSpawned { round_id, .. } => *round_id,
            RoundEvent::TargetHit { round_id, .. } => *round_id,
            RoundEvent::TargetMissed { round_id, .. } => *round_id,
            RoundEvent::TargetCleared { round_id, .. } => *round_id,
            RoundEvent::ClockTicked { round_id, .. } => *round_id,
            RoundEvent::RoundEnded { round_id, .. } => *round_id,
            RoundEvent::RoundReset { round_id } => *round_id,
        }
    }

    /// Build the event that records how a target was settled
    pub fn target_resolved(
        round_id: RoundId,
        target_id: TargetId,
        resolution: TargetResolution,
        score: u32,
    ) -> Self {
        match resolution {
            TargetResolution::Hit => RoundEvent::TargetHit {
                round_id,
                target_id,
                score,
            },
            TargetResolution::Missed => RoundEvent::TargetMissed { round_id, target_id },
            TargetResolution::Cleared => RoundEvent::TargetCleared { round_id, target_id },
        }
    }
}

/// Event handler trait for processing round events
pub trait RoundEventHandler {
    fn handle_event(&mut self, event: RoundEvent);
}

/// Simple event bus for distributing round events
pub struct RoundEventBus {
    handlers: Vec<Box<dyn RoundEventHandler + Send>>,
}

impl RoundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: RoundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for RoundEventBus {
    fn default() -> Self {
        Self::new()
    }
}
