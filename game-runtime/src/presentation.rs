use game_core::Presentation;
use game_types::{
    CountdownValue, DisplayBounds, Position, RoundError, RoundSummary, ServerMessage, TargetId,
};
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::trace;

/// Presentation that forwards every update as a `ServerMessage`, leaving the
/// actual drawing to whoever holds the receiver.
pub struct ChannelPresentation {
    bounds: DisplayBounds,
    rendered: HashSet<TargetId>,
    sender: mpsc::UnboundedSender<ServerMessage>,
}

impl ChannelPresentation {
    pub fn new(bounds: DisplayBounds) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let presentation = Self {
            bounds,
            rendered: HashSet::new(),
            sender,
        };
        (presentation, receiver)
    }

    pub fn set_bounds(&mut self, bounds: DisplayBounds) {
        self.bounds = bounds;
    }

    fn send(&self, message: ServerMessage) {
        if self.sender.send(message).is_err() {
            trace!("Presentation receiver dropped, discarding update");
        }
    }
}

impl Presentation for ChannelPresentation {
    fn display_bounds(&self) -> DisplayBounds {
        self.bounds
    }

    fn render_target(&mut self, target_id: TargetId, position: Position, size: u32) {
        self.rendered.insert(target_id);
        self.send(ServerMessage::TargetSpawned {
            target_id,
            position,
            size,
        });
    }

    fn remove_target(&mut self, target_id: TargetId) {
        if self.rendered.remove(&target_id) {
            self.send(ServerMessage::TargetRemoved { target_id });
        }
    }

    fn report_score(&mut self, score: u32) {
        self.send(ServerMessage::ScoreUpdate { score });
    }

    fn report_time_remaining(&mut self, seconds: u32) {
        self.send(ServerMessage::TimeRemaining { seconds });
    }

    fn report_countdown(&mut self, value: CountdownValue) {
        self.send(ServerMessage::Countdown { value });
    }

    fn report_round_started(&mut self, nickname: &str) {
        self.send(ServerMessage::RoundStarted {
            nickname: nickname.to_string(),
        });
    }

    fn report_round_end(&mut self, summary: &RoundSummary) {
        self.send(ServerMessage::RoundOver {
            summary: summary.clone(),
        });
    }

    fn report_validation_error(&mut self, error: &RoundError) {
        let message = match error {
            RoundError::EmptyNickname => ServerMessage::ValidationFailed {
                message: error.to_string(),
            },
            RoundError::InvalidPhase { phase, .. } => ServerMessage::RequestRejected {
                message: error.to_string(),
                phase: *phase,
            },
        };
        self.send(message);
    }

    fn show_entry(&mut self) {
        self.send(ServerMessage::ShowEntry);
    }
}
