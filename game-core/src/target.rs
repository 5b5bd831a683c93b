use crate::timers::TimerHandle;
use game_types::{DisplayBounds, Position, TargetId};
use rand::Rng;

/// How a target left the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    Hit,
    Missed,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Spawned,
    Resolved(TargetResolution),
}

/// One live marker plus the lifetime timer racing the player's click.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub position: Position,
    pub lifetime: TimerHandle,
    state: TargetState,
}

impl Target {
    pub fn new(id: TargetId, position: Position, lifetime: TimerHandle) -> Self {
        Self {
            id,
            position,
            lifetime,
            state: TargetState::Spawned,
        }
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == TargetState::Spawned
    }

    /// Settle the target. Only the first call wins; later calls return false.
    pub fn resolve(&mut self, resolution: TargetResolution) -> bool {
        if !self.is_live() {
            return false;
        }
        self.state = TargetState::Resolved(resolution);
        true
    }
}

/// Pick a uniformly random top-left corner so a `size` x `size` marker stays
/// inside `bounds`. A surface smaller than the marker pins that axis to 0.
pub fn random_position<R: Rng>(bounds: DisplayBounds, size: u32, rng: &mut R) -> Position {
    let max_x = bounds.width.saturating_sub(size);
    let max_y = bounds.height.saturating_sub(size);

    Position {
        x: rng.gen_range(0..=max_x),
        y: rng.gen_range(0..=max_y),
    }
}
