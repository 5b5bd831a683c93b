use game_types::{CountdownValue, DisplayBounds, Position, RoundError, RoundSummary, TargetId};

/// Display surface the round controller drives. Implementations own every
/// toolkit detail; the controller only speaks in ids, positions and numbers.
pub trait Presentation {
    /// Current size of the play surface, read on every spawn
    fn display_bounds(&self) -> DisplayBounds;

    /// Show a clickable marker. Clicks must be reported back with `target_id`.
    fn render_target(&mut self, target_id: TargetId, position: Position, size: u32);

    /// Remove a marker. Must tolerate ids that are already gone.
    fn remove_target(&mut self, target_id: TargetId);

    fn report_score(&mut self, score: u32);

    fn report_time_remaining(&mut self, seconds: u32);

    fn report_countdown(&mut self, value: CountdownValue);

    fn report_round_started(&mut self, nickname: &str);

    fn report_round_end(&mut self, summary: &RoundSummary);

    fn report_validation_error(&mut self, error: &RoundError);

    /// Bring back the nickname entry UI
    fn show_entry(&mut self);
}
