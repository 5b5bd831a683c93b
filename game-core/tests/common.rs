#![allow(dead_code)]

use game_core::{ConfigError, ManualScheduler, Presentation, RoundConfig, RoundController, RoundEvent, RoundEventHandler};
use game_types::{CountdownValue, DisplayBounds, Position, RoundError, RoundSummary, TargetId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type TestController = RoundController<RecordingPresentation, ManualScheduler, StdRng>;

/// One call made by the controller into the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationCall {
    Render { target_id: TargetId, position: Position, size: u32 },
    Remove { target_id: TargetId },
    Score(u32),
    TimeRemaining(u32),
    Countdown(CountdownValue),
    RoundStarted(String),
    RoundEnd(RoundSummary),
    ValidationError(RoundError),
    ShowEntry,
}

/// Presentation double that records every call and tracks live markers
pub struct RecordingPresentation {
    pub bounds: DisplayBounds,
    pub calls: Vec<PresentationCall>,
    pub live_markers: BTreeSet<TargetId>,
    pub max_live_markers: usize,
}

impl RecordingPresentation {
    pub fn new(bounds: DisplayBounds) -> Self {
        Self {
            bounds,
            calls: Vec::new(),
            live_markers: BTreeSet::new(),
            max_live_markers: 0,
        }
    }

    pub fn countdowns(&self) -> Vec<CountdownValue> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::Countdown(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn scores(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::Score(score) => Some(*score),
                _ => None,
            })
            .collect()
    }

    pub fn times(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::TimeRemaining(seconds) => Some(*seconds),
                _ => None,
            })
            .collect()
    }

    pub fn renders(&self) -> Vec<(TargetId, Position, u32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::Render { target_id, position, size } => {
                    Some((*target_id, *position, *size))
                }
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<RoundSummary> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::RoundEnd(summary) => Some(summary.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn validation_errors(&self) -> Vec<RoundError> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PresentationCall::ValidationError(error) => Some(error.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn entry_shown(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PresentationCall::ShowEntry))
            .count()
    }
}

impl Presentation for RecordingPresentation {
    fn display_bounds(&self) -> DisplayBounds {
        self.bounds
    }

    fn render_target(&mut self, target_id: TargetId, position: Position, size: u32) {
        self.live_markers.insert(target_id);
        self.max_live_markers = self.max_live_markers.max(self.live_markers.len());
        self.calls.push(PresentationCall::Render { target_id, position, size });
    }

    fn remove_target(&mut self, target_id: TargetId) {
        self.live_markers.remove(&target_id);
        self.calls.push(PresentationCall::Remove { target_id });
    }

    fn report_score(&mut self, score: u32) {
        self.calls.push(PresentationCall::Score(score));
    }

    fn report_time_remaining(&mut self, seconds: u32) {
        self.calls.push(PresentationCall::TimeRemaining(seconds));
    }

    fn report_countdown(&mut self, value: CountdownValue) {
        self.calls.push(PresentationCall::Countdown(value));
    }

    fn report_round_started(&mut self, nickname: &str) {
        self.calls.push(PresentationCall::RoundStarted(nickname.to_string()));
    }

    fn report_round_end(&mut self, summary: &RoundSummary) {
        self.calls.push(PresentationCall::RoundEnd(summary.clone()));
    }

    fn report_validation_error(&mut self, error: &RoundError) {
        self.calls.push(PresentationCall::ValidationError(error.clone()));
    }

    fn show_entry(&mut self) {
        self.calls.push(PresentationCall::ShowEntry);
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<RoundEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<RoundEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl RoundEventHandler for EventCollector {
    fn handle_event(&mut self, event: RoundEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub const SECOND: Duration = Duration::from_secs(1);

pub fn test_bounds() -> DisplayBounds {
    DisplayBounds::new(600, 400)
}

pub fn try_create_controller(config: RoundConfig) -> Result<TestController, ConfigError> {
    RoundController::with_rng(
        config,
        RecordingPresentation::new(test_bounds()),
        ManualScheduler::new(),
        StdRng::seed_from_u64(42),
    )
}

pub fn create_controller_with_config(config: RoundConfig) -> TestController {
    try_create_controller(config).expect("test config should be valid")
}

/// Creates a controller with the stock configuration and a fixed seed
pub fn create_controller() -> TestController {
    create_controller_with_config(RoundConfig::default())
}

/// Attaches an event collector to the controller's bus
pub fn attach_collector(controller: &mut TestController) -> EventCollector {
    let collector = EventCollector::new();
    controller
        .event_bus_mut()
        .add_handler(Box::new(collector.clone()));
    collector
}

/// Starts a round and runs the 3-2-1-Go countdown until targets are live
pub fn start_running_round(controller: &mut TestController, nickname: &str) {
    controller.request_start(nickname).expect("start should be accepted");
    let countdown = controller.config().countdown_tick * (controller.config().countdown_from + 1);
    controller.advance(countdown);
}

/// Clicks whatever target is currently live
pub fn click_live_target(controller: &mut TestController) -> TargetId {
    let target_id = controller.live_target().expect("a target should be live").id;
    controller.on_target_clicked(target_id);
    target_id
}
