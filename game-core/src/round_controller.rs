use chrono::Local;
use game_types::{
    CountdownValue, Player, RoundError, RoundId, RoundPhase, RoundSummary, TargetId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::{
    ConfigError, ManualScheduler, Presentation, REWARD_NOTICE, RewardPolicy, RoundConfig,
    RoundEvent,
    RoundEventBus, Scheduler, Target, TargetResolution, TimerHandle, TimerKind,
    normalize_nickname, random_position,
};

/// Pre-round countdown. `remaining` is `None` once "Go" has been shown.
#[derive(Debug)]
struct Countdown {
    nickname: String,
    remaining: Option<u32>,
    timer: TimerHandle,
}

/// Owns one round: its phase, score, clock and the single live target.
///
/// Every transition goes through a method here. Input events and timer
/// firings must be delivered one at a time; the controller never blocks and
/// never touches a UI toolkit directly.
pub struct RoundController<P, S, R = StdRng> {
    config: RoundConfig,
    presentation: P,
    scheduler: S,
    rng: R,
    event_bus: RoundEventBus,
    phase: RoundPhase,
    round_id: RoundId,
    player: Option<Player>,
    score: u32,
    remaining_seconds: u32,
    countdown: Option<Countdown>,
    clock_timer: Option<TimerHandle>,
    target: Option<Target>,
    next_target_id: u32,
    last_summary: Option<RoundSummary>,
}

impl<P: Presentation, S: Scheduler> RoundController<P, S, StdRng> {
    pub fn new(config: RoundConfig, presentation: P, scheduler: S) -> Result<Self, ConfigError> {
        Self::with_rng(config, presentation, scheduler, StdRng::from_entropy())
    }
}

impl<P: Presentation, S: Scheduler, R: Rng> RoundController<P, S, R> {
    /// Build an idle controller. Zero durations or sizes are refused, since
    /// a zero-period timer can never advance the round.
    pub fn with_rng(
        config: RoundConfig,
        presentation: P,
        scheduler: S,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let remaining_seconds = config.round_duration_secs;
        Ok(Self {
            config,
            presentation,
            scheduler,
            rng,
            event_bus: RoundEventBus::new(),
            phase: RoundPhase::Idle,
            round_id: Uuid::nil(),
            player: None,
            score: 0,
            remaining_seconds,
            countdown: None,
            clock_timer: None,
            target: None,
            next_target_id: 1,
            last_summary: None,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn live_target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn event_bus_mut(&mut self) -> &mut RoundEventBus {
        &mut self.event_bus
    }

    /// Validate the nickname and begin the pre-round countdown.
    pub fn request_start(&mut self, raw_nickname: &str) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Idle {
            let error = RoundError::invalid_phase("start a round", self.phase);
            warn!("Rejected start request: {}", error);
            self.presentation.report_validation_error(&error);
            return Err(error);
        }

        let nickname = match normalize_nickname(raw_nickname) {
            Ok(nickname) => nickname,
            Err(error) => {
                warn!("Rejected start request: {}", error);
                self.presentation.report_validation_error(&error);
                return Err(error);
            }
        };

        self.cancel_round_timers();
        self.round_id = Uuid::new_v4();
        self.phase = RoundPhase::CountingDown;

        let from = self.config.countdown_from;
        let timer = self
            .scheduler
            .schedule_repeating(TimerKind::Countdown, self.config.countdown_tick);
        let remaining = if from == 0 {
            self.presentation.report_countdown(CountdownValue::Go);
            None
        } else {
            self.presentation.report_countdown(CountdownValue::Count(from));
            Some(from)
        };

        info!("Round {} counting down for {}", self.round_id, nickname);
        self.countdown = Some(Countdown {
            nickname,
            remaining,
            timer,
        });
        self.event_bus.publish(RoundEvent::CountdownStarted {
            round_id: self.round_id,
            from,
        });

        Ok(())
    }

    /// Route a timer firing to its owner. Handles the controller no longer
    /// holds belong to cancelled timers and are dropped.
    pub fn on_timer_fired(&mut self, handle: TimerHandle) {
        if self.countdown.as_ref().is_some_and(|c| c.timer == handle) {
            self.on_countdown_tick();
        } else if self.clock_timer == Some(handle) {
            self.on_clock_tick();
        } else if let Some(target_id) = self
            .target
            .as_ref()
            .filter(|t| t.lifetime == handle)
            .map(|t| t.id)
        {
            self.on_target_timeout(target_id);
        } else {
            trace!("Ignoring stale timer {}", handle);
        }
    }

    /// Register a click on a marker. Clicks on anything but the live target,
    /// or outside a running round, are stale and ignored.
    pub fn on_target_clicked(&mut self, target_id: TargetId) {
        if self.phase != RoundPhase::Running {
            trace!("Ignoring click on {} while {}", target_id, self.phase);
            return;
        }

        let Some(target) = self.target.take_if(|t| t.id == target_id) else {
            trace!("Ignoring click on stale target {}", target_id);
            return;
        };

        self.score = self.score.saturating_add(self.config.score_per_hit);
        self.presentation.report_score(self.score);
        self.retire_target(target, TargetResolution::Hit);
        self.spawn_target();
    }

    /// The live target expired unclicked: replace it, score unchanged.
    pub fn on_target_timeout(&mut self, target_id: TargetId) {
        if self.phase != RoundPhase::Running {
            trace!("Ignoring timeout of {} while {}", target_id, self.phase);
            return;
        }

        let Some(target) = self.target.take_if(|t| t.id == target_id) else {
            trace!("Ignoring timeout of stale target {}", target_id);
            return;
        };

        self.retire_target(target, TargetResolution::Missed);
        self.spawn_target();
    }

    /// Abandon whatever is in progress and return to the entry screen.
    pub fn request_reset(&mut self) {
        let previous = self.phase;

        self.cancel_round_timers();
        if let Some(target) = self.target.take() {
            self.retire_target(target, TargetResolution::Cleared);
        }

        self.player = None;
        self.score = 0;
        self.remaining_seconds = self.config.round_duration_secs;
        self.last_summary = None;
        self.phase = RoundPhase::Idle;

        self.presentation.report_score(self.score);
        self.presentation.report_time_remaining(self.remaining_seconds);
        self.presentation.show_entry();

        if previous != RoundPhase::Idle {
            info!("Round {} reset from {}", self.round_id, previous);
            self.event_bus.publish(RoundEvent::RoundReset {
                round_id: self.round_id,
            });
        }
    }

    fn on_countdown_tick(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        match countdown.remaining {
            Some(n) if n > 1 => {
                countdown.remaining = Some(n - 1);
                self.presentation.report_countdown(CountdownValue::Count(n - 1));
            }
            Some(_) => {
                countdown.remaining = None;
                self.presentation.report_countdown(CountdownValue::Go);
            }
            None => {
                if let Some(countdown) = self.countdown.take() {
                    self.scheduler.cancel(countdown.timer);
                    self.on_countdown_finished(countdown.nickname);
                }
            }
        }
    }

    /// Sole initialization point for score, clock and player.
    fn on_countdown_finished(&mut self, nickname: String) {
        self.score = 0;
        self.remaining_seconds = self.config.round_duration_secs;
        self.phase = RoundPhase::Running;

        self.presentation.report_round_started(&nickname);
        self.presentation.report_score(self.score);
        self.presentation.report_time_remaining(self.remaining_seconds);

        self.clock_timer = Some(
            self.scheduler
                .schedule_repeating(TimerKind::Clock, self.config.clock_tick),
        );

        info!(
            "Round {} started for {} ({}s)",
            self.round_id, nickname, self.remaining_seconds
        );
        self.event_bus.publish(RoundEvent::RoundStarted {
            round_id: self.round_id,
            nickname: nickname.clone(),
            duration_seconds: self.remaining_seconds,
        });
        self.player = Some(Player::new(nickname));

        self.spawn_target();
    }

    fn on_clock_tick(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.presentation.report_time_remaining(self.remaining_seconds);
        self.event_bus.publish(RoundEvent::ClockTicked {
            round_id: self.round_id,
            remaining_seconds: self.remaining_seconds,
        });

        if self.remaining_seconds == 0 {
            self.end_round();
        }
    }

    /// Replace whatever target is live with a fresh one at a random spot.
    fn spawn_target(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }

        if let Some(previous) = self.target.take() {
            self.retire_target(previous, TargetResolution::Cleared);
        }

        let size = self.config.target_size;
        let bounds = self.presentation.display_bounds();
        let position = random_position(bounds, size, &mut self.rng);

        let target_id = TargetId(self.next_target_id);
        self.next_target_id = self.next_target_id.wrapping_add(1);

        self.presentation.render_target(target_id, position, size);
        let lifetime = self.scheduler.schedule_once(
            TimerKind::TargetLifetime(target_id),
            self.config.target_lifetime,
        );
        self.target = Some(Target::new(target_id, position, lifetime));

        debug!(
            "Spawned target {} at ({}, {})",
            target_id, position.x, position.y
        );
        self.event_bus.publish(RoundEvent::TargetSpawned {
            round_id: self.round_id,
            target_id,
            position,
        });
    }

    /// Cancel the target's lifetime timer, then take it off the surface.
    fn retire_target(&mut self, mut target: Target, resolution: TargetResolution) {
        self.scheduler.cancel(target.lifetime);

        if target.resolve(resolution) {
            self.presentation.remove_target(target.id);
            debug!("Target {} resolved as {:?}", target.id, resolution);
            self.event_bus.publish(RoundEvent::target_resolved(
                self.round_id,
                target.id,
                resolution,
                self.score,
            ));
        }
    }

    fn end_round(&mut self) {
        self.phase = RoundPhase::Ended;

        self.cancel_round_timers();
        if let Some(target) = self.target.take() {
            self.retire_target(target, TargetResolution::Cleared);
        }

        let threshold = self.config.prize_threshold;
        let reward_tier = RewardPolicy::tier_for(self.score, threshold);
        let summary = RoundSummary {
            round_id: self.round_id,
            nickname: self
                .player
                .as_ref()
                .map(|p| p.nickname.clone())
                .unwrap_or_default(),
            score: self.score,
            timestamp: Local::now()
                .format(&self.config.timestamp_format)
                .to_string(),
            reward_message: RewardPolicy::message_for(&reward_tier, threshold),
            reward_notice: REWARD_NOTICE.to_string(),
            reward_tier,
        };

        info!(
            "Round {} ended: {} scored {}",
            self.round_id, summary.nickname, summary.score
        );
        self.presentation.report_round_end(&summary);
        self.event_bus.publish(RoundEvent::RoundEnded {
            round_id: self.round_id,
            summary: summary.clone(),
        });
        self.last_summary = Some(summary);
    }

    fn cancel_round_timers(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            self.scheduler.cancel(countdown.timer);
        }
        if let Some(clock) = self.clock_timer.take() {
            self.scheduler.cancel(clock);
        }
        if let Some(target) = &self.target {
            self.scheduler.cancel(target.lifetime);
        }
    }
}

impl<P: Presentation, R: Rng> RoundController<P, ManualScheduler, R> {
    /// Run virtual time forward, delivering every timer that comes due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(handle) = self.scheduler.pop_due(until) {
            self.on_timer_fired(handle);
        }
        self.scheduler.advance_to(until);
    }
}
