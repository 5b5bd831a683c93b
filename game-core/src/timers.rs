use game_types::TargetId;
use std::fmt;
use std::time::Duration;

/// Opaque id for a scheduled timer, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Countdown,
    Clock,
    TargetLifetime(TargetId),
}

/// Deferred-callback source for the round controller.
///
/// Firings come back through `RoundController::on_timer_fired` with the handle
/// returned here. A scheduler may still deliver a firing that was already in
/// flight when `cancel` ran; the controller drops handles it no longer holds.
pub trait Scheduler {
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle;
    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    handle: TimerHandle,
    kind: TimerKind,
    deadline: Duration,
    period: Option<Duration>,
    seq: u64,
}

/// Virtual-time scheduler. Nothing fires until the owner pulls due timers with
/// `pop_due`, so a whole round can be replayed deterministically.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    timers: Vec<ScheduledTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn kind_of(&self, handle: TimerHandle) -> Option<TimerKind> {
        self.timers.iter().find(|t| t.handle == handle).map(|t| t.kind)
    }

    /// Take the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Ties fire in the order they were armed. Repeating timers
    /// are re-armed for their next period before being returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerHandle> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(i, _)| i)?;

        let deadline = self.timers[index].deadline;
        self.now = self.now.max(deadline);

        let handle = self.timers[index].handle;
        match self.timers[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = &mut self.timers[index];
                timer.deadline = deadline + period;
                timer.seq = seq;
            }
            None => {
                self.timers.swap_remove(index);
            }
        }

        Some(handle)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn arm(&mut self, kind: TimerKind, delay: Duration, period: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();

        self.timers.push(ScheduledTimer {
            handle,
            kind,
            deadline: self.now + delay,
            period,
            seq,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        self.arm(kind, period, Some(period))
    }

    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        self.arm(kind, delay, None)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}
