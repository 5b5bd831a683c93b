use game_core::{Scheduler, TimerHandle, TimerKind};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// A timer came due. Delivered to the round driver over an mpsc channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
}

/// Real-time scheduler backed by tokio tasks. Each timer is its own task and
/// cancelling aborts it; a firing already queued in the channel can still
/// arrive, which the controller ignores by handle.
pub struct TokioScheduler {
    sender: mpsc::UnboundedSender<TimerFired>,
    tasks: HashMap<TimerHandle, AbortHandle>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerFired>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            sender,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, receiver)
    }

    /// Timers that are armed and not yet finished
    pub fn active_timers(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn next_handle(&mut self) -> TimerHandle {
        // Drop bookkeeping for one-shot timers that already fired
        self.tasks.retain(|_, task| !task.is_finished());

        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        handle
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        let handle = self.next_handle();
        let sender = self.sender.clone();
        let first_tick = Instant::now() + period;

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(TimerFired { handle, kind }).is_err() {
                    break;
                }
            }
        });

        trace!("Armed repeating {} ({:?}) every {:?}", handle, kind, period);
        self.tasks.insert(handle, task.abort_handle());
        handle
    }

    fn schedule_once(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        let handle = self.next_handle();
        let sender = self.sender.clone();
        let deadline = Instant::now() + delay;

        let task = tokio::spawn(async move {
            time::sleep_until(deadline).await;
            let _ = sender.send(TimerFired { handle, kind });
        });

        trace!("Armed {} ({:?}) in {:?}", handle, kind, delay);
        self.tasks.insert(handle, task.abort_handle());
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            trace!("Cancelled {}", handle);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
