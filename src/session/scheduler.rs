use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::info;

use crate::models::Status;
use crate::session::controller::{SessionEvent, SessionState};

/// Owns the single recurring timer. Each firing posts `SessionEvent::Tick`
/// tagged with the timer's generation onto the session queue.
pub struct AutoRefreshScheduler {
    handle: Option<JoinHandle<()>>,
    interval_secs: u64,
    generation: u64,
    events: UnboundedSender<SessionEvent>,
}

impl AutoRefreshScheduler {
    pub fn new(events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            handle: None,
            interval_secs: 0,
            generation: 0,
            events,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Period of the live timer, if any.
    pub fn interval_secs(&self) -> Option<u64> {
        self.handle.as_ref().map(|_| self.interval_secs)
    }

    /// True only for ticks from the timer that is running now. Ticks queued
    /// before a stop or restart are stale.
    pub fn is_live(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }

    /// Returns false (and changes nothing) when already running. The interval
    /// is read from `state` now and fixed for the life of this timer.
    pub fn start(&mut self, state: &mut SessionState) -> bool {
        if self.handle.is_some() {
            return false;
        }

        let secs = state.refresh_seconds.max(1);
        let period = Duration::from_secs(secs);
        let events = self.events.clone();
        self.generation += 1;
        let generation = self.generation;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(SessionEvent::Tick(generation)).is_err() {
                    break;
                }
            }
        }));
        self.interval_secs = secs;

        state.status = Status::Auto(secs);
        info!("Auto refresh every {}s", secs);
        true
    }

    /// Returns false (and leaves status alone) when already stopped.
    pub fn stop(&mut self, state: &mut SessionState) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        handle.abort();

        state.status = Status::Idle;
        info!("Auto refresh stopped");
        true
    }

    /// Stop-then-start so a new interval applies immediately.
    pub fn restart(&mut self, state: &mut SessionState) {
        self.stop(state);
        self.start(state);
    }
}

impl Drop for AutoRefreshScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
