//! Periodic redraw driver.
//!
//! The loop owns the only mutable per-frame state: the latest time sample.
//! The host calls [`RedrawLoop::tick`] from its event loop and sleeps until
//! [`RedrawLoop::next_deadline`] in between.

use std::time::{Duration, Instant};

use log::{info, trace};

use crate::time::{Clock, TimeSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawState {
    /// Created but not yet displayed.
    Idle,
    /// Timer armed; ticks produce fresh samples.
    Running,
    /// Torn down. Terminal.
    Stopped,
}

pub struct RedrawLoop<C: Clock> {
    clock: C,
    period: Duration,
    state: RedrawState,
    deadline: Option<Instant>,
    latest: Option<TimeSample>,
    on_stop: Option<Box<dyn FnOnce()>>,
}

impl<C: Clock> RedrawLoop<C> {
    pub fn new(clock: C, period: Duration) -> Self {
        // A zero period would spin the event loop
        let period = period.max(Duration::from_millis(1));
        Self {
            clock,
            period,
            state: RedrawState::Idle,
            deadline: None,
            latest: None,
            on_stop: None,
        }
    }

    /// Runs `hook` once, when the loop stops or is dropped.
    pub fn on_stop(&mut self, hook: impl FnOnce() + 'static) {
        self.on_stop = Some(Box::new(hook));
    }

    pub fn state(&self) -> RedrawState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.state == RedrawState::Running
    }

    /// Arms the timer on first display. The first tick is due immediately.
    /// Returns `false` if the loop was already started or has been stopped.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state != RedrawState::Idle {
            return false;
        }
        self.state = RedrawState::Running;
        self.deadline = Some(now);
        info!("redraw loop started, period {:?}", self.period);
        true
    }

    /// Samples the clock if a tick is due. The new sample replaces the
    /// previous one and is returned so the caller can schedule a redraw.
    pub fn tick(&mut self, now: Instant) -> Option<TimeSample> {
        if self.state != RedrawState::Running {
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        let sample = self.clock.sample();
        self.latest = Some(sample);
        self.deadline = Some(now + self.period);
        trace!("tick {sample:?}");
        Some(sample)
    }

    /// When the next tick is due, or `None` unless running.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            RedrawState::Running => self.deadline,
            _ => None,
        }
    }

    /// The sample the next draw pass should render. Always `None` once stopped.
    pub fn latest(&self) -> Option<TimeSample> {
        self.latest
    }

    /// Cancels the timer and drops the pending sample, so a redraw already
    /// queued by the host renders nothing. Only the first call reports `true`.
    pub fn stop(&mut self) -> bool {
        if self.state == RedrawState::Stopped {
            return false;
        }
        self.state = RedrawState::Stopped;
        self.deadline = None;
        self.latest = None;
        if let Some(hook) = self.on_stop.take() {
            hook();
        }
        info!("redraw loop stopped");
        true
    }
}

impl<C: Clock> Drop for RedrawLoop<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
