use std::time::{Duration, Instant};

use tracing::debug;

pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// What asked for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    PageLoad,
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending { deadline: Instant },
    /// `follow_up` is set when a trigger arrived mid-scan.
    Scanning { follow_up: bool },
}

/// Single-timer debounce for capture passes.
///
/// Time is passed in by the caller, so the machine never sleeps and never
/// spawns anything. A trigger while pending restarts the timer; a trigger
/// while scanning queues exactly one follow-up scan.
#[derive(Debug, Clone)]
pub struct CaptureScheduler {
    state: SchedulerState,
    initial_delay: Duration,
    debounce: Duration,
}

impl Default for CaptureScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_DELAY, DEFAULT_DEBOUNCE)
    }
}

impl CaptureScheduler {
    pub fn new(initial_delay: Duration, debounce: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            initial_delay,
            debounce,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SchedulerState::Idle
    }

    fn delay_for(&self, trigger: Trigger) -> Duration {
        match trigger {
            Trigger::PageLoad => self.initial_delay,
            Trigger::Mutation => self.debounce,
        }
    }

    pub fn trigger(&mut self, trigger: Trigger, now: Instant) {
        self.state = match self.state {
            SchedulerState::Idle | SchedulerState::Pending { .. } => {
                let deadline = now + self.delay_for(trigger);
                debug!(?trigger, "capture timer (re)started");
                SchedulerState::Pending { deadline }
            }
            SchedulerState::Scanning { .. } => {
                debug!(?trigger, "trigger during scan, follow-up queued");
                SchedulerState::Scanning { follow_up: true }
            }
        };
    }

    /// Deadline of the pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Move to `Scanning` if the pending timer has expired. Returns whether
    /// the caller should scan now.
    pub fn begin_scan(&mut self, now: Instant) -> bool {
        match self.state {
            SchedulerState::Pending { deadline } if now >= deadline => {
                self.state = SchedulerState::Scanning { follow_up: false };
                true
            }
            _ => false,
        }
    }

    /// Leave `Scanning`. A queued follow-up becomes a fresh debounce window.
    pub fn finish_scan(&mut self, now: Instant) {
        self.state = match self.state {
            SchedulerState::Scanning { follow_up: true } => SchedulerState::Pending {
                deadline: now + self.debounce,
            },
            SchedulerState::Scanning { follow_up: false } => SchedulerState::Idle,
            other => other,
        };
    }
}
