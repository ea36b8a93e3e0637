//! Tick scheduling
//!
//! The game never reads a clock itself. A scheduler decides how many ticks
//! are due; the front end feeds it elapsed time, tests feed it tick counts.
//! Start and stop are idempotent so at most one timer is ever active.

use crate::consts::MAX_CATCH_UP_TICKS;

/// Cancellable source of simulation ticks
pub trait TickScheduler {
    /// Begin producing ticks. No-op if already running.
    fn start(&mut self);

    /// Stop producing ticks and drop any pending time. No-op if stopped.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Ticks due after `elapsed` seconds. Always 0 while stopped.
    fn due_ticks(&mut self, elapsed: f32) -> u32;
}

/// Wall-clock driven scheduler with a fixed tick interval
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    interval: f32,
    accumulator: f32,
    running: bool,
    max_catch_up: u32,
}

impl FixedRateScheduler {
    pub fn new(tick_rate: f32) -> Self {
        Self {
            interval: 1.0 / tick_rate,
            accumulator: 0.0,
            running: false,
            max_catch_up: MAX_CATCH_UP_TICKS,
        }
    }

    /// Seconds per tick
    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

impl TickScheduler for FixedRateScheduler {
    fn start(&mut self) {
        if self.running {
            log::debug!("Tick scheduler already running");
            return;
        }
        self.running = true;
        self.accumulator = 0.0;
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn due_ticks(&mut self, elapsed: f32) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulator += elapsed.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_catch_up {
            self.accumulator -= self.interval;
            ticks += 1;
        }
        // Drop the backlog after a stall instead of replaying it
        if ticks == self.max_catch_up && self.accumulator >= self.interval {
            self.accumulator %= self.interval;
        }
        ticks
    }
}

/// Scheduler driven by hand, for tests and headless runs.
///
/// Queued ticks are released on the next `due_ticks` call regardless of the
/// elapsed time passed in.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    running: bool,
    pending: u32,
    /// Number of times `start` actually started the scheduler
    pub starts: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `n` ticks for the next poll (ignored while stopped)
    pub fn queue(&mut self, n: u32) {
        if self.running {
            self.pending += n;
        }
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        self.running = false;
        self.pending = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn due_ticks(&mut self, _elapsed: f32) -> u32 {
        if !self.running {
            return 0;
        }
        std::mem::take(&mut self.pending)
    }
}
