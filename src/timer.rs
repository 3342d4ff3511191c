#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

use bevy_ecs::prelude::Resource;
use log::debug;

use crate::game::DROP_INTERVAL_MS;

/// Periodic tick source for automatic drops.
///
/// Elapsed time is fed in through [`DropTimer::advance`]; nothing accumulates
/// while the timer is stopped. Intervals missed during a long gap between
/// calls coalesce into a single tick.
#[derive(Resource, Debug, Clone)]
pub struct DropTimer {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl DropTimer {
    /// # Panics
    ///
    /// Panics on a zero interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "drop interval must be non-zero");
        Self {
            interval,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the timer. Starting a running timer does nothing.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            debug!("Drop timer started ({} ms)", self.interval.as_millis());
        }
    }

    /// Stops the timer. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!("Drop timer stopped");
        }
    }

    /// Starts the timer with an empty accumulator.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.start();
    }

    /// Adds `delta` and reports whether a tick is due.
    ///
    /// At most one tick fires per call. A remainder shorter than one interval
    /// carries over; anything longer is dropped.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        if self.elapsed >= self.interval {
            debug!(
                "Coalesced a {} ms gap into one drop",
                (self.elapsed + self.interval).as_millis()
            );
            self.elapsed = Duration::ZERO;
        }
        true
    }
}

impl Default for DropTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DROP_INTERVAL_MS))
    }
}
