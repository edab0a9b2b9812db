//! Per-stage countdown
//!
//! The director feeds elapsed milliseconds every tick. Expiry is reported
//! exactly once (through the `on_tick` return value and any registered
//! callbacks) until the countdown is reset.

use std::fmt;

use crate::consts::TIME_LIMIT_MS;

pub struct Countdown {
    limit_ms: u64,
    elapsed_ms: f64,
    running: bool,
    expired: bool,
    listeners: Vec<Box<dyn FnMut()>>,
}

impl Countdown {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            elapsed_ms: 0.0,
            running: false,
            expired: false,
            listeners: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        if !self.expired {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Back to full duration, stopped, expiry re-armed
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.running = false;
        self.expired = false;
    }

    /// Register a callback fired when the countdown runs out
    pub fn on_expire(&mut self, callback: impl FnMut() + 'static) {
        self.listeners.push(Box::new(callback));
    }

    /// Advance by `elapsed_ms`. Returns true only on the tick that expires.
    pub fn on_tick(&mut self, elapsed_ms: f64) -> bool {
        if !self.running || self.expired {
            return false;
        }
        self.elapsed_ms += elapsed_ms.max(0.0);
        if self.elapsed_ms < self.limit_ms as f64 {
            return false;
        }

        self.elapsed_ms = self.limit_ms as f64;
        self.expired = true;
        self.running = false;
        for listener in &mut self.listeners {
            listener();
        }
        true
    }

    pub fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        (self.limit_ms as f64 - self.elapsed_ms).max(0.0).ceil() as u64
    }

    /// Whole seconds for the "Time left" readout
    pub fn seconds_left(&self) -> u64 {
        let elapsed_secs = (self.elapsed_ms / 1000.0).floor() as u64;
        (self.limit_ms / 1000).saturating_sub(elapsed_secs)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TIME_LIMIT_MS)
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("limit_ms", &self.limit_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("running", &self.running)
            .field("expired", &self.expired)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
