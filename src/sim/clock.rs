//! Tick source
//!
//! Turns host timestamps into deltas and drives interval timers. The
//! simulation itself never reads a wall clock; it only sees the `dt` values
//! handed out here.

/// Computes `now - last` on every call and remembers `now`.
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    last_ms: Option<f64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Milliseconds since the previous call (0 on the first call).
    ///
    /// A host clock that jumps backwards yields 0 rather than a negative delta.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    /// Forget the last timestamp (next delta is 0)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Accumulating interval timer
///
/// Firing subtracts the period instead of zeroing, so overshoot from a late
/// tick carries into the next interval.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period_ms: f32,
    acc_ms: f32,
    cancelled: bool,
}

impl IntervalTimer {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms,
            acc_ms: 0.0,
            cancelled: false,
        }
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Change the period without touching accumulated time
    pub fn set_period(&mut self, period_ms: f32) {
        self.period_ms = period_ms;
    }

    /// Time accumulated toward the next firing
    pub fn pending_ms(&self) -> f32 {
        self.acc_ms
    }

    /// Add `dt_ms` and return how many times the timer fired (at most `max_fires`).
    ///
    /// Unfired time stays in the accumulator.
    pub fn advance(&mut self, dt_ms: f32, max_fires: u32) -> u32 {
        if self.cancelled || self.period_ms <= 0.0 {
            return 0;
        }
        self.acc_ms += dt_ms.max(0.0);

        let mut fired = 0;
        while self.acc_ms >= self.period_ms && fired < max_fires {
            self.acc_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }

    /// Stop the timer for good. Cancelled timers never fire again.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.acc_ms = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
