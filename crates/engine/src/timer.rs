//! Drop timer - converts elapsed time into gravity steps.
//!
//! The host owns the clock and reports elapsed milliseconds; the timer only
//! accumulates them. Tests step it by hand, no wall-clock sleeps involved.

/// Fixed-cadence gravity accumulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTimer {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl DropTimer {
    /// An interval of 0 is treated as 1ms.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time accumulated towards the next drop
    pub fn pending_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Add elapsed time and return how many drops are now due
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let due = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        due
    }

    /// Restart the countdown from zero
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}
