//! Clock state for gravity and the line-clear blink.
//!
//! All times are wall-clock milliseconds since the game started, as passed to
//! [`crate::Game::step`]. The clock never sleeps; it only remembers where the
//! last gravity tick and the current blink animation began.

use crate::types::{BLINK_PHASE_MS, DEFAULT_TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// Gravity runs
    #[default]
    Falling,
    /// Completed lines flash before they are removed
    LinesBlinking,
}

#[derive(Debug, Clone)]
pub struct Clock {
    mode: ClockMode,
    tick_interval_ms: u64,
    last_tick_ms: u64,
    blink_start_ms: u64,
}

impl Clock {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            mode: ClockMode::Falling,
            tick_interval_ms: tick_interval_ms.max(1),
            last_tick_ms: 0,
            blink_start_ms: 0,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn tick_interval(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Change the gravity interval; applies from the next step on
    pub fn set_tick_interval(&mut self, ms: u64) {
        self.tick_interval_ms = ms.max(1);
    }

    /// Time since the last tick boundary (zero if the caller went backwards)
    pub fn since_tick(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_tick_ms)
    }

    /// Move the tick boundary forward by one interval
    pub fn advance_tick(&mut self) {
        self.last_tick_ms += self.tick_interval_ms;
    }

    pub fn start_blink(&mut self, now_ms: u64) {
        self.mode = ClockMode::LinesBlinking;
        self.blink_start_ms = now_ms;
    }

    /// Blink phase: whole `BLINK_PHASE_MS` windows since the blink began
    pub fn blink_phase(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.blink_start_ms) / BLINK_PHASE_MS
    }

    pub fn finish_blink(&mut self) {
        self.mode = ClockMode::Falling;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}
