//! Fixed-interval tick gate.
//!
//! The frame loop calls [`GameClock::on_frame`] with a monotonic millisecond
//! timestamp as often as it likes; the clock answers `true` at most once per
//! interval. There is no accumulation: a late frame yields a single tick and
//! the next interval is measured from that frame, so slow frames drift
//! instead of bursting.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    interval_ms: u64,
    last_tick_ms: u64,
    running: bool,
}

impl GameClock {
    /// A stopped clock with the given tick interval
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_tick_ms: 0,
            running: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    /// Start ticking; the first tick is one full interval after `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.running = true;
        self.last_tick_ms = now_ms;
    }

    /// Stop ticking; frames are ignored until `start` or `resume`
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restart after a pause without replaying the time spent paused
    pub fn resume(&mut self, now_ms: u64) {
        self.start(now_ms);
    }

    /// Measure the next interval from `now_ms` without changing run state
    pub fn rebase(&mut self, now_ms: u64) {
        if self.running {
            self.last_tick_ms = now_ms;
        }
    }

    /// Returns true if the caller should run exactly one tick for this frame
    pub fn on_frame(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        if now_ms.saturating_sub(self.last_tick_ms) < self.interval_ms {
            return false;
        }
        self.last_tick_ms = now_ms;
        true
    }
}
