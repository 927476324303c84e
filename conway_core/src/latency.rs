// latency.rs - Rolling tick-time samples for the TPS readout

use std::time::Duration;

/// Circular buffer of the most recent tick durations
#[derive(Clone, Debug)]
pub struct TickLatency {
    samples: Vec<Duration>,
    cursor: usize,
    filled: usize,
    total_ticks: u64,
}

impl TickLatency {
    /// `window` must be at least 1
    pub fn new(window: usize) -> Self {
        Self {
            samples: vec![Duration::ZERO; window.max(1)],
            cursor: 0,
            filled: 0,
            total_ticks: 0,
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.samples[self.cursor] = elapsed;
        self.cursor = (self.cursor + 1) % self.samples.len();
        self.filled = (self.filled + 1).min(self.samples.len());
        self.total_ticks += 1;
    }

    /// Mean of the recorded samples, zero before the first tick
    pub fn average(&self) -> Duration {
        if self.filled == 0 {
            return Duration::ZERO;
        }
        let sum: Duration = self.samples[..self.filled].iter().sum();
        sum / self.filled as u32
    }

    /// Ticks per second the engine could sustain at the average tick time
    pub fn ticks_per_second(&self) -> f64 {
        let average = self.average().as_secs_f64();
        if average > 0.0 { 1.0 / average } else { 0.0 }
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn window(&self) -> usize {
        self.samples.len()
    }
}
