// config.rs - Simulation configuration with LIFE_* environment overrides

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};
use crate::grid::{Grid, WrapMode};
use crate::seed::SeedPolicy;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Neighbor lookup: bitwise fast path or plain modulo
    pub wrap: WrapMode,
    /// Initial population
    pub seed: SeedPolicy,
    /// Whether the tick controller starts out running
    pub start_running: bool,
    /// Allows toggling and painting individual cells
    pub cell_editing: bool,
    /// Floor on the wall time of one tick; 0 disables throttling
    pub min_tick_duration_ms: u64,
    /// Delay before the first firing
    pub initial_delay_ms: u64,
    /// Fixed delay between firings
    pub tick_period_ms: u64,
    /// Number of tick durations kept for the moving average
    pub latency_window: usize,
    /// Pause automatically once a recent generation repeats
    pub pause_on_cycle: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            wrap: WrapMode::Modulo,
            seed: SeedPolicy::default(),
            start_running: false,
            cell_editing: false,
            min_tick_duration_ms: 0,
            initial_delay_ms: 500,
            tick_period_ms: 1,
            latency_window: 20,
            pause_on_cycle: false,
        }
    }
}

impl SimulationConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_running(mut self, running: bool) -> Self {
        self.start_running = running;
        self
    }

    pub fn with_cell_editing(mut self, enabled: bool) -> Self {
        self.cell_editing = enabled;
        self
    }

    pub fn with_min_tick_duration_ms(mut self, ms: u64) -> Self {
        self.min_tick_duration_ms = ms;
        self
    }

    pub fn with_initial_delay_ms(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    pub fn with_tick_period_ms(mut self, ms: u64) -> Self {
        self.tick_period_ms = ms;
        self
    }

    pub fn with_latency_window(mut self, window: usize) -> Self {
        self.latency_window = window;
        self
    }

    pub fn with_pause_on_cycle(mut self, enabled: bool) -> Self {
        self.pause_on_cycle = enabled;
        self
    }

    /// Defaults overridden by whatever LIFE_* variables are set
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies LIFE_* variables on top of `self`. Unparsable values are
    /// logged and skipped.
    pub fn with_env_overrides(mut self) -> Self {
        override_from_env("LIFE_WIDTH", &mut self.width);
        override_from_env("LIFE_HEIGHT", &mut self.height);
        override_from_env("LIFE_MIN_TICK_MS", &mut self.min_tick_duration_ms);
        override_from_env("LIFE_CELL_EDITING", &mut self.cell_editing);
        override_from_env("LIFE_START_RUNNING", &mut self.start_running);

        if let Ok(wrap) = env::var("LIFE_WRAP") {
            match parse_wrap(&wrap) {
                Ok(mode) => self.wrap = mode,
                Err(err) => tracing::warn!("ignoring LIFE_WRAP: {err}"),
            }
        }
        if let Ok(seed) = env::var("LIFE_SEED") {
            match seed.parse::<u64>() {
                Ok(seed) => self.seed = SeedPolicy::seeded(seed),
                Err(_) if seed.eq_ignore_ascii_case("dead") => self.seed = SeedPolicy::AllDead,
                Err(_) => tracing::warn!("ignoring LIFE_SEED={seed:?}: expected a number or \"dead\""),
            }
        }
        self
    }

    /// Checks everything the simulation needs before allocating buffers
    pub fn validate(&self) -> LifeResult<Grid> {
        let grid = Grid::new(self.width, self.height, self.wrap)?;
        self.seed.validate()?;
        if self.latency_window == 0 {
            return Err(LifeError::config("latency_window must be at least 1"));
        }
        Ok(grid)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = env::var(key) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!("ignoring {key}={raw:?}: not a valid value"),
        }
    }
}

/// Accepts `power_of_two`/`pow2`/`bitwise` and `modulo`/`mod`
pub fn parse_wrap(raw: &str) -> LifeResult<WrapMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "power_of_two" | "pow2" | "bitwise" => Ok(WrapMode::PowerOfTwo),
        "modulo" | "mod" => Ok(WrapMode::Modulo),
        other => Err(LifeError::config(format!("unknown wrap mode {other:?}"))),
    }
}
