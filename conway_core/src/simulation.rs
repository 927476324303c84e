// simulation.rs - Public handle over one independent simulation instance

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::buffer::BitBuffer;
use crate::config::SimulationConfig;
use crate::controller::{Shared, TickController, TickTiming};
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::latency::TickLatency;
use crate::world::{Generation, World};

/// A toroidal Game of Life board plus the task that advances it.
///
/// Each instance owns its buffers and its tick task; nothing is shared
/// between instances. Must be created inside a tokio runtime. Call
/// [`Simulation::dispose`] before dropping to join the tick task.
pub struct Simulation {
    shared: Arc<Shared>,
    controller: Option<TickController>,
    grid: Grid,
    cell_editing: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> LifeResult<Self> {
        let runtime = Handle::try_current().map_err(|_| LifeError::NoRuntime)?;
        let grid = config.validate()?;
        let world = World::new(grid, config.seed.populate(&grid)?)?;

        let (published, _) = watch::channel(Arc::new(world.snapshot()));
        let (running, _) = watch::channel(config.start_running);
        let shared = Arc::new(Shared {
            world: Mutex::new(Some(world)),
            latency: Mutex::new(TickLatency::new(config.latency_window)),
            min_tick_ms: AtomicU64::new(config.min_tick_duration_ms),
            running,
            published,
            pause_on_cycle: config.pause_on_cycle,
        });

        let timing = TickTiming {
            initial_delay: config.initial_delay(),
            period: config.tick_period(),
        };
        let controller = TickController::spawn(&runtime, shared.clone(), timing);

        info!(
            width = grid.width(),
            height = grid.height(),
            wrap = ?grid.wrap(),
            running = config.start_running,
            "simulation created"
        );

        Ok(Self {
            shared,
            controller: Some(controller),
            grid,
            cell_editing: config.cell_editing,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    // ---- running state ----

    /// No-op when already running
    pub fn start(&self) {
        if self.shared.running.send_if_modified(|running| !std::mem::replace(running, true)) {
            debug!("simulation started");
        }
    }

    /// No-op when already paused
    pub fn pause(&self) {
        if self.shared.running.send_if_modified(|running| std::mem::replace(running, false)) {
            debug!("simulation paused");
        }
    }

    /// Flips between running and paused, returning the new state
    pub fn toggle_running(&self) -> bool {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.is_running()
    }

    pub fn is_running(&self) -> bool {
        *self.shared.running.borrow()
    }

    pub fn set_min_tick_duration(&self, ms: u64) {
        self.shared.min_tick_ms.store(ms, Ordering::Relaxed);
        debug!(ms, "minimum tick duration changed");
    }

    pub fn min_tick_duration(&self) -> Duration {
        self.shared.min_tick_duration()
    }

    // ---- cell edits ----

    pub fn cell_editing(&self) -> bool {
        self.cell_editing
    }

    /// Flips one cell and returns its new state
    pub fn toggle_cell(&self, x: usize, y: usize) -> LifeResult<bool> {
        self.require_editing()?;
        self.mutate(|world| world.toggle_cell(x, y))
    }

    /// Sets one cell regardless of its current state (drag painting)
    pub fn set_cell(&self, x: usize, y: usize, alive: bool) -> LifeResult<()> {
        self.require_editing()?;
        self.mutate(|world| world.set_cell(x, y, alive))
    }

    pub fn clear(&self) -> LifeResult<()> {
        self.mutate(|world| {
            world.clear();
            Ok(())
        })?;
        debug!("grid cleared");
        Ok(())
    }

    /// Replaces the current generation; `cells` must cover the whole grid
    pub fn overwrite(&self, cells: &BitBuffer) -> LifeResult<()> {
        self.mutate(|world| world.overwrite(cells))?;
        debug!(population = cells.count_ones(), "grid overwritten");
        Ok(())
    }

    /// Advances exactly one generation, running or not, and returns the
    /// snapshot it published
    pub fn step(&self) -> LifeResult<Arc<Generation>> {
        let (_, generation) = self.shared.tick().ok_or(LifeError::Disposed)?;
        Ok(generation)
    }

    fn require_editing(&self) -> LifeResult<()> {
        if self.cell_editing {
            Ok(())
        } else {
            Err(LifeError::CellEditingDisabled)
        }
    }

    /// Runs `edit` under the world lock and publishes the result
    fn mutate<T>(&self, edit: impl FnOnce(&mut World) -> LifeResult<T>) -> LifeResult<T> {
        let mut guard = self.shared.world.lock();
        let world = guard.as_mut().ok_or(LifeError::Disposed)?;
        let value = edit(world)?;
        self.shared.published.send_replace(Arc::new(world.snapshot()));
        Ok(value)
    }

    // ---- readouts ----

    /// Latest published generation. Stays readable after dispose.
    pub fn current_generation(&self) -> Arc<Generation> {
        self.shared.published.borrow().clone()
    }

    /// Change notifications for renderers
    pub fn subscribe(&self) -> watch::Receiver<Arc<Generation>> {
        self.shared.published.subscribe()
    }

    pub fn average_tick_duration(&self) -> Duration {
        self.shared.latency.lock().average()
    }

    pub fn ticks_per_second(&self) -> f64 {
        self.shared.latency.lock().ticks_per_second()
    }

    /// Ticks performed by the controller so far
    pub fn total_ticks(&self) -> u64 {
        self.shared.latency.lock().total_ticks()
    }

    // ---- teardown ----

    pub fn is_disposed(&self) -> bool {
        self.shared.world.lock().is_none()
    }

    /// Stops the tick task, waits for it, then frees the buffers.
    /// Safe to call more than once.
    pub async fn dispose(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.shutdown().await;
        }
        self.shared.running.send_replace(false);
        if self.shared.world.lock().take().is_some() {
            info!(width = self.grid.width(), height = self.grid.height(), "simulation disposed");
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.take() {
            warn!("simulation dropped without dispose, stopping tick task");
            controller.signal_stop();
        }
    }
}
