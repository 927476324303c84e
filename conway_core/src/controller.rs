// controller.rs - Background task that drives one simulation's ticks

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use crate::latency::TickLatency;
use crate::world::{Generation, StepOutcome, World};

/// State shared between a simulation handle and its tick task.
/// `world` is `None` once the simulation has been disposed.
pub(crate) struct Shared {
    pub(crate) world: Mutex<Option<World>>,
    pub(crate) latency: Mutex<TickLatency>,
    pub(crate) min_tick_ms: AtomicU64,
    pub(crate) running: watch::Sender<bool>,
    pub(crate) published: watch::Sender<Arc<Generation>>,
    pub(crate) pause_on_cycle: bool,
}

impl Shared {
    /// Advance, swap and publish under one lock. Returns the snapshot
    /// that was published, so callers never race a later tick for it.
    pub(crate) fn tick(&self) -> Option<(StepOutcome, Arc<Generation>)> {
        let mut guard = self.world.lock();
        let world = guard.as_mut()?;
        let outcome = world.step();
        let generation = Arc::new(world.snapshot());
        self.published.send_replace(generation.clone());
        Some((outcome, generation))
    }

    pub(crate) fn min_tick_duration(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms.load(Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TickTiming {
    pub(crate) initial_delay: Duration,
    pub(crate) period: Duration,
}

/// Owns the tick task. Cancellation goes through a watch channel that
/// every sleep inside the task races against.
pub(crate) struct TickController {
    cancel: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl TickController {
    pub(crate) fn spawn(runtime: &Handle, shared: Arc<Shared>, timing: TickTiming) -> Self {
        let (cancel, cancelled) = watch::channel(false);
        let task = runtime.spawn(run(shared, timing, cancelled));
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Stops the task and waits until it has exited. A tick already in
    /// progress finishes first.
    pub(crate) async fn shutdown(&mut self) {
        self.cancel.send_replace(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("tick task ended abnormally: {err}");
            }
        }
    }

    /// Non-blocking variant for contexts that cannot await
    pub(crate) fn signal_stop(&self) {
        self.cancel.send_replace(true);
    }
}

async fn run(shared: Arc<Shared>, timing: TickTiming, mut cancelled: watch::Receiver<bool>) {
    let mut running = shared.running.subscribe();

    if !sleep_unless_cancelled(timing.initial_delay, &mut cancelled).await {
        return;
    }

    loop {
        if *cancelled.borrow() {
            break;
        }

        // Paused: wait for a state change instead of firing
        if !*running.borrow_and_update() {
            tokio::select! {
                _ = cancelled.changed() => break,
                _ = running.changed() => continue,
            }
        }

        let started = Instant::now();
        let Some((outcome, _)) = tick_in_place(&shared) else {
            break;
        };
        let elapsed = started.elapsed();
        shared.latency.lock().record(elapsed);
        trace!(generation = outcome.generation, ?elapsed, "tick");

        if outcome.repeated && shared.pause_on_cycle {
            warn!(generation = outcome.generation, "generation repeats a recent one, pausing");
            shared.running.send_replace(false);
        }

        // Throttle: an interrupted wait is just an early wake
        let floor = shared.min_tick_duration();
        if elapsed < floor && !sleep_unless_cancelled(floor - elapsed, &mut cancelled).await {
            break;
        }

        if !sleep_unless_cancelled(timing.period, &mut cancelled).await {
            break;
        }
    }

    trace!("tick task stopped");
}

/// A tick holds a blocking lock and does CPU-bound work. On a multi-thread
/// runtime the worker hands its other tasks off first; `block_in_place`
/// panics on a current-thread runtime, so that one just runs it.
fn tick_in_place(shared: &Shared) -> Option<(StepOutcome, Arc<Generation>)> {
    match Handle::current().runtime_flavor() {
        RuntimeFlavor::MultiThread => tokio::task::block_in_place(|| shared.tick()),
        _ => shared.tick(),
    }
}

/// `false` when cancellation cut the sleep short
async fn sleep_unless_cancelled(duration: Duration, cancelled: &mut watch::Receiver<bool>) -> bool {
    if *cancelled.borrow() {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        _ = cancelled.changed() => false,
    }
}
