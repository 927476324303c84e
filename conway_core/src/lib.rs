//! # conway_core
//!
//! Toroidal Game of Life engine.
//!
//! - **Grid**: power-of-two bitwise wrap or plain modulo wrap
//! - **World**: two packed bit buffers, the active one read, the other written
//! - **Simulation**: a per-instance tokio task ticking the world, with pause,
//!   throttle, tick-time readout and snapshot publishing
//!
//! ```no_run
//! use conway_core::{Simulation, SimulationConfig, SeedPolicy};
//!
//! # async fn demo() -> conway_core::LifeResult<()> {
//! let config = SimulationConfig::new(256, 256).with_seed(SeedPolicy::seeded(7));
//! let mut sim = Simulation::new(config)?;
//! sim.start();
//! let generation = sim.current_generation();
//! println!("generation {} has {} live cells", generation.number, generation.population());
//! sim.dispose().await;
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod config;
mod controller;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod grid;
pub mod latency;
pub mod neighbors;
pub mod patterns;
pub mod seed;
pub mod simulation;
pub mod world;

pub use buffer::BitBuffer;
pub use config::SimulationConfig;
pub use error::{LifeError, LifeResult};
pub use grid::{Grid, WrapMode};
pub use patterns::{Pattern, PATTERNS};
pub use seed::SeedPolicy;
pub use simulation::Simulation;
pub use world::Generation;
