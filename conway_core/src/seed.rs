// seed.rs - Initial population of a new simulation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::BitBuffer;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Each cell alive with probability `density`.
    /// A fixed `seed` makes the layout reproducible.
    Random { density: f64, seed: Option<u64> },
    AllDead,
    /// Exactly these `(x, y)` cells alive
    Cells { cells: Vec<(usize, usize)> },
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::Random {
            density: 0.5,
            seed: None,
        }
    }
}

impl SeedPolicy {
    pub fn random() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        SeedPolicy::Random {
            density: 0.5,
            seed: Some(seed),
        }
    }

    pub fn cells(cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        SeedPolicy::Cells {
            cells: cells.into_iter().collect(),
        }
    }

    pub(crate) fn validate(&self) -> LifeResult<()> {
        if let SeedPolicy::Random { density, .. } = self {
            if !(0.0..=1.0).contains(density) {
                return Err(LifeError::config(format!(
                    "seed density must be within [0, 1], got {density}"
                )));
            }
        }
        Ok(())
    }

    /// Builds the first generation for `grid`
    pub fn populate(&self, grid: &Grid) -> LifeResult<BitBuffer> {
        self.validate()?;
        let mut buffer = BitBuffer::new(grid.size());
        match self {
            SeedPolicy::Random { density, seed } => match seed {
                Some(seed) => fill_random(&mut buffer, *density, &mut ChaCha8Rng::seed_from_u64(*seed)),
                None => fill_random(&mut buffer, *density, &mut rand::thread_rng()),
            },
            SeedPolicy::AllDead => {}
            SeedPolicy::Cells { cells } => {
                for &(x, y) in cells {
                    buffer.set(grid.index(x, y)?, true);
                }
            }
        }
        Ok(buffer)
    }
}

fn fill_random(buffer: &mut BitBuffer, density: f64, rng: &mut impl Rng) {
    for i in 0..buffer.len() {
        buffer.set(i, rng.gen_bool(density));
    }
}
