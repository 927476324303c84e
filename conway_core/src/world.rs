// world.rs - Double-buffered simulation state and its point mutations

use crate::buffer::BitBuffer;
use crate::cycle::CycleDetector;
use crate::engine::advance;
use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;

/// Which of the two owned buffers currently plays "current"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Active {
    A,
    B,
}

/// Immutable copy of one generation, handed to renderers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    pub number: u64,
    pub grid: Grid,
    pub cells: BitBuffer,
}

impl Generation {
    /// `false` for coordinates outside the grid
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.grid.index(x, y).is_ok_and(|i| self.cells.get(i))
    }

    pub fn population(&self) -> usize {
        self.cells.count_ones()
    }
}

/// Buffer pair plus bookkeeping. The engine reads the active buffer and
/// writes the other one, then flips the role flag.
pub struct World {
    grid: Grid,
    buffer_a: BitBuffer,
    buffer_b: BitBuffer,
    active: Active,
    generation: u64,
    cycles: CycleDetector,
}

/// What one generation step produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub generation: u64,
    pub repeated: bool,
}

impl World {
    /// Both buffers start out identical
    pub fn new(grid: Grid, cells: BitBuffer) -> LifeResult<Self> {
        check_len(&grid, &cells)?;
        let mut cycles = CycleDetector::new();
        cycles.observe(&cells);
        Ok(Self {
            grid,
            buffer_b: cells.clone(),
            buffer_a: cells,
            active: Active::A,
            generation: 0,
            cycles,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> &BitBuffer {
        match self.active {
            Active::A => &self.buffer_a,
            Active::B => &self.buffer_b,
        }
    }

    fn current_mut(&mut self) -> &mut BitBuffer {
        match self.active {
            Active::A => &mut self.buffer_a,
            Active::B => &mut self.buffer_b,
        }
    }

    /// Advances one generation: fills the inactive buffer, then swaps roles
    pub fn step(&mut self) -> StepOutcome {
        let (current, next) = match self.active {
            Active::A => (&self.buffer_a, &mut self.buffer_b),
            Active::B => (&self.buffer_b, &mut self.buffer_a),
        };
        advance(&self.grid, current, next);
        // `next` is the new current; hash it before giving up the field borrow
        let repeated = self.cycles.observe(next);

        self.active = match self.active {
            Active::A => Active::B,
            Active::B => Active::A,
        };
        self.generation += 1;
        StepOutcome {
            generation: self.generation,
            repeated,
        }
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) -> LifeResult<bool> {
        let i = self.grid.index(x, y)?;
        let alive = self.current_mut().toggle(i);
        self.cycles.reset();
        Ok(alive)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> LifeResult<()> {
        let i = self.grid.index(x, y)?;
        self.current_mut().set(i, alive);
        self.cycles.reset();
        Ok(())
    }

    /// Kills every cell in both buffers and restarts the generation count
    pub fn clear(&mut self) {
        self.buffer_a.clear();
        self.buffer_b.clear();
        self.generation = 0;
        self.cycles.reset();
    }

    /// Replaces the current generation wholesale
    pub fn overwrite(&mut self, cells: &BitBuffer) -> LifeResult<()> {
        check_len(&self.grid, cells)?;
        self.current_mut().copy_from(cells);
        self.generation = 0;
        self.cycles.reset();
        Ok(())
    }

    pub fn snapshot(&self) -> Generation {
        Generation {
            number: self.generation,
            grid: self.grid,
            cells: self.current().clone(),
        }
    }
}

fn check_len(grid: &Grid, cells: &BitBuffer) -> LifeResult<()> {
    if cells.len() != grid.size() {
        return Err(LifeError::PatternSizeMismatch {
            expected: grid.size(),
            actual: cells.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WrapMode;

    fn world(alive: &[usize]) -> World {
        let grid = Grid::new(4, 4, WrapMode::PowerOfTwo).unwrap();
        let cells = BitBuffer::from_indices(grid.size(), alive.iter().copied());
        World::new(grid, cells).unwrap()
    }

    #[test]
    fn test_step_swaps_roles() {
        let mut world = world(&[4, 9, 10]);
        let outcome = world.step();
        assert_eq!(outcome.generation, 1);
        assert!(world.current().get(5));
        assert_eq!(world.active, Active::B);

        world.step();
        assert_eq!(world.active, Active::A);
        assert_eq!(world.generation(), 2);
    }

    #[test]
    fn test_still_life_reports_repeat() {
        // 2x2 block
        let mut world = world(&[5, 6, 9, 10]);
        assert!(world.step().repeated);
    }

    #[test]
    fn test_oscillator_repeats_on_the_second_step() {
        let grid = Grid::new(8, 8, WrapMode::PowerOfTwo).unwrap();
        let cells = BitBuffer::from_indices(grid.size(), [35, 36, 37]);
        let mut world = World::new(grid, cells.clone()).unwrap();

        let first = world.step();
        assert!(!first.repeated);
        assert_eq!(world.current().iter_ones().collect::<Vec<_>>(), vec![28, 36, 44]);

        let second = world.step();
        assert!(second.repeated);
        assert_eq!(second.generation, 2);
        assert_eq!(world.current(), &cells);
    }

    #[test]
    fn test_toggle_and_set() {
        let mut world = world(&[]);
        assert!(world.toggle_cell(1, 2).unwrap());
        assert!(world.current().get(9));
        assert!(!world.toggle_cell(1, 2).unwrap());

        world.set_cell(3, 3, true).unwrap();
        world.set_cell(3, 3, true).unwrap();
        assert!(world.current().get(15));
        world.set_cell(3, 3, false).unwrap();
        assert_eq!(world.current().count_ones(), 0);
    }

    #[test]
    fn test_point_mutations_reject_out_of_bounds() {
        let mut world = world(&[]);
        assert!(matches!(world.toggle_cell(4, 0), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(world.set_cell(0, 7, true), Err(LifeError::OutOfBounds { .. })));
        assert_eq!(world.current().count_ones(), 0);
    }

    #[test]
    fn test_clear_resets_both_buffers() {
        let mut world = world(&[0, 1, 2, 7]);
        world.step();
        world.clear();
        assert_eq!(world.generation(), 0);
        assert_eq!(world.buffer_a.count_ones(), 0);
        assert_eq!(world.buffer_b.count_ones(), 0);
    }

    #[test]
    fn test_overwrite_then_single_step() {
        let mut world = world(&[0, 3, 12]);
        world.step();

        let pattern = BitBuffer::from_indices(16, [1, 4, 5, 10]);
        world.overwrite(&pattern).unwrap();
        assert_eq!(world.generation(), 0);
        assert_eq!(world.current(), &pattern);

        world.step();
        assert!(world.current().get(5));
    }

    #[test]
    fn test_overwrite_size_mismatch() {
        let mut world = world(&[]);
        let result = world.overwrite(&BitBuffer::new(15));
        assert_eq!(
            result,
            Err(LifeError::PatternSizeMismatch { expected: 16, actual: 15 })
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut world = world(&[5]);
        let snapshot = world.snapshot();
        world.clear();
        assert!(snapshot.is_alive(1, 1));
        assert!(!snapshot.is_alive(9, 9));
        assert_eq!(snapshot.population(), 1);
    }
}
