// engine.rs - One generation step of Conway's rule (B3/S23)

use crate::buffer::BitBuffer;
use crate::grid::Grid;
use crate::neighbors::neighbors;

/// Live cells among the 8 neighbors of `i`. Always examines all 8.
#[inline(always)]
pub fn live_neighbors(grid: &Grid, cells: &BitBuffer, i: usize) -> u8 {
    let mut count = 0;
    for n in neighbors(grid, i) {
        if cells.get(n) {
            count += 1;
        }
    }
    count
}

#[inline(always)]
pub fn next_state(alive: bool, count: u8) -> bool {
    match (alive, count) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Writes the successor of `current` into every cell of `next`.
/// `current` is only read.
pub fn advance(grid: &Grid, current: &BitBuffer, next: &mut BitBuffer) {
    debug_assert_eq!(current.len(), grid.size());
    debug_assert_eq!(next.len(), grid.size());

    for i in 0..grid.size() {
        let alive = current.get(i);
        let count = live_neighbors(grid, current, i);
        next.set(i, next_state(alive, count));
    }
}
