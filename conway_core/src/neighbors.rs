// neighbors.rs - Moore neighborhood lookup on the torus

use crate::grid::{Grid, WrapMode};

/// Neighbor order returned by [`neighbors`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// `(dx, dy)` with y growing downwards
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }
}

/// The 8 toroidal neighbors of cell `i`, in [`Direction::ALL`] order.
/// Each neighbor is `(i + dx + dy * width) mod size`, so the grid wraps as
/// one flat ring: east of the last column is the first cell of the next row.
#[inline(always)]
pub fn neighbors(grid: &Grid, i: usize) -> [usize; 8] {
    match grid.wrap() {
        WrapMode::PowerOfTwo => masked(grid, i),
        WrapMode::Modulo => modulo(grid, i),
    }
}

/// Bitwise fast path. `size` is a power of two, so masking a wrapped
/// `usize` sum gives the same result as a true modulo.
#[inline(always)]
fn masked(grid: &Grid, i: usize) -> [usize; 8] {
    let w = grid.width();
    let size = grid.size();
    let m = grid.size_mask();
    let north = size - w;

    [
        i.wrapping_add(north) & m,                    // N
        i.wrapping_add(north + 1) & m,                // NE
        i.wrapping_add(1) & m,                        // E
        i.wrapping_add(w + 1) & m,                    // SE
        i.wrapping_add(w) & m,                        // S
        i.wrapping_add(w - 1 + size) & m,             // SW
        i.wrapping_add(size - 1) & m,                 // W
        i.wrapping_sub(size + w).wrapping_sub(1) & m, // NW
    ]
}

#[inline(always)]
fn modulo(grid: &Grid, i: usize) -> [usize; 8] {
    Direction::ALL.map(|d| {
        let (dx, dy) = d.offset();
        grid.offset(i, dx, dy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Neighbor lists written out with the bitwise formulas on raw integers
    fn by_formula(width: usize, height: usize, i: usize) -> [usize; 8] {
        let size = width * height;
        let m = size - 1;
        [
            (i + size - width) & m,
            (i + size - width + 1) & m,
            (i + 1) & m,
            (i + width + 1) & m,
            (i + width) & m,
            (i + width - 1 + size) & m,
            (i + size - 1) & m,
            (i + 2 * size - width - 1) & m,
        ]
    }

    #[test]
    fn test_interior_neighbors_in_order() {
        for wrap in [WrapMode::PowerOfTwo, WrapMode::Modulo] {
            let grid = Grid::new(4, 4, wrap).unwrap();
            // cell 5 = (1, 1)
            assert_eq!(neighbors(&grid, 5), [1, 2, 6, 10, 9, 8, 4, 0]);
        }
    }

    #[test]
    fn test_last_column_wraps_into_next_row() {
        for wrap in [WrapMode::PowerOfTwo, WrapMode::Modulo] {
            let grid = Grid::new(8, 8, wrap).unwrap();
            // cell 7 = (7, 0)
            assert_eq!(neighbors(&grid, 7), [63, 0, 8, 16, 15, 14, 6, 62]);
            // cell 63 = (7, 7)
            assert_eq!(neighbors(&grid, 63), [55, 56, 0, 8, 7, 6, 62, 54]);
        }
    }

    #[test]
    fn test_top_left_corner() {
        for wrap in [WrapMode::PowerOfTwo, WrapMode::Modulo] {
            let grid = Grid::new(8, 4, wrap).unwrap();
            let n = neighbors(&grid, 0);
            assert_eq!(n, [24, 25, 1, 9, 8, 7, 31, 23]);
            // bottom-right corner is the west neighbor
            assert_eq!(n[6], grid.index(7, 3).unwrap());
        }
    }

    #[test]
    fn test_both_modes_match_formulas() {
        let fast = Grid::new(16, 8, WrapMode::PowerOfTwo).unwrap();
        let slow = Grid::new(16, 8, WrapMode::Modulo).unwrap();
        for i in 0..fast.size() {
            let expected = by_formula(16, 8, i);
            assert_eq!(neighbors(&fast, i), expected, "bitwise, cell {i}");
            assert_eq!(neighbors(&slow, i), expected, "modulo, cell {i}");
        }
    }

    #[test]
    fn test_single_row_grid() {
        let grid = Grid::new(8, 1, WrapMode::PowerOfTwo).unwrap();
        assert_eq!(neighbors(&grid, 0), by_formula(8, 1, 0));
        assert_eq!(neighbors(&grid, 0), [0, 1, 1, 1, 0, 7, 7, 7]);
    }

    #[test]
    fn test_irregular_grid_modulo() {
        // 5x3: flat ring of 15 cells
        let grid = Grid::new(5, 3, WrapMode::Modulo).unwrap();
        assert_eq!(neighbors(&grid, 0), [10, 11, 1, 6, 5, 4, 14, 9]);
        assert_eq!(neighbors(&grid, 4), [14, 0, 5, 10, 9, 8, 3, 13]);
        assert_eq!(neighbors(&grid, 14), [9, 10, 0, 5, 4, 3, 13, 8]);
    }
}
