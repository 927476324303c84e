// patterns.rs - Named starting patterns, stamped onto the torus

use crate::buffer::BitBuffer;
use crate::grid::Grid;

/// Live cells as `(x, y)` offsets from the pattern's top-left corner
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (24, 0), (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    },
];

/// Case-insensitive lookup by name
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0)
    }

    /// Sets the pattern's cells alive with its top-left corner at `(x, y)`.
    /// Cells running past an edge wrap the same way neighbors do.
    pub fn stamp(&self, grid: &Grid, buffer: &mut BitBuffer, x: usize, y: usize) {
        let origin = y * grid.width() + x;
        for &(dx, dy) in self.cells {
            buffer.set(grid.offset(origin, dx as isize, dy as isize), true);
        }
    }

    /// Fresh buffer holding only this pattern, centered on the grid
    pub fn centered(&self, grid: &Grid) -> BitBuffer {
        let mut buffer = BitBuffer::new(grid.size());
        let x = grid.width().saturating_sub(self.width()) / 2;
        let y = grid.height().saturating_sub(self.height()) / 2;
        self.stamp(grid, &mut buffer, x, y);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::advance;
    use crate::grid::WrapMode;

    fn run(grid: &Grid, cells: BitBuffer, generations: usize) -> BitBuffer {
        let mut current = cells;
        let mut next = BitBuffer::new(grid.size());
        for _ in 0..generations {
            advance(grid, &current, &mut next);
            std::mem::swap(&mut current, &mut next);
        }
        current
    }

    #[test]
    fn test_lookup_and_extent() {
        let gun = find("gosper glider gun").unwrap();
        assert_eq!((gun.width(), gun.height()), (36, 9));
        assert_eq!(find("Pulsar").map(|p| p.cells.len()), Some(48));
        assert!(find("Spaceship").is_none());
    }

    #[test]
    fn test_glider_circles_the_torus() {
        // a glider moves one cell diagonally every 4 generations
        let grid = Grid::new(8, 8, WrapMode::PowerOfTwo).unwrap();
        let mut start = BitBuffer::new(grid.size());
        find("Glider").unwrap().stamp(&grid, &mut start, 0, 0);

        let after_four = run(&grid, start.clone(), 4);
        let mut shifted = BitBuffer::new(grid.size());
        find("Glider").unwrap().stamp(&grid, &mut shifted, 1, 1);
        assert_eq!(after_four, shifted);

        // +9 cells every 4 generations, 64 moves to come round the 64-cell ring
        assert_eq!(run(&grid, start.clone(), 256), start);
    }

    #[test]
    fn test_stamp_wraps_at_edges() {
        let grid = Grid::new(4, 4, WrapMode::Modulo).unwrap();
        let mut buffer = BitBuffer::new(grid.size());
        // starts at cell 15 and runs on into cells 0 and 1
        find("Blinker").unwrap().stamp(&grid, &mut buffer, 3, 3);
        assert_eq!(buffer.iter_ones().collect::<Vec<_>>(), vec![0, 1, 15]);
    }

    #[test]
    fn test_still_lifes_and_oscillators() {
        let grid = Grid::new(32, 32, WrapMode::PowerOfTwo).unwrap();
        for name in ["Blinker", "Toad", "Beacon"] {
            let start = find(name).unwrap().centered(&grid);
            assert_eq!(run(&grid, start.clone(), 2), start, "{name} has period 2");
        }
        let pulsar = find("Pulsar").unwrap().centered(&grid);
        assert_eq!(run(&grid, pulsar.clone(), 3), pulsar);
    }
}
