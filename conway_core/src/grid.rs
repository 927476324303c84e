// grid.rs - Toroidal grid topology

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};

/// How neighbor indices wrap around the grid edges
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Bit masks and shifts; both dimensions must be powers of two
    PowerOfTwo,
    /// Plain modulo arithmetic; any positive dimensions
    #[default]
    Modulo,
}

/// Row-major grid, origin top-left: `index = y * width + x`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    size: usize,
    wrap: WrapMode,
    width_mask: usize,
    size_mask: usize,
    width_shift: u32,
}

impl Grid {
    /// Validates the dimensions before anything gets allocated for them
    pub fn new(width: usize, height: usize, wrap: WrapMode) -> LifeResult<Self> {
        let invalid = |reason| LifeError::InvalidGridDimensions { width, height, reason };

        if width == 0 || height == 0 {
            return Err(invalid("dimensions must be positive"));
        }
        let size = width
            .checked_mul(height)
            .ok_or_else(|| invalid("cell count overflows"))?;
        if wrap == WrapMode::PowerOfTwo && !(width.is_power_of_two() && height.is_power_of_two()) {
            return Err(invalid("bitwise wrap needs power-of-two dimensions"));
        }

        Ok(Self {
            width,
            height,
            size,
            wrap,
            width_mask: width.wrapping_sub(1),
            size_mask: size.wrapping_sub(1),
            width_shift: width.trailing_zeros(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count, `width * height`
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    pub(crate) fn size_mask(&self) -> usize {
        self.size_mask
    }

    /// Out-of-range coordinates are an error, never wrapped or clamped
    pub fn index(&self, x: usize, y: usize) -> LifeResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(match self.wrap {
            WrapMode::PowerOfTwo => (y << self.width_shift) | x,
            WrapMode::Modulo => y * self.width + x,
        })
    }

    /// Inverse of [`Grid::index`] for `i < size`
    #[inline(always)]
    pub fn coords(&self, i: usize) -> (usize, usize) {
        match self.wrap {
            WrapMode::PowerOfTwo => (i & self.width_mask, i >> self.width_shift),
            WrapMode::Modulo => (i % self.width, i / self.width),
        }
    }

    /// Flat offset `dx + dy * width` from cell `i`, wrapped modulo `size`.
    /// Leaving the last column therefore lands in the next row.
    pub fn offset(&self, i: usize, dx: isize, dy: isize) -> usize {
        let shifted = i as isize + dx + dy * self.width as isize;
        shifted.rem_euclid(self.size as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        for (w, h) in [(0, 4), (4, 0), (0, 0)] {
            for wrap in [WrapMode::PowerOfTwo, WrapMode::Modulo] {
                assert!(matches!(
                    Grid::new(w, h, wrap),
                    Err(LifeError::InvalidGridDimensions { .. })
                ));
            }
        }
    }

    #[test]
    fn test_power_of_two_required_only_for_bitwise_wrap() {
        assert!(matches!(
            Grid::new(6, 4, WrapMode::PowerOfTwo),
            Err(LifeError::InvalidGridDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(4, 6, WrapMode::PowerOfTwo),
            Err(LifeError::InvalidGridDimensions { .. })
        ));
        assert!(Grid::new(6, 5, WrapMode::Modulo).is_ok());
        assert!(Grid::new(8, 2, WrapMode::PowerOfTwo).is_ok());
    }

    #[test]
    fn test_rejects_overflowing_size() {
        assert!(matches!(
            Grid::new(usize::MAX, 2, WrapMode::Modulo),
            Err(LifeError::InvalidGridDimensions { .. })
        ));
    }

    #[test]
    fn test_index_coords_roundtrip() {
        for wrap in [WrapMode::PowerOfTwo, WrapMode::Modulo] {
            let grid = Grid::new(8, 4, wrap).unwrap();
            assert_eq!(grid.size(), 32);
            assert_eq!(grid.index(0, 0).unwrap(), 0);
            assert_eq!(grid.index(7, 3).unwrap(), 31);
            assert_eq!(grid.index(3, 2).unwrap(), 19);
            assert_eq!(grid.coords(19), (3, 2));
        }
    }

    #[test]
    fn test_index_out_of_bounds_is_not_wrapped() {
        let grid = Grid::new(4, 4, WrapMode::Modulo).unwrap();
        assert_eq!(
            grid.index(4, 0),
            Err(LifeError::OutOfBounds { x: 4, y: 0, width: 4, height: 4 })
        );
        assert!(grid.index(0, 4).is_err());
    }

    #[test]
    fn test_offset_wraps_the_flat_index() {
        let grid = Grid::new(5, 3, WrapMode::Modulo).unwrap();
        assert_eq!(grid.offset(0, -1, 0), 14);
        assert_eq!(grid.offset(0, -1, -1), 9);
        assert_eq!(grid.offset(14, 1, 0), 0);
        // east of the last column is the first cell of the next row
        assert_eq!(grid.offset(4, 1, 0), 5);
        assert_eq!(grid.offset(7, 10, 0), 2);
    }
}
