#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::puzzle::size::Size;
use std::fmt::{self, Display, Formatter};

/// A board coordinate. Rows and columns are 1-indexed, so the top-left
/// cell is `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row in `[1, N]`.
    pub row: usize,
    /// Column in `[1, N]`.
    pub col: usize,
}

impl Cell {
    /// Creates a cell from 1-indexed coordinates.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major cell index in `[0, N^2)`.
    #[must_use]
    pub const fn spot(self, size: Size) -> usize {
        size.value() * (self.row - 1) + (self.col - 1)
    }

    /// Inverse of [`Cell::spot`].
    #[must_use]
    pub const fn from_spot(spot: usize, size: Size) -> Self {
        let n = size.value();
        Self {
            row: spot / n + 1,
            col: spot % n + 1,
        }
    }

    /// Top-left cell of the box this cell belongs to.
    #[must_use]
    pub const fn block_origin(self, size: Size) -> Self {
        let b = size.block_size();
        Self {
            row: (self.row - 1) / b * b + 1,
            col: (self.col - 1) / b * b + 1,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
