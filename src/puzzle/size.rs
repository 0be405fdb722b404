#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::error::ParseError;
use std::fmt::{self, Display, Formatter};

/// The supported board orders.
///
/// A board order must be a perfect square, and the puzzle alphabet
/// (`1`-`9` then `A`-`Z`) tops out at 35, so 25 is the largest square a
/// puzzle string can express.
#[derive(Debug, Clone, PartialEq, Eq, Copy, PartialOrd, Ord, Hash)]
pub enum Size {
    /// 4x4 board, 2x2 boxes.
    Four = 4,
    /// 9x9 board, 3x3 boxes.
    Nine = 9,
    /// 16x16 board, 4x4 boxes.
    Sixteen = 16,
    /// 25x25 board, 5x5 boxes.
    TwentyFive = 25,
}

impl TryFrom<usize> for Size {
    type Error = ParseError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(ParseError::BadSize(value)),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        size as Self
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let n = *self as usize;
        write!(f, "{n}x{n}")
    }
}

impl Size {
    /// Board order as a plain integer.
    #[must_use]
    pub const fn value(self) -> usize {
        self as usize
    }

    /// Side length of a box, `sqrt(N)`.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }

    /// Number of cells on the board, `N^2`.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        let n = self as usize;
        n * n
    }

    /// Infers the board order from a puzzle string length.
    ///
    /// # Errors
    ///
    /// [`ParseError::BadCellCount`] if `cells` is not `N^2` for a supported
    /// order.
    pub const fn for_cell_count(cells: usize) -> Result<Self, ParseError> {
        match cells {
            16 => Ok(Self::Four),
            81 => Ok(Self::Nine),
            256 => Ok(Self::Sixteen),
            625 => Ok(Self::TwentyFive),
            _ => Err(ParseError::BadCellCount(cells)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from() {
        for n in [4, 9, 16, 25] {
            let size = Size::try_from(n).unwrap();
            assert_eq!(usize::from(size), n);
        }
    }

    #[test]
    fn test_try_from_rejects_unsupported() {
        for n in [0, 1, 2, 3, 5, 8, 10, 36, 49] {
            assert_eq!(Size::try_from(n), Err(ParseError::BadSize(n)));
        }
    }

    #[test]
    fn test_block_size() {
        assert_eq!(Size::Four.block_size(), 2);
        assert_eq!(Size::Nine.block_size(), 3);
        assert_eq!(Size::Sixteen.block_size(), 4);
        assert_eq!(Size::TwentyFive.block_size(), 5);
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(Size::Four.cell_count(), 16);
        assert_eq!(Size::TwentyFive.cell_count(), 625);
    }

    #[test]
    fn test_for_cell_count() {
        assert_eq!(Size::for_cell_count(81), Ok(Size::Nine));
        assert_eq!(Size::for_cell_count(80), Err(ParseError::BadCellCount(80)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Size::Nine.to_string(), "9x9");
    }
}
