#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The board model: sizes, coordinates, candidate domains, and the parsed
//! grid with its precomputed peer and unit tables.

/// Solved and partial value assignments over a board.
pub mod assignment;

/// 1-indexed board coordinates and row-major cell indices.
pub mod cell;

/// Per-cell candidate sets.
pub mod domain;

/// Puzzle parsing and the peer/unit tables.
pub mod grid;

/// Supported board orders.
pub mod size;

pub use assignment::Assignment;
pub use cell::Cell;
pub use domain::Domain;
pub use grid::Grid;
pub use size::Size;

use crate::error::ParseError;

/// Maps a puzzle character to a cell value. `.` is a blank.
pub(crate) const fn value_from_char(c: char) -> Result<Option<usize>, ParseError> {
    match c {
        '.' => Ok(None),
        '1'..='9' => Ok(Some(c as usize - '0' as usize)),
        'A'..='Z' => Ok(Some(c as usize - 'A' as usize + 10)),
        _ => Err(ParseError::BadCharacter(c)),
    }
}

/// Inverse of [`value_from_char`] for values in `[1, 35]`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn value_to_char(value: usize) -> char {
    if value <= 9 {
        (b'0' + value as u8) as char
    } else {
        (b'A' + (value - 10) as u8) as char
    }
}
