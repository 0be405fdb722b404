#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error types shared across the crate.
//!
//! Parsing problems and solving problems are kept apart: a [`ParseError`]
//! means the puzzle never made it to a board, while a [`SolveError`] is the
//! verdict of a solve attempt. A contradiction hit inside a search branch is
//! not an error at all; it is recovered by backtracking and only surfaces as
//! [`SolveError::Unsatisfiable`] once every branch is exhausted.

use std::time::Duration;
use thiserror::Error;

/// Failures while turning a puzzle string into a board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The puzzle text does not have one character per cell.
    #[error("puzzle has {found} cells, a {size}x{size} board needs {}", .size * .size)]
    BadLength {
        /// Board order the puzzle was parsed against.
        size: usize,
        /// Number of characters actually present.
        found: usize,
    },

    /// A character outside `.`, `1`-`9`, `A`-`Z`.
    #[error("invalid character {0:?} in puzzle")]
    BadCharacter(char),

    /// A legal digit that exceeds the board order, e.g. `7` on a 4x4 board.
    #[error("value {value} is out of range for a {size}x{size} board")]
    ValueOutOfRange {
        /// Board order the puzzle was parsed against.
        size: usize,
        /// The offending value.
        value: usize,
    },

    /// A board order that is not one of the supported perfect squares.
    #[error("board size {0} is not supported (expected 4, 9, 16 or 25)")]
    BadSize(usize),

    /// A bare puzzle line whose length matches no supported board.
    #[error("puzzle length {0} does not correspond to a supported board")]
    BadCellCount(usize),
}

/// Failures of a solve attempt.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Every search branch ran into a contradiction; the puzzle has no
    /// solution as given.
    #[error("puzzle is unsatisfiable")]
    Unsatisfiable,

    /// The deadline elapsed before the attempt finished. No partial result
    /// is kept.
    #[error("solve exceeded its time budget of {limit:?}")]
    Timeout {
        /// The wall-clock budget the attempt was given.
        limit: Duration,
    },

    /// The external SAT engine misbehaved: it could not be spawned, exited
    /// with an unexpected status, or produced output that does not decode
    /// to a full board.
    #[error("external solver failed: {0}")]
    ExternalSolver(String),

    /// The puzzle never parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O failure while reading a puzzle or writing a CNF instance.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T, E = SolveError> = std::result::Result<T, E>;
