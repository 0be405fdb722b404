#![warn(missing_docs)]
//! This crate solves generalised N x N Sudoku boards. Three strategies are
//! provided: naive depth-first search, constraint propagation with
//! fewest-candidates-first branching, and reduction to CNF handed to an
//! external SAT engine.

/// The `error` module carries the parse and solve failure types.
pub mod error;

/// The `puzzle` module models boards: sizes, cells, candidate domains, the
/// peer topology and partial assignments.
pub mod puzzle;

/// The `sat` module reduces boards to CNF and drives external engines.
pub mod sat;

/// The `solver` module implements the solving strategies behind one trait.
pub mod solver;

pub use error::{ParseError, Result, SolveError};
