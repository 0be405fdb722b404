#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reduction to propositional satisfiability.
//!
//! The pipeline is encode, write DIMACS, run an external engine, decode
//! its model back onto the board.

pub mod cnf;
pub mod decode;
pub mod encode;
pub mod process;
