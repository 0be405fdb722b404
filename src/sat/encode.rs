#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reduction of a board to propositional logic.
//!
//! Each (cell, value) pair becomes one boolean variable. Three clause
//! families pin down the rules: every cell holds at least one value, a
//! value appears in at most one cell of every unit, and every given is
//! asserted as a unit clause. The at-most-one clauses combined with the
//! at-least-one clauses force exactly one value per cell, so no separate
//! per-cell at-most-one family is needed.

use crate::puzzle::{Cell, Grid, Size};
use crate::sat::cnf::{Clause, Cnf};
use itertools::Itertools;
use smallvec::smallvec;

/// One boolean variable of the encoding: "`cell` holds `value`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    /// The cell this variable speaks about.
    pub cell: Cell,
    /// The value it asserts, in `[1, N]`.
    pub value: usize,
}

impl Variable {
    /// The variable asserting that `cell` holds `value`.
    #[must_use]
    pub const fn new(cell: Cell, value: usize) -> Self {
        Self { cell, value }
    }

    /// The DIMACS index of this variable. Indices are `N * spot + value`,
    /// filling `1..=N^3` with no gaps.
    #[must_use]
    pub const fn index(self, size: Size) -> usize {
        size.value() * self.cell.spot(size) + self.value
    }

    /// Recovers the variable a DIMACS index stands for.
    #[must_use]
    pub const fn from_index(index: usize, size: Size) -> Self {
        let n = size.value();
        Self {
            cell: Cell::from_spot((index - 1) / n, size),
            value: (index - 1) % n + 1,
        }
    }

    /// The positive literal for this variable.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub const fn literal(self, size: Size) -> i32 {
        self.index(size) as i32
    }
}

fn cell_clauses(size: Size) -> Vec<Clause> {
    let n = size.value();
    (1..=n)
        .cartesian_product(1..=n)
        .map(|(row, col)| {
            (1..=n)
                .map(|value| Variable::new(Cell::new(row, col), value).literal(size))
                .collect()
        })
        .collect()
}

fn unit_clauses(grid: &Grid) -> Vec<Clause> {
    let size = grid.size();
    let mut clauses = Vec::new();
    for unit in grid.all_units() {
        for value in 1..=size.value() {
            for (&first, &second) in unit.iter().tuple_combinations() {
                clauses.push(smallvec![
                    -Variable::new(Cell::from_spot(first, size), value).literal(size),
                    -Variable::new(Cell::from_spot(second, size), value).literal(size),
                ]);
            }
        }
    }
    clauses
}

fn given_clauses(grid: &Grid) -> Vec<Clause> {
    let size = grid.size();
    grid.givens()
        .iter()
        .enumerate()
        .filter_map(|(spot, domain)| {
            domain.single().map(|value| {
                smallvec![Variable::new(Cell::from_spot(spot, size), value).literal(size)]
            })
        })
        .collect()
}

/// Encodes a board as a CNF formula whose models are exactly its solutions.
#[must_use]
pub fn encode(grid: &Grid) -> Cnf {
    let size = grid.size();
    let clauses = cell_clauses(size)
        .into_iter()
        .chain(unit_clauses(grid))
        .chain(given_clauses(grid))
        .collect();

    Cnf {
        num_vars: size.value() * size.cell_count(),
        clauses,
    }
}
