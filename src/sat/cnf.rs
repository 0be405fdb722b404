#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! In-memory CNF formulas and their DIMACS rendering.
//!
//! DIMACS CNF is the standard interchange format for boolean satisfiability
//! problems: a `p cnf <num_variables> <num_clauses>` problem line followed
//! by one clause per line, each a whitespace-separated list of integer
//! literals terminated by `0`. Positive literals select a variable, negative
//! ones its negation. External engines consume these files directly.

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

/// A disjunction of literals. Most clauses the board encoding produces are
/// binary, so a small inline buffer keeps them off the heap.
pub type Clause = SmallVec<[i32; 4]>;

/// A formula in conjunctive normal form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Number of distinct variables, numbered `1..=num_vars`.
    pub num_vars: usize,
    /// The conjunction itself.
    pub clauses: Vec<Clause>,
}

impl Cnf {
    /// An empty formula over `num_vars` variables.
    #[must_use]
    pub const fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Appends a clause.
    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// Total number of literals across all clauses.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(SmallVec::len).sum()
    }

    /// Writes the formula to `path` in DIMACS format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_dimacs(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_dimacs_rendering() {
        let mut cnf = Cnf::new(3);
        cnf.push(smallvec![1, -2]);
        cnf.push(smallvec![2, 3]);
        assert_eq!(cnf.to_string(), "p cnf 3 2\n1 -2 0\n2 3 0\n");
    }

    #[test]
    fn test_empty_formula_is_just_the_problem_line() {
        let cnf = Cnf::new(0);
        assert_eq!(cnf.to_string(), "p cnf 0 0\n");
        assert_eq!(cnf.literal_count(), 0);
    }

    #[test]
    fn test_literal_count() {
        let mut cnf = Cnf::new(4);
        cnf.push(smallvec![1, 2, 3, 4]);
        cnf.push(smallvec![-1, -2]);
        assert_eq!(cnf.literal_count(), 6);
    }

    #[test]
    fn test_unit_clause_renders_with_terminator() {
        let mut cnf = Cnf::new(1);
        cnf.push(smallvec![-1]);
        assert_eq!(cnf.to_string(), "p cnf 1 1\n-1 0\n");
    }
}
