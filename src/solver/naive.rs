#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Depth-first search without propagation.
//!
//! Cells are filled in scan order. Each candidate is vetted against the
//! already-assigned peers and retracted when the branch below it dies.
//! Nothing is deduced ahead of time, which keeps the strategy trivially
//! correct and makes it the baseline the cleverer strategies are checked
//! against. On anything bigger than a 4x4 board it is hopeless.

use crate::error::SolveError;
use crate::puzzle::{Assignment, Grid};
use crate::solver::{Deadline, Outcome, SolveStats, Strategy};

/// Brute-force depth-first search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSearch;

impl Strategy for NaiveSearch {
    fn attempt(&self, grid: &Grid, deadline: Option<Deadline>) -> Result<Outcome, SolveError> {
        let mut assignment = grid.given_assignment();
        if !assignment.is_consistent(grid) {
            return Err(SolveError::Unsatisfiable);
        }

        let mut stats = SolveStats::default();
        if search(grid, &mut assignment, deadline, &mut stats)? {
            Ok(Outcome { assignment, stats })
        } else {
            Err(SolveError::Unsatisfiable)
        }
    }
}

fn search(
    grid: &Grid,
    assignment: &mut Assignment,
    deadline: Option<Deadline>,
    stats: &mut SolveStats,
) -> Result<bool, SolveError> {
    if let Some(deadline) = deadline {
        deadline.check()?;
    }

    let Some(spot) = first_blank(assignment) else {
        return Ok(true);
    };

    for value in grid.given(spot) {
        if clashes(grid, assignment, spot, value) {
            continue;
        }
        stats.decisions += 1;
        assignment.set(spot, value);
        if search(grid, assignment, deadline, stats)? {
            return Ok(true);
        }
        assignment.unset(spot);
        stats.conflicts += 1;
    }

    Ok(false)
}

fn first_blank(assignment: &Assignment) -> Option<usize> {
    (0..assignment.size().cell_count()).find(|&spot| assignment.get(spot).is_none())
}

fn clashes(grid: &Grid, assignment: &Assignment, spot: usize, value: usize) -> bool {
    grid.peer_spots(spot)
        .iter()
        .any(|&peer| assignment.get(peer) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Size;
    use std::time::Duration;

    fn four(text: &str) -> Grid {
        Grid::parse(Size::Four, text).unwrap()
    }

    #[test]
    fn test_solves_a_forced_board() {
        let grid = four(".2343.1221.3432.");
        let outcome = NaiveSearch.attempt(&grid, None).unwrap();
        assert_eq!(outcome.assignment.to_line(), "1234341221434321");
        assert!(outcome.assignment.check(&grid));
    }

    #[test]
    fn test_solves_a_sparse_board() {
        let grid = four("1...2..........3");
        let outcome = NaiveSearch.attempt(&grid, None).unwrap();
        assert!(outcome.assignment.check(&grid));
        assert_eq!(outcome.assignment.get(0), Some(1));
    }

    #[test]
    fn test_solved_board_comes_back_unchanged() {
        let grid = four("1234341221434321");
        let outcome = NaiveSearch.attempt(&grid, None).unwrap();
        assert_eq!(outcome.assignment.to_line(), "1234341221434321");
        assert_eq!(outcome.stats.decisions, 0);
    }

    #[test]
    fn test_clashing_givens_fail_before_any_search() {
        let grid = four("11..............");
        let err = NaiveSearch.attempt(&grid, None).unwrap_err();
        assert!(matches!(err, SolveError::Unsatisfiable));
    }

    #[test]
    fn test_full_but_inconsistent_board_is_rejected() {
        let grid = four("1134341221434321");
        let err = NaiveSearch.attempt(&grid, None).unwrap_err();
        assert!(matches!(err, SolveError::Unsatisfiable));
    }

    #[test]
    fn test_consistent_givens_can_still_be_unsolvable() {
        // (1,1) has no candidate left: 1 is taken in its row, 2 in its
        // block, 3 and 4 in its column.
        let grid = four("..1..2..3...4...");
        let err = NaiveSearch.attempt(&grid, None).unwrap_err();
        assert!(matches!(err, SolveError::Unsatisfiable));
    }

    #[test]
    fn test_expired_deadline_reports_timeout() {
        let grid = four(".2343.1221.3432.");
        let deadline = Deadline::after(Duration::ZERO);
        let err = NaiveSearch.attempt(&grid, Some(deadline)).unwrap_err();
        assert!(matches!(err, SolveError::Timeout { .. }));
    }

    #[test]
    fn test_counts_decisions_on_a_solved_board() {
        let grid = four(".2343.1221.3432.");
        let outcome = NaiveSearch.attempt(&grid, None).unwrap();
        assert_eq!(outcome.stats.decisions, 4);
        assert_eq!(outcome.stats.conflicts, 0);
    }
}
