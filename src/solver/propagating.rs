#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Constraint propagation with best-first branching.
//!
//! The propagator keeps one candidate [`Domain`] per cell and a FIFO
//! worklist of pending eliminations. Removing a candidate can trigger two
//! follow-ups: a cell left with a single candidate eliminates that value
//! from all its peers, and a unit left with a single home for a value
//! forces that cell. The worklist is drained to a fixpoint before any
//! branching happens.
//!
//! Search branches on a cell with the fewest remaining candidates.
//! Instead of cloning the domain table per branch, every elimination is
//! recorded on a trail and popped back off when the branch is abandoned.

use crate::error::SolveError;
use crate::puzzle::{Assignment, Domain, Grid};
use crate::solver::{Deadline, Outcome, SolveStats, Strategy};
use std::collections::VecDeque;

/// Arc-consistency propagation with fewest-candidates-first branching.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropagatingSearch;

impl Strategy for PropagatingSearch {
    fn attempt(&self, grid: &Grid, deadline: Option<Deadline>) -> Result<Outcome, SolveError> {
        let mut propagator = Propagator::new(grid);
        if !propagator.init() {
            return Err(SolveError::Unsatisfiable);
        }

        if propagator.search(deadline)? {
            let stats = propagator.stats;
            Ok(Outcome {
                assignment: propagator.into_assignment(),
                stats,
            })
        } else {
            Err(SolveError::Unsatisfiable)
        }
    }
}

struct Propagator<'g> {
    grid: &'g Grid,
    domains: Vec<Domain>,
    /// Pending (spot, value) eliminations. Empty between drains.
    queue: VecDeque<(usize, usize)>,
    /// Every applied elimination, in order, for backtracking.
    trail: Vec<(usize, usize)>,
    stats: SolveStats,
}

impl<'g> Propagator<'g> {
    fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            domains: vec![Domain::full(grid.size()); grid.size().cell_count()],
            queue: VecDeque::new(),
            trail: Vec::new(),
            stats: SolveStats::default(),
        }
    }

    /// Feeds the givens in. Returns false if they contradict each other.
    fn init(&mut self) -> bool {
        for spot in 0..self.grid.size().cell_count() {
            if let Some(value) = self.grid.given(spot).single() {
                if !self.assign(spot, value) {
                    return false;
                }
            }
        }
        true
    }

    /// Pins `spot` to `value` by eliminating every other candidate, then
    /// drains the fallout.
    fn assign(&mut self, spot: usize, value: usize) -> bool {
        let domain = self.domains[spot];
        for other in domain {
            if other != value {
                self.queue.push_back((spot, other));
            }
        }
        self.drain()
    }

    fn drain(&mut self) -> bool {
        while let Some((spot, value)) = self.queue.pop_front() {
            if !self.eliminate(spot, value) {
                self.queue.clear();
                return false;
            }
        }
        true
    }

    /// Removes one candidate and enqueues whatever that entails.
    fn eliminate(&mut self, spot: usize, value: usize) -> bool {
        if !self.domains[spot].remove(value) {
            return true;
        }
        self.trail.push((spot, value));
        self.stats.propagations += 1;

        let domain = self.domains[spot];
        if domain.is_empty() {
            return false;
        }
        if let Some(single) = domain.single() {
            for &peer in self.grid.peer_spots(spot) {
                self.queue.push_back((peer, single));
            }
        }

        let grid = self.grid;
        for unit in grid.unit_spots(spot) {
            let mut places = unit
                .iter()
                .copied()
                .filter(|&s| self.domains[s].contains(value));
            let Some(first) = places.next() else {
                return false;
            };
            if places.next().is_none() {
                let only = self.domains[first];
                for other in only {
                    if other != value {
                        self.queue.push_back((first, other));
                    }
                }
            }
        }

        true
    }

    fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Reverts every elimination recorded past `mark`.
    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some((spot, value)) = self.trail.pop() else {
                break;
            };
            self.domains[spot].insert(value);
        }
    }

    fn search(&mut self, deadline: Option<Deadline>) -> Result<bool, SolveError> {
        if let Some(deadline) = deadline {
            deadline.check()?;
        }

        let Some(spot) = self.branch_spot() else {
            return Ok(true);
        };

        let candidates = self.domains[spot];
        for value in candidates {
            self.stats.decisions += 1;
            let mark = self.mark();
            if self.assign(spot, value) && self.search(deadline)? {
                return Ok(true);
            }
            self.stats.conflicts += 1;
            self.undo_to(mark);
        }

        Ok(false)
    }

    /// The undetermined cell with the fewest candidates, ties broken by
    /// scan order. `None` means every cell is determined.
    fn branch_spot(&self) -> Option<usize> {
        self.domains
            .iter()
            .enumerate()
            .filter(|(_, domain)| !domain.is_singleton())
            .min_by_key(|&(spot, domain)| (domain.len(), spot))
            .map(|(spot, _)| spot)
    }

    fn into_assignment(self) -> Assignment {
        let mut assignment = Assignment::empty(self.grid.size());
        for (spot, domain) in self.domains.iter().enumerate() {
            if let Some(value) = domain.single() {
                assignment.set(spot, value);
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Size;
    use std::time::Duration;

    const EASY_NINE: &str =
        "..3.2.6..9..3.5..1..18.64....81.29..7.......8..67.82....26.95..8..2.3..9..5.1.3..";
    const HARD_NINE: &str =
        "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";

    fn four(text: &str) -> Grid {
        Grid::parse(Size::Four, text).unwrap()
    }

    fn nine(text: &str) -> Grid {
        Grid::parse(Size::Nine, text).unwrap()
    }

    #[test]
    fn test_propagation_alone_finishes_a_forced_board() {
        let grid = four(".2343.1221.3432.");
        let outcome = PropagatingSearch.attempt(&grid, None).unwrap();
        assert_eq!(outcome.assignment.to_line(), "1234341221434321");
        assert_eq!(outcome.stats.decisions, 0);
    }

    #[test]
    fn test_solves_an_easy_nine_board() {
        let grid = nine(EASY_NINE);
        let outcome = PropagatingSearch.attempt(&grid, None).unwrap();
        assert!(outcome.assignment.check(&grid));
    }

    #[test]
    fn test_solves_a_hard_nine_board() {
        let grid = nine(HARD_NINE);
        let outcome = PropagatingSearch.attempt(&grid, None).unwrap();
        assert!(outcome.assignment.check(&grid));
        assert!(outcome.stats.decisions > 0);
    }

    #[test]
    fn test_agrees_with_naive_search_on_a_forced_board() {
        use crate::solver::NaiveSearch;

        let grid = four(".2343.1221.3432.");
        let propagated = PropagatingSearch.attempt(&grid, None).unwrap();
        let brute = NaiveSearch.attempt(&grid, None).unwrap();
        assert_eq!(
            propagated.assignment.to_line(),
            brute.assignment.to_line()
        );
    }

    #[test]
    fn test_solved_board_comes_back_unchanged() {
        let grid = four("1234341221434321");
        let outcome = PropagatingSearch.attempt(&grid, None).unwrap();
        assert_eq!(outcome.assignment.to_line(), "1234341221434321");
        assert_eq!(outcome.stats.decisions, 0);
    }

    #[test]
    fn test_clashing_givens_are_unsatisfiable() {
        let grid = four("11..............");
        let err = PropagatingSearch.attempt(&grid, None).unwrap_err();
        assert!(matches!(err, SolveError::Unsatisfiable));
    }

    #[test]
    fn test_starved_cell_is_unsatisfiable() {
        let grid = four("..1..2..3...4...");
        let err = PropagatingSearch.attempt(&grid, None).unwrap_err();
        assert!(matches!(err, SolveError::Unsatisfiable));
    }

    #[test]
    fn test_expired_deadline_reports_timeout() {
        let grid = nine(EASY_NINE);
        let deadline = Deadline::after(Duration::ZERO);
        let err = PropagatingSearch.attempt(&grid, Some(deadline)).unwrap_err();
        assert!(matches!(err, SolveError::Timeout { .. }));
    }

    #[test]
    fn test_assign_strips_the_value_from_peers() {
        let grid = four("................");
        let mut propagator = Propagator::new(&grid);
        assert!(propagator.assign(0, 3));

        assert_eq!(propagator.domains[0].single(), Some(3));
        for &peer in grid.peer_spots(0) {
            assert!(!propagator.domains[peer].contains(3));
        }
    }

    #[test]
    fn test_undo_restores_the_domain_table() {
        let grid = four("................");
        let mut propagator = Propagator::new(&grid);
        let mark = propagator.mark();
        assert!(propagator.assign(5, 2));
        propagator.undo_to(mark);

        for domain in &propagator.domains {
            assert_eq!(*domain, Domain::full(Size::Four));
        }
    }

    #[test]
    fn test_eliminating_twice_is_a_no_op() {
        let grid = four("................");
        let mut propagator = Propagator::new(&grid);
        assert!(propagator.eliminate(0, 1) && propagator.drain());
        let applied = propagator.stats.propagations;
        assert!(propagator.eliminate(0, 1));
        assert_eq!(propagator.stats.propagations, applied);
    }
}
