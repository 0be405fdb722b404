#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Solving strategies.
//!
//! Every way of solving a board implements [`Strategy`]: bare depth-first
//! search, constraint propagation with fewest-candidates-first branching,
//! and reduction to SAT handed off to an external engine. An attempt
//! either produces a solved [`Outcome`] or reports what stopped it.

pub mod naive;
pub mod propagating;
pub mod reduction;

pub use naive::NaiveSearch;
pub use propagating::PropagatingSearch;
pub use reduction::SatReduction;

use crate::error::SolveError;
use crate::puzzle::{Assignment, Grid};
use clap::ValueEnum;
use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

/// Wall-clock budget for one solve attempt.
///
/// Strategies poll the deadline at every recursive entry, so expiry
/// surfaces as [`SolveError::Timeout`] even when the attempt would have
/// finished on the very next step.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// A deadline `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    /// Whether the budget has run out.
    #[must_use]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// The budget this deadline was created with.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Errors with [`SolveError::Timeout`] once the budget has run out.
    ///
    /// # Errors
    ///
    /// Returns the timeout carrying the original budget.
    pub fn check(self) -> Result<(), SolveError> {
        if self.expired() {
            Err(SolveError::Timeout { limit: self.budget })
        } else {
            Ok(())
        }
    }
}

/// Counters accumulated during one attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Branching decisions taken.
    pub decisions: u64,
    /// Candidate eliminations applied.
    pub propagations: u64,
    /// Contradictions that forced a backtrack.
    pub conflicts: u64,
}

/// A successful solve: the completed board plus the work it took.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The completed board.
    pub assignment: Assignment,
    /// Work counters for the attempt.
    pub stats: SolveStats,
}

/// A way of solving a board.
pub trait Strategy {
    /// Attempts to solve `grid`, giving up once `deadline` expires.
    ///
    /// # Errors
    ///
    /// [`SolveError::Unsatisfiable`] when the puzzle has no solution,
    /// [`SolveError::Timeout`] when the deadline ran out first, and the
    /// remaining [`SolveError`] variants for reduction-specific failures.
    fn attempt(&self, grid: &Grid, deadline: Option<Deadline>) -> Result<Outcome, SolveError>;
}

/// Enum selecting which solving strategy to use.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum StrategyKind {
    /// Depth-first search over bare assignments
    Naive,
    /// Constraint propagation with fewest-candidates-first branching
    #[default]
    Propagating,
    /// Reduction to CNF handed to an external SAT engine
    Sat,
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive => write!(f, "Naive Search"),
            Self::Propagating => write!(f, "Propagating Search"),
            Self::Sat => write!(f, "SAT Reduction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_expires_immediately() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.expired());
        assert!(matches!(
            deadline.check(),
            Err(SolveError::Timeout { limit }) if limit == Duration::ZERO
        ));
    }

    #[test]
    fn test_generous_budget_does_not_expire() {
        let deadline = Deadline::after(Duration::from_secs(3600));
        assert!(!deadline.expired());
        assert!(deadline.check().is_ok());
        assert_eq!(deadline.budget(), Duration::from_secs(3600));
    }

    #[test]
    fn test_default_strategy_is_propagating() {
        assert_eq!(StrategyKind::default(), StrategyKind::Propagating);
    }

    #[test]
    fn test_strategy_kind_display() {
        assert_eq!(StrategyKind::Naive.to_string(), "Naive Search");
        assert_eq!(StrategyKind::Sat.to_string(), "SAT Reduction");
    }

    #[test]
    fn test_stats_start_at_zero() {
        let stats = SolveStats::default();
        assert_eq!(stats.decisions, 0);
        assert_eq!(stats.propagations, 0);
        assert_eq!(stats.conflicts, 0);
    }
}
