#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Solving by reduction to SAT.
//!
//! The board is encoded as CNF, written to a scratch DIMACS file and
//! handed to an external engine. The engine's model is then decoded back
//! into a board. The deadline is honoured around the engine run, not
//! inside it: the process is never interrupted once launched, so a slow
//! engine overshoots the budget by however long its run takes.

use crate::error::SolveError;
use crate::puzzle::Grid;
use crate::sat::decode::decode;
use crate::sat::encode::encode;
use crate::sat::process::{EngineAnswer, ExternalEngine};
use crate::solver::{Deadline, Outcome, SolveStats, Strategy};
use std::path::{Path, PathBuf};

/// Reduction to CNF solved by an external engine.
#[derive(Debug, Clone)]
pub struct SatReduction {
    engine: ExternalEngine,
    scratch: PathBuf,
}

impl SatReduction {
    /// Pairs an engine with the scratch path its DIMACS input is written
    /// to. The file is left in place after the run.
    pub fn new(engine: ExternalEngine, scratch: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            scratch: scratch.into(),
        }
    }

    /// Where the DIMACS instance is written.
    #[must_use]
    pub fn scratch(&self) -> &Path {
        &self.scratch
    }
}

impl Strategy for SatReduction {
    fn attempt(&self, grid: &Grid, deadline: Option<Deadline>) -> Result<Outcome, SolveError> {
        if let Some(deadline) = deadline {
            deadline.check()?;
        }

        let cnf = encode(grid);
        cnf.write_dimacs(&self.scratch)?;

        let answer = self.engine.run(&self.scratch)?;

        if let Some(deadline) = deadline {
            deadline.check()?;
        }

        match answer {
            EngineAnswer::Unsatisfiable => Err(SolveError::Unsatisfiable),
            EngineAnswer::Satisfiable(output) => Ok(Outcome {
                assignment: decode(grid, &output)?,
                stats: SolveStats::default(),
            }),
        }
    }
}
