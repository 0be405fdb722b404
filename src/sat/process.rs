#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Invocation of an external SAT engine.
//!
//! The engine is any executable that takes a DIMACS file as its only
//! argument and prints its result on stdout. Engines following the
//! SAT-competition convention exit with 10 for satisfiable and 20 for
//! unsatisfiable; engines that exit 0 and print a textual verdict are
//! recognised as well. Anything else is reported as an engine failure
//! together with whatever it wrote to stderr.

use crate::error::SolveError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Handle on an external SAT executable.
#[derive(Debug, Clone)]
pub struct ExternalEngine {
    program: PathBuf,
}

/// The verdict of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineAnswer {
    /// The formula has a model; the engine's stdout is kept for decoding.
    Satisfiable(String),
    /// The formula has no model.
    Unsatisfiable,
}

impl ExternalEngine {
    /// Wraps the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The wrapped executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Runs the engine on the DIMACS file at `cnf` and waits for it.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::ExternalSolver`] if the process cannot be
    /// launched or finishes with a status that fits neither verdict.
    pub fn run(&self, cnf: &Path) -> Result<EngineAnswer, SolveError> {
        let output = Command::new(&self.program).arg(cnf).output().map_err(|e| {
            SolveError::ExternalSolver(format!(
                "failed to launch {}: {e}",
                self.program.display()
            ))
        })?;

        classify(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

fn classify(code: Option<i32>, stdout: String, stderr: &str) -> Result<EngineAnswer, SolveError> {
    match code {
        Some(10) => Ok(EngineAnswer::Satisfiable(stdout)),
        Some(20) => Ok(EngineAnswer::Unsatisfiable),
        Some(0) if stdout.contains("UNSAT") => Ok(EngineAnswer::Unsatisfiable),
        Some(0) => Ok(EngineAnswer::Satisfiable(stdout)),
        Some(code) => Err(SolveError::ExternalSolver(format!(
            "engine exited with unexpected status {code}: {}",
            stderr.trim()
        ))),
        None => Err(SolveError::ExternalSolver(format!(
            "engine was terminated by a signal: {}",
            stderr.trim()
        ))),
    }
}
