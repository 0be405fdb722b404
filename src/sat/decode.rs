#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Interpretation of an external engine's model.
//!
//! Engines differ in how they print models: minisat writes a bare line of
//! literals after a `SAT` banner, while competition-style engines prefix
//! status lines with `s` and value lines with `v`. The reader here accepts
//! both shapes, then maps every positive literal back onto the board. A
//! model that does not describe exactly one value per cell is refused
//! rather than silently truncated.

use crate::error::SolveError;
use crate::puzzle::{Assignment, Grid};
use crate::sat::encode::Variable;
use bit_vec::BitVec;

/// Collects the integer literals from the model lines of `output`.
///
/// Comment (`c`) and status (`s`) lines are skipped, as are banner lines
/// such as `SAT` whose first token is not a number. `v` markers inside
/// value lines are dropped.
fn model_literals(output: &str) -> Result<Vec<i32>, SolveError> {
    let mut literals = Vec::new();

    for line in output.lines() {
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            None | Some(&"c" | &"s") => {}
            Some(&first) if first != "v" && first.parse::<i32>().is_err() => {}
            Some(_) => {
                for token in tokens {
                    if token == "v" {
                        continue;
                    }
                    let literal = token.parse::<i32>().map_err(|_| {
                        SolveError::ExternalSolver(format!(
                            "unreadable token {token:?} in model output"
                        ))
                    })?;
                    literals.push(literal);
                }
            }
        }
    }

    Ok(literals)
}

/// Rebuilds a board from a satisfying model.
///
/// # Errors
///
/// Returns [`SolveError::ExternalSolver`] when the output contains an
/// unreadable model line, a literal outside the board encoding, two values
/// for the same cell, or fewer values than the board has cells.
pub fn decode(grid: &Grid, output: &str) -> Result<Assignment, SolveError> {
    let size = grid.size();
    let cells = size.cell_count();

    let mut assignment = Assignment::empty(size);
    let mut seen = BitVec::from_elem(cells, false);

    for literal in model_literals(output)? {
        if literal <= 0 {
            continue;
        }
        #[allow(clippy::cast_sign_loss)]
        let index = literal as usize;
        if index > size.value() * cells {
            return Err(SolveError::ExternalSolver(format!(
                "model literal {literal} is outside the board encoding"
            )));
        }

        let var = Variable::from_index(index, size);
        let spot = var.cell.spot(size);
        if seen[spot] {
            return Err(SolveError::ExternalSolver(format!(
                "model assigns cell {} more than once",
                var.cell
            )));
        }
        seen.set(spot, true);
        assignment.set(spot, var.value);
    }

    if assignment.assigned() != cells {
        return Err(SolveError::ExternalSolver(format!(
            "model determines {} of {cells} cells",
            assignment.assigned()
        )));
    }

    Ok(assignment)
}
