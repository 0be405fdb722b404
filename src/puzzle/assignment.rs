#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::puzzle::grid::Grid;
use crate::puzzle::size::Size;
use crate::puzzle::value_to_char;
use crate::puzzle::{cell::Cell, domain::Domain};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// A partial mapping from cells to values, built up during search.
///
/// Spot-indexed and dense; `None` marks a still-unassigned cell. A solved
/// board is an assignment that is complete and consistent with the peer
/// topology of its grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    size: Size,
    values: Vec<Option<usize>>,
}

impl Assignment {
    /// An assignment with every cell blank.
    #[must_use]
    pub fn empty(size: Size) -> Self {
        Self {
            size,
            values: vec![None; size.cell_count()],
        }
    }

    /// The board order.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The value at a cell index, if assigned.
    #[must_use]
    pub fn get(&self, spot: usize) -> Option<usize> {
        self.values[spot]
    }

    /// The value at a coordinate, if assigned.
    #[must_use]
    pub fn value(&self, cell: Cell) -> Option<usize> {
        self.values[cell.spot(self.size)]
    }

    /// Assigns a value to a cell index.
    pub fn set(&mut self, spot: usize, value: usize) {
        self.values[spot] = Some(value);
    }

    /// Clears a cell index.
    pub fn unset(&mut self, spot: usize) {
        self.values[spot] = None;
    }

    /// Number of assigned cells.
    #[must_use]
    pub fn assigned(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether every cell holds a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Whether no two assigned peers share a value.
    #[must_use]
    pub fn is_consistent(&self, grid: &Grid) -> bool {
        self.values.iter().enumerate().all(|(spot, value)| {
            value.is_none_or(|v| {
                grid.peer_spots(spot)
                    .iter()
                    .all(|&peer| self.values[peer] != Some(v))
            })
        })
    }

    /// Whether this is a full solution: complete, and every unit holds
    /// each value exactly once.
    #[must_use]
    pub fn check(&self, grid: &Grid) -> bool {
        if !self.is_complete() {
            return false;
        }
        grid.all_units().all(|unit| {
            let mut seen = Domain::empty();
            unit.iter().all(|&spot| match self.values[spot] {
                Some(value) if !seen.contains(value) => {
                    seen.insert(value);
                    true
                }
                _ => false,
            })
        })
    }

    /// Renders the assignment as a puzzle string, `.` for blanks.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.values
            .iter()
            .map(|value| value.map_or('.', value_to_char))
            .collect()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let n = self.size.value();
        let b = self.size.block_size();

        for row in 1..=n {
            for col in 1..=n {
                let spot = Cell::new(row, col).spot(self.size);
                write!(f, "{}", self.values[spot].map_or('.', value_to_char))?;
                if col < n {
                    if col % b == 0 {
                        write!(f, " | ")?;
                    } else {
                        write!(f, " ")?;
                    }
                }
            }
            writeln!(f)?;
            if row < n && row % b == 0 {
                let block = "-".repeat(2 * b - 1);
                writeln!(f, "{}", (0..b).map(|_| block.as_str()).join("-+-"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED_FOUR: &str = "1234341221434321";

    fn solved_four() -> (Grid, Assignment) {
        let grid = Grid::parse(Size::Four, SOLVED_FOUR).unwrap();
        (grid.clone(), grid.given_assignment())
    }

    #[test]
    fn test_empty() {
        let assignment = Assignment::empty(Size::Nine);
        assert_eq!(assignment.assigned(), 0);
        assert!(!assignment.is_complete());
        assert_eq!(assignment.to_line(), ".".repeat(81));
    }

    #[test]
    fn test_set_unset() {
        let mut assignment = Assignment::empty(Size::Four);
        assignment.set(5, 3);
        assert_eq!(assignment.get(5), Some(3));
        assert_eq!(assignment.value(Cell::new(2, 2)), Some(3));
        assignment.unset(5);
        assert_eq!(assignment.get(5), None);
    }

    #[test]
    fn test_check_solved() {
        let (grid, assignment) = solved_four();
        assert!(assignment.is_complete());
        assert!(assignment.is_consistent(&grid));
        assert!(assignment.check(&grid));
        assert_eq!(assignment.to_line(), SOLVED_FOUR);
    }

    #[test]
    fn test_consistency_clash() {
        let (grid, mut assignment) = solved_four();
        assignment.set(1, 1);
        assert!(!assignment.is_consistent(&grid));
        assert!(!assignment.check(&grid));
    }

    #[test]
    fn test_check_incomplete() {
        let (grid, mut assignment) = solved_four();
        assignment.unset(0);
        assert!(assignment.is_consistent(&grid));
        assert!(!assignment.check(&grid));
    }

    #[test]
    fn test_display() {
        let (_, assignment) = solved_four();
        let expected = "1 2 | 3 4\n\
                        3 4 | 1 2\n\
                        ----+----\n\
                        2 1 | 4 3\n\
                        4 3 | 2 1\n";
        assert_eq!(assignment.to_string(), expected);
    }
}
