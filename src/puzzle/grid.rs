#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Parsed puzzles and their constraint topology.
//!
//! A [`Grid`] is built once from a puzzle string: the givens become
//! singleton domains, every blank a full domain, and the peer and unit
//! tables are derived up front so solving never recomputes them. The
//! tables are a pure function of the board order; a cell's peers are the
//! other cells of its row, column and box, `3(N-1) - 2(b-1)` after
//! deduplication.

use crate::error::{ParseError, Result};
use crate::puzzle::assignment::Assignment;
use crate::puzzle::cell::Cell;
use crate::puzzle::domain::Domain;
use crate::puzzle::size::Size;
use crate::puzzle::value_from_char;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// An immutable parsed puzzle: the given domains plus the peer/unit
/// topology of its board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: Size,
    givens: Vec<Domain>,
    peers: Vec<Vec<usize>>,
    rows: Vec<Vec<usize>>,
    cols: Vec<Vec<usize>>,
    boxes: Vec<Vec<usize>>,
}

impl Grid {
    /// Parses a puzzle string for a known board order.
    ///
    /// The string is a row-major scan, one character per cell: `.` for a
    /// blank, `1`-`9` then `A`-`Z` for given values.
    ///
    /// # Errors
    ///
    /// - [`ParseError::BadLength`] if the string is not `N^2` characters.
    /// - [`ParseError::BadCharacter`] for anything outside the alphabet.
    /// - [`ParseError::ValueOutOfRange`] for a digit above the board order.
    pub fn parse(size: Size, text: &str) -> Result<Self, ParseError> {
        let n = size.value();
        let found = text.chars().count();
        if found != size.cell_count() {
            return Err(ParseError::BadLength { size: n, found });
        }

        let mut givens = Vec::with_capacity(size.cell_count());
        for c in text.chars() {
            match value_from_char(c)? {
                None => givens.push(Domain::full(size)),
                Some(value) if value <= n => givens.push(Domain::singleton(value)),
                Some(value) => return Err(ParseError::ValueOutOfRange { size: n, value }),
            }
        }

        let (rows, cols, boxes) = build_units(size);
        Ok(Self {
            size,
            givens,
            peers: build_peers(size),
            rows,
            cols,
            boxes,
        })
    }

    /// Parses a bare puzzle line, inferring the board order from its
    /// length (16, 81, 256 or 625 characters).
    ///
    /// # Errors
    ///
    /// [`ParseError::BadCellCount`] for an unrecognised length, otherwise
    /// as [`Grid::parse`].
    pub fn parse_line(text: &str) -> Result<Self, ParseError> {
        let size = Size::for_cell_count(text.chars().count())?;
        Self::parse(size, text)
    }

    /// Parses puzzle file contents.
    ///
    /// `#` starts a comment and blank lines are ignored. If the first
    /// significant line is a supported board order (`4`, `9`, `16` or
    /// `25`), the remaining lines joined together form the puzzle string;
    /// otherwise all significant lines joined together are parsed as a
    /// bare puzzle line. Either way a puzzle may be split across lines,
    /// one row per line being the usual layout.
    ///
    /// # Errors
    ///
    /// As [`Grid::parse`] and [`Grid::parse_line`].
    pub fn from_source(text: &str) -> Result<Self, ParseError> {
        let significant = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty())
            .collect_vec();

        if let Some((first, rest)) = significant.split_first() {
            if let Some(size) = first.parse::<usize>().ok().and_then(|n| Size::try_from(n).ok()) {
                return Self::parse(size, &rest.concat());
            }
            Self::parse_line(&significant.concat())
        } else {
            Err(ParseError::BadCellCount(0))
        }
    }

    /// Reads and parses a puzzle file from disk.
    ///
    /// # Errors
    ///
    /// I/O failures and everything [`Grid::from_source`] reports.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_source(&text)?)
    }

    /// The board order.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The parsed domains, spot-indexed: a singleton per given, the full
    /// range per blank.
    #[must_use]
    pub fn givens(&self) -> &[Domain] {
        &self.givens
    }

    /// The parsed domain of one cell index.
    #[must_use]
    pub fn given(&self, spot: usize) -> Domain {
        self.givens[spot]
    }

    /// Number of given cells in the puzzle.
    #[must_use]
    pub fn given_count(&self) -> usize {
        self.givens.iter().filter(|d| d.is_singleton()).count()
    }

    /// The givens projected into a partial assignment.
    #[must_use]
    pub fn given_assignment(&self) -> Assignment {
        let mut assignment = Assignment::empty(self.size);
        for (spot, domain) in self.givens.iter().enumerate() {
            if let Some(value) = domain.single() {
                assignment.set(spot, value);
            }
        }
        assignment
    }

    /// Peer cell indices of one cell index, ascending.
    #[must_use]
    pub fn peer_spots(&self, spot: usize) -> &[usize] {
        &self.peers[spot]
    }

    /// Peers of a cell: every other cell sharing its row, column or box.
    #[must_use]
    pub fn peers(&self, cell: Cell) -> Vec<Cell> {
        self.peers[cell.spot(self.size)]
            .iter()
            .map(|&spot| Cell::from_spot(spot, self.size))
            .collect()
    }

    /// The row, column and box of one cell index, as spot slices.
    #[must_use]
    pub fn unit_spots(&self, spot: usize) -> [&[usize]; 3] {
        let n = self.size.value();
        let b = self.size.block_size();
        let row = spot / n;
        let col = spot % n;
        let bx = row / b * b + col / b;
        [&self.rows[row], &self.cols[col], &self.boxes[bx]]
    }

    /// The three units a cell belongs to, row first, each of size `N`.
    #[must_use]
    pub fn units(&self, cell: Cell) -> [Vec<Cell>; 3] {
        self.unit_spots(cell.spot(self.size)).map(|unit| {
            unit.iter()
                .map(|&spot| Cell::from_spot(spot, self.size))
                .collect()
        })
    }

    /// Every unit of the board: all rows, then all columns, then all boxes.
    pub(crate) fn all_units(&self) -> impl Iterator<Item = &[usize]> {
        self.rows
            .iter()
            .chain(self.cols.iter())
            .chain(self.boxes.iter())
            .map(Vec::as_slice)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.given_assignment().fmt(f)
    }
}

fn build_peers(size: Size) -> Vec<Vec<usize>> {
    let n = size.value();
    let b = size.block_size();

    (0..size.cell_count())
        .map(|spot| {
            let cell = Cell::from_spot(spot, size);
            let origin = cell.block_origin(size);
            let mut seen = FxHashSet::default();

            for col in 1..=n {
                seen.insert(Cell::new(cell.row, col).spot(size));
            }
            for row in 1..=n {
                seen.insert(Cell::new(row, cell.col).spot(size));
            }
            for row in origin.row..origin.row + b {
                for col in origin.col..origin.col + b {
                    seen.insert(Cell::new(row, col).spot(size));
                }
            }

            seen.remove(&spot);
            seen.into_iter().sorted_unstable().collect_vec()
        })
        .collect()
}

fn build_units(size: Size) -> (Vec<Vec<usize>>, Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let n = size.value();
    let b = size.block_size();

    let rows = (1..=n)
        .map(|row| (1..=n).map(|col| Cell::new(row, col).spot(size)).collect())
        .collect();

    let cols = (1..=n)
        .map(|col| (1..=n).map(|row| Cell::new(row, col).spot(size)).collect())
        .collect();

    let boxes = (0..n)
        .step_by(b)
        .cartesian_product((0..n).step_by(b))
        .map(|(br, bc)| {
            (br + 1..=br + b)
                .cartesian_product(bc + 1..=bc + b)
                .map(|(row, col)| Cell::new(row, col).spot(size))
                .collect()
        })
        .collect();

    (rows, cols, boxes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORCED_FOUR: &str = ".2343.1221.3432.";

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            Grid::parse(Size::Four, "123"),
            Err(ParseError::BadLength { size: 4, found: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_characters() {
        let text = "x234341221434321";
        assert_eq!(
            Grid::parse(Size::Four, text),
            Err(ParseError::BadCharacter('x'))
        );
    }

    #[test]
    fn test_parse_rejects_large_values() {
        let text = "9234341221434321";
        assert_eq!(
            Grid::parse(Size::Four, text),
            Err(ParseError::ValueOutOfRange { size: 4, value: 9 })
        );
    }

    #[test]
    fn test_parse_letter_values() {
        let text = format!("G{}", ".".repeat(255));
        let grid = Grid::parse(Size::Sixteen, &text).unwrap();
        assert_eq!(grid.given(0).single(), Some(16));
        assert_eq!(grid.given_count(), 1);
    }

    #[test]
    fn test_parse_line() {
        let grid = Grid::parse_line(FORCED_FOUR).unwrap();
        assert_eq!(grid.size(), Size::Four);
        assert_eq!(
            Grid::parse_line("1.3"),
            Err(ParseError::BadCellCount(3))
        );
    }

    #[test]
    fn test_givens() {
        let grid = Grid::parse(Size::Four, FORCED_FOUR).unwrap();
        assert_eq!(grid.given(1).single(), Some(2));
        assert_eq!(grid.given(0), Domain::full(Size::Four));
        assert_eq!(grid.given_count(), 12);
    }

    #[test]
    fn test_corner_peers() {
        let grid = Grid::parse(Size::Four, &".".repeat(16)).unwrap();
        let peers = grid.peers(Cell::new(1, 1));
        assert_eq!(peers.len(), 7);
        assert_eq!(
            peers,
            vec![
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(1, 4),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(3, 1),
                Cell::new(4, 1),
            ]
        );
    }

    #[test]
    fn test_peer_count() {
        for size in [Size::Four, Size::Nine, Size::Sixteen] {
            let n = size.value();
            let b = size.block_size();
            let expected = 3 * (n - 1) - 2 * (b - 1);
            let grid = Grid::parse(size, &".".repeat(size.cell_count())).unwrap();
            for spot in 0..size.cell_count() {
                assert_eq!(grid.peer_spots(spot).len(), expected);
            }
        }
    }

    #[test]
    fn test_units() {
        let grid = Grid::parse(Size::Nine, &".".repeat(81)).unwrap();
        let cell = Cell::new(5, 7);
        for unit in grid.units(cell) {
            assert_eq!(unit.len(), 9);
            assert!(unit.contains(&cell));
        }
    }

    #[test]
    fn test_box_unit() {
        let grid = Grid::parse(Size::Four, &".".repeat(16)).unwrap();
        let [_, _, block] = grid.units(Cell::new(3, 4));
        assert_eq!(
            block,
            vec![
                Cell::new(3, 3),
                Cell::new(3, 4),
                Cell::new(4, 3),
                Cell::new(4, 4),
            ]
        );
    }

    #[test]
    fn test_all_units() {
        let grid = Grid::parse(Size::Four, &".".repeat(16)).unwrap();
        assert_eq!(grid.all_units().count(), 12);
        assert!(grid.all_units().all(|unit| unit.len() == 4));
    }

    #[test]
    fn test_from_source_sized() {
        let text = "# corner puzzle\n4\n.234\n3.12\n21.3\n432.\n";
        let grid = Grid::from_source(text).unwrap();
        assert_eq!(grid.size(), Size::Four);
        assert_eq!(grid.given_count(), 12);
    }

    #[test]
    fn test_from_source_bare() {
        let text = "1234\n3412\n2143\n4321\n";
        let grid = Grid::from_source(text).unwrap();
        assert_eq!(grid.size(), Size::Four);
        assert_eq!(grid.given_count(), 16);
    }

    #[test]
    fn test_from_source_empty() {
        assert_eq!(
            Grid::from_source("# nothing here\n\n"),
            Err(ParseError::BadCellCount(0))
        );
    }

    #[test]
    fn test_from_source_length_mismatch() {
        let text = "9\n.234341221434321";
        assert_eq!(
            Grid::from_source(text),
            Err(ParseError::BadLength { size: 9, found: 16 })
        );
    }

    #[test]
    fn test_display() {
        let grid = Grid::parse(Size::Four, FORCED_FOUR).unwrap();
        let expected = ". 2 | 3 4\n\
                        3 . | 1 2\n\
                        ----+----\n\
                        2 1 | . 3\n\
                        4 3 | 2 .\n";
        assert_eq!(grid.to_string(), expected);
    }
}
