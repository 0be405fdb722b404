#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate sets.
//!
//! A [`Domain`] is the set of values a cell may still take, stored as a
//! bitmask with bit `v - 1` standing for value `v`. Board orders cap out
//! at 25, so a `u32` always suffices and the set copies for free.

use crate::puzzle::size::Size;

/// The set of candidate values remaining for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Domain {
    bits: u32,
}

impl Domain {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The full range `[1, N]` for a board order.
    #[must_use]
    pub const fn full(size: Size) -> Self {
        let n = size.value() as u32;
        Self {
            bits: (1 << n) - 1,
        }
    }

    /// The set holding exactly `value`.
    #[must_use]
    pub const fn singleton(value: usize) -> Self {
        Self {
            bits: 1 << (value - 1),
        }
    }

    /// Whether `value` is still a candidate.
    #[must_use]
    pub const fn contains(self, value: usize) -> bool {
        self.bits & (1 << (value - 1)) != 0
    }

    /// Number of remaining candidates.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether no candidate remains.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Whether the cell is determined.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        self.bits.count_ones() == 1
    }

    /// The determined value, if the set is a singleton.
    #[must_use]
    pub const fn single(self) -> Option<usize> {
        if self.is_singleton() {
            Some(self.bits.trailing_zeros() as usize + 1)
        } else {
            None
        }
    }

    /// Smallest remaining candidate, if any.
    #[must_use]
    pub const fn min(self) -> Option<usize> {
        if self.bits == 0 {
            None
        } else {
            Some(self.bits.trailing_zeros() as usize + 1)
        }
    }

    /// Removes `value`; returns whether it was present.
    pub const fn remove(&mut self, value: usize) -> bool {
        let mask = 1 << (value - 1);
        let present = self.bits & mask != 0;
        self.bits &= !mask;
        present
    }

    /// Puts `value` back.
    pub const fn insert(&mut self, value: usize) {
        self.bits |= 1 << (value - 1);
    }

    /// Remaining candidates in ascending order.
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl IntoIterator for Domain {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`Domain`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u32,
}

impl Iterator for Iter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let value = self.bits.trailing_zeros() as usize + 1;
        self.bits &= self.bits - 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}
