//! Fixed-size letter grid

use crate::core::{MAX_GUESSES, Row};

/// Six rows of five cells, each empty or holding an uppercase letter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; MAX_GUESSES],
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if `index >= 6`
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> &Row {
        &self.rows[index]
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> &[Row; MAX_GUESSES] {
        &self.rows
    }

    /// Write `letter` into the first empty cell of `row`
    ///
    /// Returns `false` if the row is already full.
    pub(crate) fn push_letter(&mut self, row: usize, letter: u8) -> bool {
        match self.rows[row].iter_mut().find(|cell| cell.is_none()) {
            Some(cell) => {
                *cell = Some(letter);
                true
            }
            None => false,
        }
    }

    /// Clear the last filled cell of `row`
    ///
    /// Returns `false` if the row is empty.
    pub(crate) fn pop_letter(&mut self, row: usize) -> bool {
        match self.rows[row].iter_mut().rev().find(|cell| cell.is_some()) {
            Some(cell) => {
                *cell = None;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(Option::is_some)
    }

    /// Letters typed so far in `row`, empty cells skipped
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.rows[row]
            .iter()
            .flatten()
            .map(|&b| char::from(b))
            .collect()
    }

    #[must_use]
    pub fn filled_in_row(&self, row: usize) -> usize {
        self.rows[row].iter().filter(|cell| cell.is_some()).count()
    }
}
