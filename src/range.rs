//! Rectangular ranges and the aggregates computed over them.

use std::fmt;

use crate::cell::{cell_name, parse_cell_name};
use crate::error::{GridError, Result};
use crate::grid::Grid;

/// An inclusive rectangle from `start` to `end`, each a (row, col) pair.
///
/// A range whose end precedes its start in either dimension covers no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl Range {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Range { start, end }
    }

    pub fn cell(row: usize, col: usize) -> Self {
        Range::new((row, col), (row, col))
    }

    /// Parse `A1:B2`, or a single name such as `C3` for a one-cell range.
    pub fn parse(text: &str) -> Option<Self> {
        match text.split_once(':') {
            Some((from, to)) => Some(Range::new(parse_cell_name(from)?, parse_cell_name(to)?)),
            None => parse_cell_name(text).map(|(r, c)| Range::cell(r, c)),
        }
    }

    /// Number of cells spanned by the rectangle's dimensions. May be zero or
    /// negative for a malformed range.
    pub fn cell_count(&self) -> i64 {
        let rows = self.end.0 as i64 - self.start.0 as i64 + 1;
        let cols = self.end.1 as i64 - self.start.1 as i64 + 1;
        rows * cols
    }

    /// Coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.start.0..=self.end.0)
            .flat_map(move |row| (self.start.1..=self.end.1).map(move |col| (row, col)))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            cell_name(self.start.0, self.start.1),
            cell_name(self.end.0, self.end.1)
        )
    }
}

impl Grid {
    /// Numeric values of every non-empty cell in `range`, row-major.
    ///
    /// Fails on the first present cell that is not numeric.
    pub fn range_values(&self, range: &Range) -> Result<Vec<f64>> {
        let mut values = Vec::new();
        for (row, col) in range.coordinates() {
            let cell = self.get_cell(row, col);
            match cell.parse_number() {
                Ok(Some(n)) => values.push(n),
                Ok(None) => {}
                Err(_) => {
                    return Err(GridError::Conversion {
                        row,
                        col,
                        value: cell.to_content(),
                    });
                }
            }
        }
        Ok(values)
    }

    pub fn sum(&self, range: &Range) -> Result<f64> {
        Ok(self.range_values(range)?.into_iter().sum())
    }

    /// Sum divided by the full rectangle's cell count, empty cells included.
    /// Returns 0 when the rectangle has no cells.
    pub fn average(&self, range: &Range) -> Result<f64> {
        let total = self.sum(range)?;
        let count = range.cell_count();
        if count > 0 {
            Ok(total / count as f64)
        } else {
            Ok(0.0)
        }
    }

    pub fn min(&self, range: &Range) -> Result<Option<f64>> {
        Ok(self.range_values(range)?.into_iter().reduce(f64::min))
    }

    pub fn max(&self, range: &Range) -> Result<Option<f64>> {
        Ok(self.range_values(range)?.into_iter().reduce(f64::max))
    }
}
