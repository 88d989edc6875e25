//! The ragged cell store and its coordinate accessors.
//!
//! Rows are independently sized. Reads outside the stored rows yield
//! [`CellValue::Empty`]; writes outside them grow the grid first.

use std::fmt;

use tracing::debug;

use crate::cell::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Grid { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<CellValue>] {
        &mut self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the given row, or 0 when the row does not exist.
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Vec::len)
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Store `value` at (row, col), appending empty rows and empty cells as
    /// needed. Existing cells are never moved or truncated.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<CellValue>) {
        if row >= self.rows.len() {
            debug!(from = self.rows.len(), to = row + 1, "growing grid rows");
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if col >= cells.len() {
            debug!(row, from = cells.len(), to = col + 1, "growing row");
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value.into();
    }

    /// The value at (row, col), or `Empty` when the coordinate is out of bounds.
    pub fn get_cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, cells) in self.rows.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in cells.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_get_cell_out_of_bounds_is_empty() {
        let mut grid = Grid::new();
        assert_eq!(grid.get_cell(0, 0), &CellValue::Empty);
        assert_eq!(grid.get_cell(100, 3), &CellValue::Empty);

        grid.set_cell(1, 1, 7.0);
        assert_eq!(grid.get_cell(0, 0), &CellValue::Empty);
        assert_eq!(grid.get_cell(1, 2), &CellValue::Empty);
        assert_eq!(grid.get_cell(2, 0), &CellValue::Empty);
    }

    #[test]
    fn test_set_cell_grows_rows_and_columns() {
        let mut grid = Grid::new();
        grid.set_cell(2, 3, "x");

        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.row_len(0), 0);
        assert_eq!(grid.row_len(1), 0);
        assert_eq!(grid.row_len(2), 4);
        assert_eq!(
            &grid.row(2).unwrap()[..3],
            &[CellValue::Empty, CellValue::Empty, CellValue::Empty]
        );
        assert_eq!(grid.get_cell(2, 3), &CellValue::text("x"));
        assert_eq!(grid.width(), 4);
    }

    #[test]
    fn test_set_cell_overwrites_in_place() {
        let mut grid = Grid::from_rows(vec![vec![CellValue::text("a"), CellValue::text("b")]]);
        grid.set_cell(0, 0, 1.5);
        assert_eq!(grid.row(0).unwrap(), &[CellValue::Number(1.5), CellValue::text("b")]);
    }

    #[test]
    fn test_display_joins_cells_with_spaces() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 5.0);
        grid.set_cell(0, 2, "abc");
        grid.set_cell(1, 0, 2.5);
        assert_eq!(grid.to_string(), "5  abc\n2.5");
    }

    proptest! {
        #[test]
        fn prop_set_then_get(row in 0usize..40, col in 0usize..40, value in -1.0e9f64..1.0e9) {
            let mut grid = Grid::new();
            grid.set_cell(row, col, value);
            prop_assert_eq!(grid.get_cell(row, col), &CellValue::Number(value));
        }

        #[test]
        fn prop_growth_preserves_other_cells(
            writes in prop::collection::vec((0usize..20, 0usize..20, -1000i32..1000), 1..30)
        ) {
            let mut grid = Grid::new();
            let mut expected = std::collections::HashMap::new();
            for (row, col, value) in writes {
                grid.set_cell(row, col, f64::from(value));
                expected.insert((row, col), f64::from(value));
                for (&(r, c), &v) in &expected {
                    prop_assert_eq!(grid.get_cell(r, c), &CellValue::Number(v));
                }
            }
        }

        #[test]
        fn prop_reads_past_bounds_are_empty(row in 0usize..10, col in 0usize..10, extra in 1usize..50) {
            let mut grid = Grid::new();
            grid.set_cell(row, col, "v");
            prop_assert_eq!(grid.get_cell(row + extra, 0), &CellValue::Empty);
            prop_assert_eq!(grid.get_cell(row, col + extra), &CellValue::Empty);
        }
    }
}
