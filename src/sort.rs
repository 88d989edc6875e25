//! Ascending numeric sorts of a single row or column.
//!
//! Empty cells sort as negative infinity, so they come first. Keys are
//! computed for every cell before anything moves; a non-numeric cell aborts
//! the sort with the grid unchanged. Zero and negative zero are the same key.

use tracing::debug;

use crate::cell::CellValue;
use crate::error::{GridError, Result};
use crate::grid::Grid;

fn sort_key(cell: &CellValue, row: usize, col: usize) -> Result<f64> {
    match cell.parse_number() {
        // -0.0 orders before 0.0 under total_cmp.
        Ok(Some(n)) if n == 0.0 => Ok(0.0),
        Ok(Some(n)) => Ok(n),
        Ok(None) => Ok(f64::NEG_INFINITY),
        Err(_) => Err(GridError::Conversion {
            row,
            col,
            value: cell.to_content(),
        }),
    }
}

// Stable sort of `cells` by their numeric keys.
fn sorted_by_key(
    cells: Vec<CellValue>,
    coordinate: impl Fn(usize) -> (usize, usize),
) -> Result<Vec<CellValue>> {
    let mut keyed = cells
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let (row, col) = coordinate(i);
            sort_key(&cell, row, col).map(|key| (key, cell))
        })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, cell)| cell).collect())
}

impl Grid {
    /// Sort the cells of one row. A missing row is left alone.
    pub fn sort_row(&mut self, row: usize) -> Result<()> {
        let Some(cells) = self.row(row) else {
            return Ok(());
        };
        let sorted = sorted_by_key(cells.to_vec(), |col| (row, col))?;
        debug!(row, len = sorted.len(), "sorted row");
        self.rows_mut()[row] = sorted;
        Ok(())
    }

    /// Sort one column across all rows.
    ///
    /// Rows too short to hold the column are read as empty cells while
    /// sorting, but are never written: sorted value `i` lands in row `i` only
    /// when that row already reaches the column. Nothing happens when the
    /// first row is shorter than `col + 1`.
    pub fn sort_column(&mut self, col: usize) -> Result<()> {
        if self.row_len(0) <= col {
            return Ok(());
        }
        let column = self
            .rows()
            .iter()
            .map(|cells| cells.get(col).cloned().unwrap_or_default())
            .collect::<Vec<_>>();
        let sorted = sorted_by_key(column, |row| (row, col))?;

        let mut written = 0;
        for (cells, value) in self.rows_mut().iter_mut().zip(sorted) {
            if let Some(slot) = cells.get_mut(col) {
                *slot = value;
                written += 1;
            }
        }
        debug!(col, written, "sorted column");
        Ok(())
    }
}
