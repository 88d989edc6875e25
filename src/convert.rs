//! In-place conversion of a single cell between text and number.

use std::fmt;

use tracing::warn;

use crate::cell::CellValue;
use crate::grid::Grid;

/// A text cell that could not be read as a number. The cell is left as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub row: usize,
    pub col: usize,
    pub value: String,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert '{}' at ({}, {}) to a number",
            self.value, self.row, self.col
        )
    }
}

/// What a conversion did to its cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// The cell now holds this value.
    Converted(CellValue),
    /// Nothing to convert: the cell is empty or out of bounds.
    Skipped,
    Warning(ConversionWarning),
}

impl Grid {
    /// Replace the cell at (row, col) with its numeric form.
    ///
    /// Text that does not parse produces a [`Conversion::Warning`] and is
    /// kept unchanged.
    pub fn to_number(&mut self, row: usize, col: usize) -> Conversion {
        let cell = self.get_cell(row, col);
        match cell.parse_number() {
            Ok(None) => Conversion::Skipped,
            Ok(Some(n)) => {
                self.set_cell(row, col, n);
                Conversion::Converted(CellValue::Number(n))
            }
            Err(_) => {
                let warning = ConversionWarning {
                    row,
                    col,
                    value: cell.to_content(),
                };
                warn!("{}", warning);
                Conversion::Warning(warning)
            }
        }
    }

    /// Replace the cell at (row, col) with its textual form.
    pub fn to_text(&mut self, row: usize, col: usize) -> Conversion {
        let cell = self.get_cell(row, col);
        if cell.is_empty() {
            return Conversion::Skipped;
        }
        let text = CellValue::text(cell.to_content());
        self.set_cell(row, col, text.clone());
        Conversion::Converted(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number_converts_text() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, " 12.5 ");
        assert_eq!(grid.to_number(0, 0), Conversion::Converted(CellValue::Number(12.5)));
        assert_eq!(grid.get_cell(0, 0), &CellValue::Number(12.5));

        // Already numeric stays numeric.
        assert_eq!(grid.to_number(0, 0), Conversion::Converted(CellValue::Number(12.5)));
    }

    #[test]
    fn test_to_number_warns_on_text() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, "abc");
        let outcome = grid.to_number(0, 0);
        assert_eq!(
            outcome,
            Conversion::Warning(ConversionWarning {
                row: 0,
                col: 0,
                value: "abc".to_string(),
            })
        );
        assert_eq!(grid.get_cell(0, 0), &CellValue::text("abc"));
    }

    #[test]
    fn test_to_number_skips_empty_and_missing() {
        let mut grid = Grid::new();
        grid.set_cell(0, 1, "7");
        assert_eq!(grid.to_number(0, 0), Conversion::Skipped);
        assert_eq!(grid.to_number(4, 4), Conversion::Skipped);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.row_len(0), 2);
    }

    #[test]
    fn test_to_text() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 15.0);
        grid.set_cell(0, 1, 0.5);
        grid.set_cell(0, 2, "kept");

        assert_eq!(grid.to_text(0, 0), Conversion::Converted(CellValue::text("15")));
        assert_eq!(grid.to_text(0, 1), Conversion::Converted(CellValue::text("0.5")));
        assert_eq!(grid.to_text(0, 2), Conversion::Converted(CellValue::text("kept")));
        assert_eq!(grid.get_cell(0, 0), &CellValue::text("15"));
    }

    #[test]
    fn test_to_text_skips_missing_without_growth() {
        let mut grid = Grid::new();
        assert_eq!(grid.to_text(2, 2), Conversion::Skipped);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_conversions_round_trip() {
        let mut grid = Grid::new();
        grid.set_cell(1, 1, "-3.25");
        grid.to_number(1, 1);
        grid.to_text(1, 1);
        assert_eq!(grid.get_cell(1, 1), &CellValue::text("-3.25"));
    }
}
