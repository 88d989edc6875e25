//! Loading and saving grids as CSV.
//!
//! Every field is hydrated as text; nothing is inferred at load time. Rows
//! keep their own lengths in both directions and each field becomes exactly
//! one cell. A row with no cells is written as a single empty quoted field
//! (`""`), so it reads back as one empty cell.
//!
//! Blank lines are skipped by the `csv` reader and do not become rows.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::cell::CellValue;
use crate::error::Result;
use crate::grid::Grid;

pub fn read_grid<R: Read>(reader: R) -> Result<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(CellValue::from).collect());
    }
    Ok(Grid::from_rows(rows))
}

pub fn write_grid<W: Write>(grid: &Grid, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for cells in grid.rows() {
        wtr.write_record(cells.iter().map(CellValue::to_content))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let grid = read_grid(File::open(path)?)?;
    debug!(
        path = %path.display(),
        rows = grid.row_count(),
        width = grid.width(),
        "loaded csv"
    );
    Ok(grid)
}

pub fn save_csv(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_grid(grid, File::create(path)?)?;
    debug!(path = %path.display(), rows = grid.row_count(), "saved csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_keeps_fields_as_text() {
        let grid = read_grid("1,2.5,abc\n,x\n".as_bytes()).unwrap();
        assert_eq!(
            grid.rows(),
            &[
                vec![CellValue::text("1"), CellValue::text("2.5"), CellValue::text("abc")],
                vec![CellValue::Empty, CellValue::text("x")],
            ]
        );
    }

    #[test]
    fn test_read_quoted_fields() {
        let grid = read_grid("\"a,b\",\"line\nbreak\",\"say \"\"hi\"\"\"\n".as_bytes()).unwrap();
        assert_eq!(grid.get_cell(0, 0), &CellValue::text("a,b"));
        assert_eq!(grid.get_cell(0, 1), &CellValue::text("line\nbreak"));
        assert_eq!(grid.get_cell(0, 2), &CellValue::text("say \"hi\""));
    }

    #[test]
    fn test_write_ragged_rows_without_padding() {
        let mut grid = Grid::new();
        grid.set_cell(0, 0, 5.0);
        grid.set_cell(0, 1, "a b");
        grid.set_cell(0, 2, 0.25);
        grid.set_cell(1, 0, "x");
        grid.set_cell(3, 1, "y");

        let mut out = Vec::new();
        write_grid(&grid, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "5,a b,0.25\nx\n\"\"\n,y\n");
    }

    #[test]
    fn test_empty_row_reads_back_as_one_empty_cell() {
        let mut grid = Grid::new();
        grid.set_cell(2, 0, "z");

        let mut out = Vec::new();
        write_grid(&grid, &mut out).unwrap();
        let back = read_grid(out.as_slice()).unwrap();
        assert_eq!(back.row_count(), 3);
        assert_eq!(back.row(0).unwrap(), &[CellValue::Empty]);
        assert_eq!(back.row(1).unwrap(), &[CellValue::Empty]);
        assert_eq!(back.get_cell(2, 0), &CellValue::text("z"));
    }

    #[test]
    fn test_quoted_empty_field_is_one_cell() {
        let mut grid = read_grid("\"\"\n5\n3\n".as_bytes()).unwrap();
        assert_eq!(grid.row_len(0), 1);
        assert_eq!(grid.get_cell(0, 0), &CellValue::Empty);

        grid.sort_column(0).unwrap();
        assert_eq!(
            grid.rows(),
            &[
                vec![CellValue::Empty],
                vec![CellValue::text("3")],
                vec![CellValue::text("5")],
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let grid = read_grid("a\n\nb\n".as_bytes()).unwrap();
        assert_eq!(
            grid.rows(),
            &[vec![CellValue::text("a")], vec![CellValue::text("b")]]
        );
    }

    #[test]
    fn test_empty_input() {
        let grid = read_grid("".as_bytes()).unwrap();
        assert!(grid.is_empty());
    }
}
