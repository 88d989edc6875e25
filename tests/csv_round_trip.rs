use cellgrid::{CellValue, Grid, Range, load_csv, save_csv};
use tempfile::tempdir;

#[test]
fn test_round_trip_preserves_text_and_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sheet.csv");

    let mut grid = Grid::new();
    grid.set_cell(0, 0, "name");
    grid.set_cell(0, 1, "has, comma");
    grid.set_cell(0, 2, "quote \"q\"");
    grid.set_cell(1, 0, 12.5);
    grid.set_cell(1, 3, "far");
    grid.set_cell(2, 1, "multi\nline");
    save_csv(&grid, &path).unwrap();

    let loaded = load_csv(&path).unwrap();
    assert_eq!(loaded.row_count(), grid.row_count());
    for (r, cells) in grid.rows().iter().enumerate() {
        assert_eq!(loaded.row_len(r), cells.len());
        for (c, cell) in cells.iter().enumerate() {
            // Numbers come back as their text form.
            assert_eq!(loaded.get_cell(r, c).to_content(), cell.to_content());
        }
    }
    assert_eq!(loaded.get_cell(1, 0), &CellValue::text("12.5"));
}

#[test]
fn test_loaded_text_aggregates_after_conversion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.csv");
    std::fs::write(&path, "5,10,15\n20,25\n").unwrap();

    let mut grid = load_csv(&path).unwrap();
    assert_eq!(grid.get_cell(0, 0), &CellValue::text("5"));

    let range = Range::new((0, 0), (1, 1));
    assert_eq!(grid.sum(&range).unwrap(), 60.0);
    assert_eq!(grid.average(&range).unwrap(), 15.0);
    assert_eq!(grid.min(&range).unwrap(), Some(5.0));
    assert_eq!(grid.max(&range).unwrap(), Some(25.0));

    grid.to_number(1, 1);
    assert_eq!(grid.get_cell(1, 1), &CellValue::Number(25.0));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = load_csv(dir.path().join("missing.csv"));
    assert!(matches!(result, Err(cellgrid::GridError::Io(_))));
}
