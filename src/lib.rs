//! An in-memory, ragged spreadsheet grid backed by CSV files.
//!
//! The [`Grid`] owns every cell. It offers coordinate access that grows on
//! write, aggregates over rectangular [`Range`]s, numeric row and column
//! sorts, and per-cell conversion between text and numbers.

pub mod cell;
pub mod convert;
pub mod csv_io;
pub mod error;
pub mod grid;
pub mod logging;
pub mod range;
pub mod script;
pub mod sort;

pub use cell::{CellValue, cell_name, column_name, parse_cell_name};
pub use convert::{Conversion, ConversionWarning};
pub use csv_io::{load_csv, read_grid, save_csv, write_grid};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use logging::init_logging;
pub use range::Range;
pub use script::{DemoReport, run_demo};
