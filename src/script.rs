//! A fixed scripted session over a CSV file, used as a smoke test of every
//! grid operation.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::convert::Conversion;
use crate::csv_io::{load_csv, save_csv};
use crate::error::Result;
use crate::range::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub initial: String,
    pub sum: f64,
    pub average: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub conversions: Vec<Conversion>,
    pub modified: String,
}

fn show(value: Option<f64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial spreadsheet:")?;
        writeln!(f, "{}", self.initial)?;
        writeln!(f, "Sum: {}", self.sum)?;
        writeln!(f, "Average: {}", self.average)?;
        writeln!(f, "Min: {}", show(self.min))?;
        writeln!(f, "Max: {}", show(self.max))?;
        for conversion in &self.conversions {
            if let Conversion::Warning(warning) = conversion {
                writeln!(f, "Warning: {}", warning)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Modified spreadsheet:")?;
        write!(f, "{}", self.modified)
    }
}

/// Load `input`, fill a 2x3 block of numbers, aggregate over A1:B2, sort
/// row 0 and column 1, convert two cells, then write the result to `output`.
pub fn run_demo(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<DemoReport> {
    let mut grid = load_csv(input)?;

    grid.set_cell(0, 0, 5.0);
    grid.set_cell(0, 1, 10.0);
    grid.set_cell(0, 2, 15.0);
    grid.set_cell(1, 0, 20.0);
    grid.set_cell(1, 1, 25.0);
    let initial = grid.to_string();

    let range = Range::new((0, 0), (1, 1));
    let sum = grid.sum(&range)?;
    let average = grid.average(&range)?;
    let min = grid.min(&range)?;
    let max = grid.max(&range)?;

    grid.sort_row(0)?;
    grid.sort_column(1)?;

    let conversions = vec![grid.to_number(0, 0), grid.to_text(0, 1)];
    let modified = grid.to_string();

    save_csv(&grid, output.as_ref())?;
    info!(output = %output.as_ref().display(), "demo script completed");

    Ok(DemoReport {
        initial,
        sum,
        average,
        min,
        max,
        conversions,
        modified,
    })
}
