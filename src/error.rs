use thiserror::Error;

/// Errors surfaced by grid operations and the CSV codec.
#[derive(Debug, Error)]
pub enum GridError {
    /// A present cell could not be read as a number during an aggregate or a sort.
    #[error("cannot convert '{value}' at ({row}, {col}) to a number")]
    Conversion { row: usize, col: usize, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
