/// Error types for reading USGS NWIS station files
use thiserror::Error;

/// Failure to turn a station file into a discharge series.
///
/// Any of these is fatal for the file being read.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Reading the file (or decompressing it) failed
    #[error("Failed to read station file: {0}")]
    Io(#[from] std::io::Error),

    /// The file holds no header line
    #[error("Station file has no header line")]
    MissingHeader,

    /// A data line does not have the expected column layout
    #[error("Line {line}: expected 4 or 5 columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    /// The date column could not be parsed
    #[error("Line {line}: failed to parse date '{value}'")]
    InvalidDate { line: usize, value: String },
}

/// Type alias for Results using ParseError
pub type Result<T> = std::result::Result<T, ParseError>;
