use csv::Error as CsvError;
use serde_json::Error as SerdeError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong between reading the input and reporting the interval.
#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub enum Error {
    /// The input has no column with the requested name.
    MissingColumn {
        /// Name of the requested column.
        column: String,
        /// Header names found in the input.
        available: Vec<String>,
    },
    /// No usable observations were left after discarding missing values.
    EmptySample,
    /// Exactly one usable observation; the sample variance needs at least two.
    InsufficientData {
        /// Number of usable observations.
        len: usize,
    },
    /// The t distribution (or the sample moments feeding it) could not be evaluated.
    Computation(String),
    /// The confidence level is not in the open `(0, 1)` range.
    InvalidConfidenceLevel(f64),
    /// A file could not be opened, created or written.
    AccessError {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        inner: io::Error,
    },
    /// The input is not well-formed comma-separated data.
    CsvError(CsvError),
    /// A JSON message could not be serialized.
    SerdeError(SerdeError),
    /// The chart could not be drawn.
    Plot {
        /// Path of the chart being drawn.
        path: PathBuf,
        /// Message reported by the drawing backend.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingColumn { column, available } => write!(
                f,
                "The input must contain a column named '{}' (found: {})",
                column,
                available.join(", ")
            ),
            Error::EmptySample => write!(f, "No usable observations left after removing missing values"),
            Error::InsufficientData { len } => write!(
                f,
                "At least two observations are needed to estimate the standard deviation, got {}",
                len
            ),
            Error::Computation(msg) => write!(f, "Numerical failure: {}", msg),
            Error::InvalidConfidenceLevel(cl) => write!(
                f,
                "Confidence level must be strictly between 0 and 1, got {}",
                cl
            ),
            Error::AccessError { path, inner } => {
                write!(f, "Failed to access file {:?}: {}", path, inner)
            }
            Error::CsvError(inner) => write!(f, "Error reading CSV input: {}", inner),
            Error::SerdeError(inner) => write!(f, "Failed to serialize message: {}", inner),
            Error::Plot { path, message } => {
                write!(f, "Failed to draw chart {:?}: {}", path, message)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::AccessError { inner, .. } => Some(inner),
            Error::CsvError(inner) => Some(inner),
            Error::SerdeError(inner) => Some(inner),
            Error::MissingColumn { .. }
            | Error::EmptySample
            | Error::InsufficientData { .. }
            | Error::Computation(_)
            | Error::InvalidConfidenceLevel(_)
            | Error::Plot { .. } => None,
        }
    }
}

impl From<CsvError> for Error {
    fn from(other: CsvError) -> Error {
        Error::CsvError(other)
    }
}

impl From<SerdeError> for Error {
    fn from(other: SerdeError) -> Error {
        Error::SerdeError(other)
    }
}

/// Shorthand for `std::result::Result` with this crate's [`Error`].
pub type Result<T> = ::std::result::Result<T, Error>;

pub(crate) fn log_error(e: &Error) {
    error!("error: {}", e);
}
