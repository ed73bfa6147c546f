//! Confidence intervals for the mean of a single sample column.
//!
//! `confint` reads one numeric column out of comma-separated data, estimates the population mean
//! with a Student's t confidence interval, and reports whether a reference value falls inside the
//! interval. The statistical core ([`compute_summary`] and [`is_within_interval`]) is a pair of
//! pure functions; everything else in the crate is presentation (CSV input, terminal report,
//! SVG chart) wired together by [`Analysis`].
//!
//! ```
//! use confint::{compute_summary, is_within_interval};
//!
//! let summary = compute_summary(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.90).unwrap();
//! assert_eq!(summary.mean, 3.0);
//! assert!(is_within_interval(&summary, 2.0));
//! ```

#![warn(missing_docs)]
#![warn(bare_trait_objects)]

#[cfg(test)]
extern crate approx;

#[cfg(test)]
extern crate quickcheck;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

// Needs to be declared before other modules
// in order to be usable there.
#[macro_use]
mod macros_private;

mod analysis;
mod csv_input;
mod error;
mod estimate;
mod format;
mod fs;
mod plot;
mod report;

pub mod stats;

pub use crate::analysis::{Analysis, Outcome, PlotConfiguration};
pub use crate::csv_input::{read_column, read_column_from_path, Column};
pub use crate::error::{Error, Result};
pub use crate::estimate::{compute_summary, is_within_interval, ConfidenceInterval, Summary};
pub use crate::report::{CliReport, CliVerbosity, MessageFormat};

lazy_static! {
    static ref DEBUG_ENABLED: bool = std::env::var_os("CONFINT_DEBUG").is_some();
}

fn debug_enabled() -> bool {
    *DEBUG_ENABLED
}

/// The column analyzed when none is configured.
pub const DEFAULT_COLUMN: &str = "study_hours";

/// The confidence level used when none is configured.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.90;

/// The reference value compared against the interval when none is configured.
pub const DEFAULT_REFERENCE_VALUE: f64 = 2.0;
