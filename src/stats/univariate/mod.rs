//! Univariate analysis

mod sample;

pub mod students_t;

pub use self::sample::Sample;
