//! Float trait

use cast::From;
use num_traits::float;
use std::fmt::Debug;

/// The scalar types a [`Sample`](crate::stats::univariate::Sample) can hold.
///
/// Extends `num_traits::float::Float` with safe casting from counts and a lossless widening to
/// `f64`, which is the precision the t distribution is evaluated in.
pub trait Float:
    float::Float + From<usize, Output = Self> + From<f32, Output = Self> + Into<f64> + Debug
{
}

impl Float for f32 {}
impl Float for f64 {}
