//! Statistics over a single sample.
//!
//! [`univariate::Sample`] holds the observations and knows their moments,
//! [`univariate::students_t`] supplies the critical values the interval is built from.


pub mod univariate;

mod float;

pub use self::float::Float;

fn sum<A>(xs: &[A]) -> A
where
    A: Float,
{
    use std::ops::Add;

    xs.iter().cloned().fold(A::cast(0), Add::add)
}
