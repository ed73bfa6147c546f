use std::{mem, ops};

use crate::error::{Error, Result};
use crate::stats::float::Float;

/// A collection of data points drawn from a population
///
/// Invariants:
///
/// - The sample contains at least 1 data point
/// - Every data point is finite
#[repr(transparent)]
pub struct Sample<A>([A]);

impl<A> Sample<A>
where
    A: Float,
{
    /// Creates a new sample from an existing slice
    ///
    /// # Errors
    ///
    /// [`Error::EmptySample`] if `slice` is empty, [`Error::Computation`] if it contains a `NaN`
    /// or an infinity.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(slice: &[A]) -> Result<&Sample<A>> {
        if slice.is_empty() {
            return Err(Error::EmptySample);
        }
        if let Some((i, x)) = slice.iter().enumerate().find(|(_, x)| !x.is_finite()) {
            return Err(Error::Computation(format!(
                "observation #{} is not a finite number ({:?})",
                i + 1,
                x
            )));
        }

        // Sound because `Sample` is `repr(transparent)` over `[A]`
        Ok(unsafe { mem::transmute(slice) })
    }

    /// Returns the biggest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn max(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&head) => elems.fold(head, |a, &b| a.max(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the arithmetic average of the sample
    ///
    /// - Time: `O(length)`
    pub fn mean(&self) -> A {
        let n = self.len();

        self.sum() / A::cast(n)
    }

    /// Returns the smallest element in the sample
    ///
    /// - Time: `O(length)`
    pub fn min(&self) -> A {
        let mut elems = self.iter();

        match elems.next() {
            Some(&elem) => elems.fold(elem, |a, &b| a.min(b)),
            // NB `unreachable!` because `Sample` is guaranteed to have at least one data point
            None => unreachable!(),
        }
    }

    /// Returns the sample standard deviation, or `None` for a single data point
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(length)`
    pub fn std_dev(&self, mean: Option<A>) -> Option<A> {
        self.var(mean).map(|var| var.sqrt())
    }

    /// Returns the standard error of the mean (`std_dev / sqrt(n)`), or `None` for a single
    /// data point
    ///
    /// - Time: `O(length)`
    pub fn std_err(&self, mean: Option<A>) -> Option<A> {
        let n = A::cast(self.len());

        self.std_dev(mean).map(|s| s / n.sqrt())
    }

    /// Returns the sum of all the elements of the sample
    ///
    /// - Time: `O(length)`
    pub fn sum(&self) -> A {
        crate::stats::sum(self)
    }

    /// Returns the unbiased (Bessel-corrected) variance of the sample, or `None` for a single
    /// data point
    ///
    /// The `mean` can be optionally passed along to speed up (2X) the computation
    ///
    /// - Time: `O(length)`
    pub fn var(&self, mean: Option<A>) -> Option<A> {
        use std::ops::Add;

        if self.len() < 2 {
            return None;
        }

        let mean = mean.unwrap_or_else(|| self.mean());
        let slice = self;

        let sum = slice
            .iter()
            .map(|&x| (x - mean).powi(2))
            .fold(A::cast(0), Add::add);

        Some(sum / A::cast(slice.len() - 1))
    }
}

impl<A> ops::Deref for Sample<A> {
    type Target = [A];

    fn deref(&self) -> &[A] {
        &self.0
    }
}

#[cfg(test)]
macro_rules! test {
    ($ty:ident) => {
        mod $ty {
            use approx::relative_eq;
            use quickcheck::quickcheck;
            use quickcheck::TestResult;

            use crate::error::Error;
            use crate::stats::univariate::Sample;

            quickcheck! {
                fn mean_is_bounded(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();
                        let mean = sample.mean();
                        let (min, max) = (sample.min(), sample.max());

                        TestResult::from_bool(
                            (mean > min || relative_eq!(mean, min)) &&
                            (mean < max || relative_eq!(mean, max))
                        )
                    } else {
                        TestResult::discard()
                    }
                }
            }

            quickcheck! {
                fn var_is_non_negative(size: u8, start: u8) -> TestResult {
                    let size = size as usize;
                    let start = start as usize;
                    if let Some(v) = crate::stats::test::vec::<$ty>(size, start) {
                        let sample = Sample::new(&v[start..]).unwrap();

                        TestResult::from_bool(sample.var(None).unwrap() >= 0.)
                    } else {
                        TestResult::discard()
                    }
                }
            }

            #[test]
            fn bessel_correction() {
                let v: [$ty; 5] = [1., 2., 3., 4., 5.];
                let sample = Sample::new(&v[..]).unwrap();

                assert_eq!(sample.mean(), 3.);
                // Sum of squared deviations is 10, divided by n - 1
                assert!(relative_eq!(sample.var(None).unwrap(), 2.5));
                assert!(relative_eq!(sample.std_dev(Some(3.)).unwrap(), (2.5 as $ty).sqrt()));
                assert!(relative_eq!(sample.std_err(None).unwrap(), (2.5 as $ty).sqrt() / (5 as $ty).sqrt()));
            }

            #[test]
            fn single_point_has_no_dispersion() {
                let v: [$ty; 1] = [4.];
                let sample = Sample::new(&v[..]).unwrap();

                assert_eq!(sample.mean(), 4.);
                assert_eq!(sample.min(), 4.);
                assert_eq!(sample.max(), 4.);
                assert!(sample.var(None).is_none());
                assert!(sample.std_dev(None).is_none());
                assert!(sample.std_err(None).is_none());
            }

            #[test]
            fn rejects_empty() {
                let v: [$ty; 0] = [];
                assert!(matches!(Sample::new(&v[..]), Err(Error::EmptySample)));
            }

            #[test]
            fn rejects_non_finite() {
                let nan: [$ty; 3] = [1., $ty::NAN, 3.];
                let inf: [$ty; 2] = [$ty::INFINITY, 1.];

                assert!(matches!(Sample::new(&nan[..]), Err(Error::Computation(_))));
                assert!(matches!(Sample::new(&inf[..]), Err(Error::Computation(_))));
            }
        }
    };
}
