use crate::error::{Error, Result};
use crate::stats::univariate::students_t::StudentsT;
use crate::stats::univariate::Sample;

/// Range expected to contain the population mean with the stated probability
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct ConfidenceInterval {
    /// Probability the interval was built for, in `(0, 1)`
    pub confidence_level: f64,
    /// Inclusive lower end
    pub lower_bound: f64,
    /// Inclusive upper end
    pub upper_bound: f64,
}

impl ConfidenceInterval {
    /// Whether `value` lies inside the interval, both ends included
    pub fn contains(&self, value: f64) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    /// Distance between the two ends
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }
}

/// Descriptive statistics and the t confidence interval of the mean of one sample
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Bessel-corrected sample standard deviation
    pub std_dev: f64,
    /// Number of observations
    pub sample_size: usize,
    /// Student's t quantile at `(1 + confidence_level) / 2` with `sample_size - 1` degrees of
    /// freedom
    pub t_critical: f64,
    /// Interval around `mean`
    pub confidence_interval: ConfidenceInterval,
}

impl Summary {
    /// Standard error of the mean, `std_dev / sqrt(n)`
    pub fn std_err(&self) -> f64 {
        self.std_dev / (self.sample_size as f64).sqrt()
    }

    /// Half-width of the confidence interval
    pub fn margin_of_error(&self) -> f64 {
        self.t_critical * self.std_err()
    }

    /// Degrees of freedom of the t distribution the interval came from, zero for an empty sample
    pub fn degrees_of_freedom(&self) -> usize {
        self.sample_size.saturating_sub(1)
    }
}

/// Computes the mean, standard deviation and Student's t confidence interval of `sample`
///
/// - Time: `O(length)`
///
/// # Errors
///
/// - [`Error::EmptySample`] if `sample` is empty
/// - [`Error::InsufficientData`] if `sample` has a single observation
/// - [`Error::InvalidConfidenceLevel`] if `confidence_level` is not in the open `(0, 1)` range,
///   or is so small (below about `1.1e-16`) that `(1 + confidence_level) / 2` rounds to `0.5`
/// - [`Error::Computation`] if an observation is not finite, the moments overflow, or the t
///   quantile cannot be evaluated
pub fn compute_summary(sample: &[f64], confidence_level: f64) -> Result<Summary> {
    match sample.len() {
        0 => return Err(Error::EmptySample),
        1 => return Err(Error::InsufficientData { len: 1 }),
        _ => {}
    }

    let p = (1. + confidence_level) / 2.;
    if !(confidence_level > 0. && confidence_level < 1. && p > 0.5) {
        return Err(Error::InvalidConfidenceLevel(confidence_level));
    }

    let sample = Sample::new(sample)?;
    let n = sample.len();
    let mean = sample.mean();
    let std_dev = sample
        .std_dev(Some(mean))
        .ok_or(Error::InsufficientData { len: n })?;

    if !mean.is_finite() || !std_dev.is_finite() {
        return Err(Error::Computation(format!(
            "sample moments overflow (mean = {}, standard deviation = {})",
            mean, std_dev
        )));
    }

    let t_critical = StudentsT::new((n - 1) as f64)?.quantile(p)?;
    let margin_of_error = t_critical * (std_dev / (n as f64).sqrt());

    info!(
        "n = {}, mean = {}, std dev = {}, t({}, {}) = {}",
        n,
        mean,
        std_dev,
        p,
        n - 1,
        t_critical
    );

    Ok(Summary {
        mean,
        std_dev,
        sample_size: n,
        t_critical,
        confidence_interval: ConfidenceInterval {
            confidence_level,
            lower_bound: mean - margin_of_error,
            upper_bound: mean + margin_of_error,
        },
    })
}

/// Whether `reference_value` lies inside the confidence interval of `summary`, both ends
/// included. A `NaN` reference is never inside.
pub fn is_within_interval(summary: &Summary, reference_value: f64) -> bool {
    summary.confidence_interval.contains(reference_value)
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use quickcheck::{quickcheck, TestResult};

    use super::{compute_summary, is_within_interval};
    use crate::error::Error;

    #[test]
    fn one_to_five_at_ninety_percent() {
        let summary = compute_summary(&[1., 2., 3., 4., 5.], 0.90).unwrap();
        let ci = summary.confidence_interval;

        assert_eq!(summary.mean, 3.);
        assert_eq!(summary.sample_size, 5);
        assert_eq!(summary.degrees_of_freedom(), 4);
        assert_relative_eq!(summary.std_dev, 1.581_138_830_084, max_relative = 1e-12);
        assert_relative_eq!(summary.t_critical, 2.131_846_786_327, max_relative = 1e-9);
        assert_relative_eq!(summary.margin_of_error(), 1.507_443_319_062, max_relative = 1e-9);
        assert_relative_eq!(ci.lower_bound, 1.492_556_680_938, max_relative = 1e-9);
        assert_relative_eq!(ci.upper_bound, 4.507_443_319_062, max_relative = 1e-9);
        assert_eq!(ci.confidence_level, 0.90);
        assert!(is_within_interval(&summary, 2.));
        assert!(!is_within_interval(&summary, 1.));
    }

    #[test]
    fn constant_sample_collapses_the_interval() {
        let summary = compute_summary(&[2., 2., 2.], 0.90).unwrap();
        let ci = summary.confidence_interval;

        assert_eq!(summary.mean, 2.);
        assert_eq!(summary.std_dev, 0.);
        assert_eq!((ci.lower_bound, ci.upper_bound), (2., 2.));
        assert_eq!(ci.width(), 0.);
        assert!(is_within_interval(&summary, 2.));
        assert!(!is_within_interval(&summary, 2.000_001));
    }

    #[test]
    fn too_few_observations() {
        assert!(matches!(compute_summary(&[], 0.9), Err(Error::EmptySample)));
        assert!(matches!(
            compute_summary(&[3.5], 0.9),
            Err(Error::InsufficientData { len: 1 })
        ));
    }

    #[test]
    fn confidence_level_out_of_range() {
        for &cl in &[0., 1., -0.5, 1.5, f64::NAN, 1e-17, f64::MIN_POSITIVE] {
            match compute_summary(&[1., 2., 3.], cl) {
                Err(Error::InvalidConfidenceLevel(got)) => {
                    assert!((got.is_nan() && cl.is_nan()) || got == cl)
                }
                other => panic!("expected InvalidConfidenceLevel for {}, got {:?}", cl, other),
            }
        }
    }

    #[test]
    fn non_finite_inputs() {
        assert!(matches!(
            compute_summary(&[1., f64::NAN, 3.], 0.9),
            Err(Error::Computation(_))
        ));
        assert!(matches!(
            compute_summary(&[1., f64::NEG_INFINITY], 0.9),
            Err(Error::Computation(_))
        ));
        // Finite observations whose sum overflows
        assert!(matches!(
            compute_summary(&[f64::MAX, f64::MAX], 0.9),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn small_levels_still_widen() {
        let data = [1., 2., 3., 4., 5.];
        let tiny = compute_summary(&data, 1e-6).unwrap().confidence_interval;
        let small = compute_summary(&data, 1e-3).unwrap().confidence_interval;

        assert!(tiny.width() > 0.);
        assert!(small.width() > tiny.width());
    }

    #[test]
    fn degrees_of_freedom_of_a_hand_built_summary() {
        let mut summary = compute_summary(&[1., 2., 3.], 0.9).unwrap();
        assert_eq!(summary.degrees_of_freedom(), 2);

        summary.sample_size = 0;
        assert_eq!(summary.degrees_of_freedom(), 0);
    }

    #[test]
    fn nan_reference_is_outside() {
        let summary = compute_summary(&[1., 2., 3.], 0.9).unwrap();

        assert!(!is_within_interval(&summary, f64::NAN));
    }

    quickcheck! {
        fn bounds_contain_mean(size: u8, start: u8, offset: i16) -> TestResult {
            let size = size as usize;
            let start = start as usize;
            if let Some(v) = crate::stats::test::spread_vec(size, start, f64::from(offset), 10.) {
                let summary = compute_summary(&v[start..], 0.9).unwrap();
                let ci = summary.confidence_interval;

                TestResult::from_bool(
                    ci.lower_bound <= summary.mean && summary.mean <= ci.upper_bound
                )
            } else {
                TestResult::discard()
            }
        }
    }

    quickcheck! {
        fn higher_confidence_widens(size: u8, start: u8, a: u8, b: u8) -> TestResult {
            let size = size as usize;
            let start = start as usize;
            if a == b {
                return TestResult::discard();
            }

            if let Some(v) = crate::stats::test::spread_vec(size, start, 0., 10.) {
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                let cl_lo = (f64::from(lo) + 1.) / 258.;
                let cl_hi = (f64::from(hi) + 1.) / 258.;

                let narrow = compute_summary(&v[start..], cl_lo).unwrap().confidence_interval;
                let wide = compute_summary(&v[start..], cl_hi).unwrap().confidence_interval;

                TestResult::from_bool(
                    wide.lower_bound < narrow.lower_bound && narrow.upper_bound < wide.upper_bound
                )
            } else {
                TestResult::discard()
            }
        }
    }

    quickcheck! {
        fn bounds_are_inclusive(size: u8, start: u8) -> TestResult {
            let size = size as usize;
            let start = start as usize;
            if let Some(v) = crate::stats::test::spread_vec(size, start, 0., 4.) {
                let summary = compute_summary(&v[start..], 0.9).unwrap();
                let ci = summary.confidence_interval;

                TestResult::from_bool(
                    is_within_interval(&summary, ci.lower_bound)
                        && is_within_interval(&summary, ci.upper_bound)
                        && is_within_interval(&summary, summary.mean)
                )
            } else {
                TestResult::discard()
            }
        }
    }

    quickcheck! {
        fn idempotent(size: u8, start: u8) -> TestResult {
            let size = size as usize;
            let start = start as usize;
            if let Some(v) = crate::stats::test::spread_vec(size, start, -5., 10.) {
                let first = compute_summary(&v[start..], 0.9).unwrap();
                let second = compute_summary(&v[start..], 0.9).unwrap();

                TestResult::from_bool(
                    first.mean.to_bits() == second.mean.to_bits()
                        && first.std_dev.to_bits() == second.std_dev.to_bits()
                        && first == second
                )
            } else {
                TestResult::discard()
            }
        }
    }
}
