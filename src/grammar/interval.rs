//! Confidence interval estimators backing the interval statistics.
//!
//! Both estimators take raw `f64` samples and a confidence level in (0, 1)
//! and return an ordered `(lo, hi)` pair.

use statrs::distribution::{Binomial, ContinuousCDF, DiscreteCDF, StudentsT};
use statrs::statistics::Statistics;

use crate::error::{Error, Result};

/// Estimator of a two-sided confidence interval.
pub trait IntervalEstimator {
    /// Confidence level in (0, 1).
    fn level(&self) -> f64;

    /// Interval for `samples`. Empty input yields `(NaN, NaN)`.
    fn interval(&self, samples: &[f64]) -> (f64, f64);
}

fn check_level(level: f64) -> Result<f64> {
    if level > 0.0 && level < 1.0 {
        Ok(level)
    } else {
        Err(Error::InvalidConfidence(level))
    }
}

/// Normal-theory interval for the mean: `mean ± t · s / √n`.
///
/// `t` is the `(1 + level) / 2` quantile of Student's t with `n - 1`
/// degrees of freedom and `s` the sample standard deviation. A single
/// sample gives the degenerate interval `(x, x)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalTheory {
    level: f64,
}

impl NormalTheory {
    /// Create an estimator for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfidence`] unless `0 < level < 1`.
    pub fn new(level: f64) -> Result<Self> {
        Ok(Self { level: check_level(level)? })
    }
}

impl IntervalEstimator for NormalTheory {
    fn level(&self) -> f64 {
        self.level
    }

    fn interval(&self, samples: &[f64]) -> (f64, f64) {
        match samples.len() {
            0 => (f64::NAN, f64::NAN),
            1 => (samples[0], samples[0]),
            n => {
                let mean = samples.mean();
                let sd = samples.std_dev();
                let Ok(dist) = StudentsT::new(0.0, 1.0, (n - 1) as f64) else {
                    return (f64::NAN, f64::NAN);
                };
                let t = dist.inverse_cdf((1.0 + self.level) / 2.0);
                let half = t * sd / (n as f64).sqrt();
                (mean - half, mean + half)
            }
        }
    }
}

/// Distribution-free interval for the median from order statistics.
///
/// Picks the innermost symmetric pair `[x_(k), x_(n-k+1)]` of the sorted
/// sample whose coverage `1 - 2·P(B ≤ k-1)`, `B ~ Binomial(n, ½)`, still
/// reaches the level. Falls back to `[min, max]` when even `k = 1` falls
/// short.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionFree {
    level: f64,
}

impl DistributionFree {
    /// Create an estimator for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfidence`] unless `0 < level < 1`.
    pub fn new(level: f64) -> Result<Self> {
        Ok(Self { level: check_level(level)? })
    }
}

impl IntervalEstimator for DistributionFree {
    fn level(&self) -> f64 {
        self.level
    }

    fn interval(&self, samples: &[f64]) -> (f64, f64) {
        let n = samples.len();
        if n == 0 {
            return (f64::NAN, f64::NAN);
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut k = 1;
        if let Ok(binomial) = Binomial::new(0.5, n as u64) {
            for cand in 2..=(n + 1) / 2 {
                let coverage = 1.0 - 2.0 * binomial.cdf((cand - 1) as u64);
                if coverage < self.level {
                    break;
                }
                k = cand;
            }
        }
        (sorted[k - 1], sorted[n - k])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_invalid_level() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(NormalTheory::new(level).is_err());
            assert!(DistributionFree::new(level).is_err());
        }
        assert_eq!(NormalTheory::new(0.95).unwrap().level(), 0.95);
    }

    #[test]
    fn test_normal_theory_known_value() {
        // mean 3, s = sqrt(2.5), t(0.975, 4) = 2.776445
        let est = NormalTheory::new(0.95).unwrap();
        let (lo, hi) = est.interval(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let half = 2.776_445_105 * 2.5f64.sqrt() / 5f64.sqrt();
        assert_abs_diff_eq!(lo, 3.0 - half, epsilon = 1e-5);
        assert_abs_diff_eq!(hi, 3.0 + half, epsilon = 1e-5);
    }

    #[test]
    fn test_normal_theory_edges() {
        let est = NormalTheory::new(0.9).unwrap();
        let (lo, hi) = est.interval(&[]);
        assert!(lo.is_nan() && hi.is_nan());
        assert_eq!(est.interval(&[4.0]), (4.0, 4.0));
        assert_eq!(est.interval(&[2.0, 2.0, 2.0]), (2.0, 2.0));
    }

    #[test]
    fn test_distribution_free_small_sample_is_range() {
        let est = DistributionFree::new(0.95).unwrap();
        // n = 5: coverage at k = 1 is 1 - 2/32 = 0.9375 < 0.95.
        assert_eq!(est.interval(&[5.0, 1.0, 3.0, 2.0, 4.0]), (1.0, 5.0));
        assert_eq!(est.interval(&[7.0]), (7.0, 7.0));
        let (lo, hi) = est.interval(&[]);
        assert!(lo.is_nan() && hi.is_nan());
    }

    #[test]
    fn test_distribution_free_narrows_with_n() {
        let est = DistributionFree::new(0.9).unwrap();
        let samples: Vec<f64> = (1..=20).map(f64::from).collect();
        let (lo, hi) = est.interval(&samples);
        // n = 20, level 0.9: k = 6 has coverage 1 - 2*P(B<=5) = 0.9586,
        // k = 7 has 0.8847.
        assert_eq!((lo, hi), (6.0, 15.0));
    }
}
