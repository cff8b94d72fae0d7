//! Statistics applied to the Y values of each X run.

use super::interval::{DistributionFree, IntervalEstimator, NormalTheory};
use super::value::Scalar;
use crate::error::Result;

/// Aggregation over a run of Y values with a fixed output arity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    /// Number of values.
    Count,
    /// Sum in the element's arithmetic, widened to `f64`.
    Sum,
    /// `Sum / Count`. An empty run gives `NaN`.
    Mean,
    /// Distribution-free interval `[lo, hi]`.
    Confidence(DistributionFree),
    /// Normal-theory interval `[lo, hi]`.
    ConfidenceNormal(NormalTheory),
}

impl Statistic {
    /// Count statistic.
    #[must_use]
    pub fn count() -> Self {
        Statistic::Count
    }

    /// Sum statistic.
    #[must_use]
    pub fn sum() -> Self {
        Statistic::Sum
    }

    /// Mean statistic.
    #[must_use]
    pub fn mean() -> Self {
        Statistic::Mean
    }

    /// Distribution-free confidence interval at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfidence`](crate::error::Error::InvalidConfidence)
    /// unless `0 < level < 1`.
    pub fn confidence(level: f64) -> Result<Self> {
        Ok(Statistic::Confidence(DistributionFree::new(level)?))
    }

    /// Normal-theory confidence interval at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfidence`](crate::error::Error::InvalidConfidence)
    /// unless `0 < level < 1`.
    pub fn confidence_normal(level: f64) -> Result<Self> {
        Ok(Statistic::ConfidenceNormal(NormalTheory::new(level)?))
    }

    /// Number of output values.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        match self {
            Statistic::Count | Statistic::Sum | Statistic::Mean => 1,
            Statistic::Confidence(_) | Statistic::ConfidenceNormal(_) => 2,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Sum => "sum",
            Statistic::Mean => "mean",
            Statistic::Confidence(_) => "confidence",
            Statistic::ConfidenceNormal(_) => "confidence_normal",
        }
    }

    /// Apply to `values`, returning [`dimensions`](Self::dimensions) results.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_ggg::grammar::Statistic;
    ///
    /// assert_eq!(Statistic::mean().apply([1, 2, 3, 4]), vec![2.5]);
    /// assert_eq!(Statistic::sum().apply([1.5f32, 2.5]), vec![4.0]);
    /// ```
    pub fn apply<T: Scalar>(&self, values: impl IntoIterator<Item = T>) -> Vec<f64> {
        let mut out = vec![0.0; self.dimensions()];
        self.apply_into(values, &mut out);
        out
    }

    /// Apply to `values`, writing into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` differs from [`dimensions`](Self::dimensions).
    pub fn apply_into<T: Scalar>(&self, values: impl IntoIterator<Item = T>, out: &mut [f64]) {
        assert_eq!(
            out.len(),
            self.dimensions(),
            "{}-dimensional statistic applied to {}-dimensional result",
            self.dimensions(),
            out.len()
        );
        match self {
            Statistic::Count => out[0] = values.into_iter().count() as f64,
            Statistic::Sum => out[0] = sum(values).0.to_f64(),
            Statistic::Mean => {
                let (total, n) = sum(values);
                out[0] = total.to_f64() / n as f64;
            }
            Statistic::Confidence(est) => write_interval(est, values, out),
            Statistic::ConfidenceNormal(est) => write_interval(est, values, out),
        }
    }
}

fn sum<T: Scalar>(values: impl IntoIterator<Item = T>) -> (T, usize) {
    values.into_iter().fold((T::default(), 0), |(acc, n), v| (acc.accumulate(v), n + 1))
}

fn write_interval<T: Scalar>(est: &impl IntervalEstimator, values: impl IntoIterator<Item = T>, out: &mut [f64]) {
    let samples: Vec<f64> = values.into_iter().map(Scalar::to_f64).collect();
    let (lo, hi) = est.interval(&samples);
    out[0] = lo;
    out[1] = hi;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_statistics() {
        let data = [1i64, 2, 3, 4];
        assert_eq!(Statistic::count().apply(data), vec![4.0]);
        assert_eq!(Statistic::sum().apply(data), vec![10.0]);
        assert_eq!(Statistic::mean().apply(data), vec![2.5]);
        assert_eq!(Statistic::mean().apply([1.0f64, 2.0, 3.0, 4.0]), vec![2.5]);
        assert_eq!(Statistic::mean().apply([1u8, 2, 3, 4]), vec![2.5]);
    }

    #[test]
    fn test_sum_in_source_type() {
        // u8 arithmetic wraps before widening.
        assert_eq!(Statistic::sum().apply([200u8, 100]), vec![44.0]);
    }

    #[test]
    fn test_empty_mean_is_nan() {
        let out = Statistic::mean().apply(std::iter::empty::<f64>());
        assert!(out[0].is_nan());
        assert_eq!(Statistic::count().apply(std::iter::empty::<i32>()), vec![0.0]);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(Statistic::count().dimensions(), 1);
        assert_eq!(Statistic::confidence(0.95).unwrap().dimensions(), 2);
        assert_eq!(Statistic::confidence_normal(0.95).unwrap().dimensions(), 2);
        assert!(Statistic::confidence(1.0).is_err());
    }

    #[test]
    fn test_interval_ordered() {
        let s = Statistic::confidence_normal(0.95).unwrap();
        let out = s.apply([3.0, 1.0, 4.0, 1.0, 5.0]);
        assert!(out[0] <= out[1]);
        let s = Statistic::confidence(0.5).unwrap();
        let out = s.apply([3i32, 1, 4, 1, 5, 9, 2, 6]);
        assert!(out[0] <= out[1]);
    }

    #[test]
    #[should_panic(expected = "1-dimensional statistic applied to 2-dimensional result")]
    fn test_apply_into_wrong_arity_panics() {
        let mut out = [0.0; 2];
        Statistic::mean().apply_into([1.0], &mut out);
    }
}
