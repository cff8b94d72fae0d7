//! Scale functions for data-to-device mappings.
//!
//! A scale maps one real domain interval `[x0, x1]` onto one device interval
//! `[t0, t1]`. Either interval may be given in descending order, which is how
//! plots invert the Y axis. Based on the Grammar of Graphics [Wilkinson 2005].

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale: `f(a) = (a - x0) * (t1 - t0) / (x1 - x0) + t0`.
///
/// A zero-width domain is not rejected. The slope becomes infinite and the
/// scale yields non-finite positions, which canvases skip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
    slope: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_ggg::scale::{LinearScale, Scale};
    ///
    /// let s = LinearScale::new((10.0, 0.0), (0.0, 100.0));
    /// assert_eq!(s.scale(5.0), 50.0);
    /// ```
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let slope = (range.1 - range.0) / (domain.1 - domain.0);
        if !slope.is_finite() {
            tracing::warn!(?domain, ?range, "degenerate linear scale domain");
        }
        Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1, slope }
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        (value - self.range_min) / self.slope + self.domain_min
    }

    /// `true` when the domain has zero width (or is not finite).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.slope.is_finite()
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        (value - self.domain_min) * self.slope + self.range_min
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Logarithm for an integer base.
///
/// Bases 2 and 10 use the dedicated functions; any other base goes through
/// `log2(x) / log2(base)`.
pub fn log_fn(base: u32) -> impl Fn(f64) -> f64 {
    let divisor = f64::from(base).log2();
    move |x: f64| match base {
        2 => x.log2(),
        10 => x.log10(),
        _ => x.log2() / divisor,
    }
}

/// Logarithmic scale: the linear law applied to `log_base(a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    base: u32,
    domain_min: f64,
    domain_max: f64,
    inner: LinearScale,
}

impl LogScale {
    /// Create a logarithmic scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if either domain end is not strictly
    /// positive or the base is smaller than 2.
    pub fn new(base: u32, domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if base < 2 {
            return Err(Error::ScaleDomain(format!("log base must be at least 2, got {base}")));
        }
        if !(domain.0 > 0.0 && domain.1 > 0.0) {
            return Err(Error::ScaleDomain(format!(
                "log scale domain must be positive, got [{}, {}]",
                domain.0, domain.1
            )));
        }
        let log = log_fn(base);
        Ok(Self {
            base,
            domain_min: domain.0,
            domain_max: domain.1,
            inner: LinearScale::new((log(domain.0), log(domain.1)), range),
        })
    }

    /// Logarithm base.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }
}

impl Scale<f64, f64> for LogScale {
    fn scale(&self, value: f64) -> f64 {
        self.inner.scale(log_fn(self.base)(value))
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

/// Scale used for one plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    /// Linear axis.
    Linear(LinearScale),
    /// Logarithmic axis.
    Log(LogScale),
}

impl AxisScale {
    /// Build the axis scale for `domain`, logarithmic when `log_base` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] for a logarithmic axis over a
    /// non-positive domain.
    pub fn new(log_base: Option<u32>, domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        match log_base {
            Some(base) => Ok(Self::Log(LogScale::new(base, domain, range)?)),
            None => Ok(Self::Linear(LinearScale::new(domain, range))),
        }
    }

    /// Generate axis ticks over the scale's domain.
    ///
    /// Linear axes request `count` ticks; logarithmic axes ignore it.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => {
                let (a, b) = s.domain();
                crate::ticks::linear_ticks(a, b, count)
            }
            Self::Log(s) => {
                let (a, b) = s.domain();
                crate::ticks::log_ticks(s.base(), a, b)
            }
        }
    }
}

impl Scale<f64, f64> for AxisScale {
    fn scale(&self, value: f64) -> f64 {
        match self {
            Self::Linear(s) => s.scale(value),
            Self::Log(s) => s.scale(value),
        }
    }

    fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
        }
    }
}
