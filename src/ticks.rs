//! "Nice number" axis ticks.
//!
//! Linear ticks pick a step of {1, 2, 5, 10} times a power of ten. Log ticks
//! emit powers of the base, with sub-ticks for bases of 10 and above.

use crate::scale::log_fn;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Default number of ticks requested for a linear axis.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Generate ticks for the linear domain `[start, stop]`.
///
/// Ticks are multiples of a nice step lying inside the domain, ordered like
/// the input (descending when `stop < start`). A `count` of zero requests
/// [`DEFAULT_TICK_COUNT`]. A zero-width domain yields exactly one tick.
///
/// # Example
///
/// ```
/// use trueno_ggg::ticks::linear_ticks;
///
/// assert_eq!(linear_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
/// assert_eq!(linear_ticks(3.0, 3.0, 5), vec![3.0]);
/// ```
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let count = if count == 0 { DEFAULT_TICK_COUNT } else { count };
    if start == stop {
        return vec![start];
    }
    if !start.is_finite() || !stop.is_finite() {
        tracing::warn!(start, stop, "non-finite tick domain");
        return Vec::new();
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let range = TickRange::new(lo, hi, count);
    if range.i2 < range.i1 {
        return Vec::new();
    }

    let mut ticks: Vec<f64> = (range.i1..=range.i2).map(|i| range.at(i)).collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Integer tick range and increment for an ascending domain.
///
/// A negative `inc` means ticks are `i / -inc`, which keeps fractional steps
/// exact (`0.1` is computed as `1 / 10`, not `1 * 0.1`).
struct TickRange {
    i1: i64,
    i2: i64,
    inc: f64,
}

impl TickRange {
    fn new(start: f64, stop: f64, count: usize) -> Self {
        let step = (stop - start) / count.max(2) as f64;
        let power = step.log10().floor() as i32;
        let err = step / 10f64.powi(power);
        let factor = if err >= E10 {
            10.0
        } else if err >= E5 {
            5.0
        } else if err >= E2 {
            2.0
        } else {
            1.0
        };

        if power < 0 {
            let inc = 10f64.powi(-power) / factor;
            let mut i1 = (start * inc).round() as i64;
            let mut i2 = (stop * inc).round() as i64;
            if (i1 as f64) / inc < start {
                i1 += 1;
            }
            if (i2 as f64) / inc > stop {
                i2 -= 1;
            }
            Self { i1, i2, inc: -inc }
        } else {
            let inc = 10f64.powi(power) * factor;
            let mut i1 = (start / inc).round() as i64;
            let mut i2 = (stop / inc).round() as i64;
            if (i1 as f64) * inc < start {
                i1 += 1;
            }
            if (i2 as f64) * inc > stop {
                i2 -= 1;
            }
            Self { i1, i2, inc }
        }
    }

    fn at(&self, i: i64) -> f64 {
        if self.inc < 0.0 {
            i as f64 / -self.inc
        } else {
            i as f64 * self.inc
        }
    }
}

/// Generate ticks for a logarithmic domain `[start, stop]` in `base`.
///
/// Majors are `base^i` for `i` from `floor(log(start))` to `ceil(log(stop))`.
/// For bases of 10 and above each major `m` is preceded by sub-ticks at
/// `m/4`, `2m/4` and `3m/4`. Ticks outside the domain are dropped and the
/// result follows the input order. Non-positive domains yield no ticks.
///
/// # Example
///
/// ```
/// use trueno_ggg::ticks::log_ticks;
///
/// assert_eq!(log_ticks(2, 1.0, 8.0), vec![1.0, 2.0, 4.0, 8.0]);
/// ```
#[must_use]
pub fn log_ticks(base: u32, start: f64, stop: f64) -> Vec<f64> {
    let reverse = stop < start;
    let (start, stop) = if reverse { (stop, start) } else { (start, stop) };
    if base < 2 || !(start > 0.0) || !stop.is_finite() {
        tracing::warn!(base, start, stop, "invalid log tick domain");
        return Vec::new();
    }

    let log = log_fn(base);
    let lo = log(start).floor() as i32;
    let hi = log(stop).ceil() as i32;
    let per_major: u32 = if base < 10 { 1 } else { 4 };

    let mut ticks = Vec::new();
    'majors: for i in lo..=hi {
        let major = f64::from(base).powi(i);
        for k in 1..=per_major {
            let t = major * f64::from(k) / f64::from(per_major);
            if t < start {
                continue;
            }
            if t > stop {
                break 'majors;
            }
            ticks.push(t);
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}
