//! Scalar element types, grouping keys and type-erased cell views.

use std::cmp::Ordering;
use std::fmt;

use super::column::Element;

/// Opaque, hashable grouping key.
///
/// Produced by aesthetic selectors. Rows whose keys compare equal land in the
/// same series. Floats are keyed by their bit pattern, so `NaN` groups with
/// identical `NaN`s and `-0.0` is distinct from `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Constant selector; never splits series.
    Unit,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value, by bit pattern.
    Float(u64),
    /// String value.
    Str(String),
    /// Composite key from two selectors.
    Pair(Box<Key>, Box<Key>),
}

impl Key {
    /// Key for a float value.
    #[must_use]
    pub fn float(v: f64) -> Self {
        Key::Float(v.to_bits())
    }

    /// Combine two keys.
    #[must_use]
    pub fn pair(a: Key, b: Key) -> Self {
        Key::Pair(Box::new(a), Box::new(b))
    }
}

/// Numeric element types usable as X/Y coordinates and statistic input.
pub trait Scalar: Element + Copy + PartialOrd {
    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` with `as` semantics (saturating, NaN to zero for
    /// integers).
    fn from_f64(v: f64) -> Self;

    /// Add in the element's own arithmetic. Integers wrap on overflow.
    #[must_use]
    fn accumulate(self, other: Self) -> Self;

    /// Total order used for sorting series. Floats use `total_cmp`.
    fn compare(&self, other: &Self) -> Ordering;
}

macro_rules! int_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn accumulate(self, other: Self) -> Self {
                self.wrapping_add(other)
            }

            #[inline]
            fn compare(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    )*};
}

int_scalar!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! float_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn accumulate(self, other: Self) -> Self {
                self + other
            }

            #[inline]
            fn compare(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        }
    )*};
}

float_scalar!(f32, f64);

/// Borrowed view of one dataset cell, used for type-erased display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Boolean cell.
    Bool(bool),
    /// Signed integer cell.
    Int(i64),
    /// Unsigned integer cell.
    UInt(u64),
    /// `f32` cell.
    F32(f32),
    /// `f64` cell.
    F64(f64),
    /// String cell.
    Str(&'a str),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
        }
    }
}
