//! Typed columns: element kinds, type-erased storage and column handles.
//!
//! A [`Dataset`](super::Dataset) stores each column as one [`ColumnData`]
//! variant. A [`Column<T>`] handle carries the column's identity (name and
//! element kind) plus a shared position cache, and downcasts storage to
//! `T` through the [`Element`] trait.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use super::value::{Key, Value};

/// Tag for the element type stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
}

impl ElementKind {
    /// Rust type name of the element.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
        }
    }

    /// `true` for the numeric kinds.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Bool | Self::String)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage for one column. All variants hold one value per dataset row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// `bool` values.
    Bool(Vec<bool>),
    /// `i8` values.
    I8(Vec<i8>),
    /// `i16` values.
    I16(Vec<i16>),
    /// `i32` values.
    I32(Vec<i32>),
    /// `i64` values.
    I64(Vec<i64>),
    /// `u8` values.
    U8(Vec<u8>),
    /// `u16` values.
    U16(Vec<u16>),
    /// `u32` values.
    U32(Vec<u32>),
    /// `u64` values.
    U64(Vec<u64>),
    /// `f32` values.
    F32(Vec<f32>),
    /// `f64` values.
    F64(Vec<f64>),
    /// `String` values.
    String(Vec<String>),
}

macro_rules! each_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ColumnData::Bool($v) => $body,
            ColumnData::I8($v) => $body,
            ColumnData::I16($v) => $body,
            ColumnData::I32($v) => $body,
            ColumnData::I64($v) => $body,
            ColumnData::U8($v) => $body,
            ColumnData::U16($v) => $body,
            ColumnData::U32($v) => $body,
            ColumnData::U64($v) => $body,
            ColumnData::F32($v) => $body,
            ColumnData::F64($v) => $body,
            ColumnData::String($v) => $body,
        }
    };
}

impl ColumnData {
    /// Zero-filled storage of `kind` with `len` rows.
    #[must_use]
    pub fn zeroed(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::Bool => Self::Bool(vec![false; len]),
            ElementKind::I8 => Self::I8(vec![0; len]),
            ElementKind::I16 => Self::I16(vec![0; len]),
            ElementKind::I32 => Self::I32(vec![0; len]),
            ElementKind::I64 => Self::I64(vec![0; len]),
            ElementKind::U8 => Self::U8(vec![0; len]),
            ElementKind::U16 => Self::U16(vec![0; len]),
            ElementKind::U32 => Self::U32(vec![0; len]),
            ElementKind::U64 => Self::U64(vec![0; len]),
            ElementKind::F32 => Self::F32(vec![0.0; len]),
            ElementKind::F64 => Self::F64(vec![0.0; len]),
            ElementKind::String => Self::String(vec![String::new(); len]),
        }
    }

    /// Element kind of this storage.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Bool(_) => ElementKind::Bool,
            Self::I8(_) => ElementKind::I8,
            Self::I16(_) => ElementKind::I16,
            Self::I32(_) => ElementKind::I32,
            Self::I64(_) => ElementKind::I64,
            Self::U8(_) => ElementKind::U8,
            Self::U16(_) => ElementKind::U16,
            Self::U32(_) => ElementKind::U32,
            Self::U64(_) => ElementKind::U64,
            Self::F32(_) => ElementKind::F32,
            Self::F64(_) => ElementKind::F64,
            Self::String(_) => ElementKind::String,
        }
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    /// `true` when no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `n` zero values.
    pub fn grow(&mut self, n: usize) {
        each_variant!(self, v => v.resize(v.len() + n, Default::default()));
    }

    /// Type-erased view of the value at `row`.
    #[must_use]
    pub fn value(&self, row: usize) -> Option<Value<'_>> {
        Some(match self {
            Self::Bool(v) => Value::Bool(*v.get(row)?),
            Self::I8(v) => Value::Int(i64::from(*v.get(row)?)),
            Self::I16(v) => Value::Int(i64::from(*v.get(row)?)),
            Self::I32(v) => Value::Int(i64::from(*v.get(row)?)),
            Self::I64(v) => Value::Int(*v.get(row)?),
            Self::U8(v) => Value::UInt(u64::from(*v.get(row)?)),
            Self::U16(v) => Value::UInt(u64::from(*v.get(row)?)),
            Self::U32(v) => Value::UInt(u64::from(*v.get(row)?)),
            Self::U64(v) => Value::UInt(*v.get(row)?),
            Self::F32(v) => Value::F32(*v.get(row)?),
            Self::F64(v) => Value::F64(*v.get(row)?),
            Self::String(v) => Value::Str(v.get(row)?.as_str()),
        })
    }
}

/// A type that can be stored in a [`ColumnData`] variant.
pub trait Element: Clone + Default + PartialEq + fmt::Debug + 'static {
    /// Kind tag of the matching storage variant.
    const KIND: ElementKind;

    /// Downcast storage to a slice of `Self`.
    fn slice(data: &ColumnData) -> Option<&[Self]>;

    /// Downcast storage to a mutable vector of `Self`.
    fn slice_mut(data: &mut ColumnData) -> Option<&mut Vec<Self>>;

    /// Wrap values in the matching storage variant.
    fn wrap(values: Vec<Self>) -> ColumnData;

    /// Grouping key for this value.
    fn key(&self) -> Key;
}

macro_rules! element {
    ($t:ty, $variant:ident, $kind:ident, |$s:ident| $key:expr) => {
        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn slice(data: &ColumnData) -> Option<&[Self]> {
                match data {
                    ColumnData::$variant(v) => Some(v.as_slice()),
                    _ => None,
                }
            }

            #[inline]
            fn slice_mut(data: &mut ColumnData) -> Option<&mut Vec<Self>> {
                match data {
                    ColumnData::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn wrap(values: Vec<Self>) -> ColumnData {
                ColumnData::$variant(values)
            }

            fn key(&self) -> Key {
                let $s = self;
                $key
            }
        }
    };
}

element!(bool, Bool, Bool, |v| Key::Bool(*v));
element!(i8, I8, I8, |v| Key::Int(i64::from(*v)));
element!(i16, I16, I16, |v| Key::Int(i64::from(*v)));
element!(i32, I32, I32, |v| Key::Int(i64::from(*v)));
element!(i64, I64, I64, |v| Key::Int(*v));
element!(u8, U8, U8, |v| Key::UInt(u64::from(*v)));
element!(u16, U16, U16, |v| Key::UInt(u64::from(*v)));
element!(u32, U32, U32, |v| Key::UInt(u64::from(*v)));
element!(u64, U64, U64, |v| Key::UInt(*v));
element!(f32, F32, F32, |v| Key::float(f64::from(*v)));
element!(f64, F64, F64, |v| Key::float(*v));
element!(String, String, String, |v| Key::Str(v.clone()));

/// Column identity: name plus element kind, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    name: Arc<str>,
    kind: ElementKind,
}

impl ColumnKey {
    /// Create a column identity.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, kind: ElementKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Slot value meaning "nothing cached yet".
const UNRESOLVED: usize = usize::MAX;

/// Typed handle to a column of `T` values.
///
/// Handles are cheap to clone; clones share one position cache. The cache is
/// only a hint: every access checks the identity stored at the cached
/// position and falls back to a lookup by identity when it does not match.
///
/// # Example
///
/// ```
/// use trueno_ggg::grammar::{Column, Dataset};
///
/// let mut d = Dataset::new();
/// let x = Column::<f64>::new("x");
/// assert!(d.add_column(&x));
/// let rows = d.grow(2);
/// d.set(&x, rows.start, 1.5).unwrap();
/// assert_eq!(d.get(&x, 0).unwrap(), 1.5);
/// ```
pub struct Column<T> {
    key: ColumnKey,
    cache: Rc<Cell<usize>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> Column<T> {
    /// Create a handle for the column `name` holding `T`.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            key: ColumnKey::new(name, T::KIND),
            cache: Rc::new(Cell::new(UNRESOLVED)),
            _marker: PhantomData,
        }
    }

    /// Element kind of the column.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        T::KIND
    }
}

impl<T> Column<T> {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.key.name()
    }

    /// Column identity.
    #[must_use]
    pub fn key(&self) -> &ColumnKey {
        &self.key
    }

    pub(crate) fn cached(&self) -> usize {
        self.cache.get()
    }

    pub(crate) fn remember(&self, position: usize) {
        self.cache.set(position);
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self { key: self.key.clone(), cache: Rc::clone(&self.cache), _marker: PhantomData }
    }
}

impl<T> PartialEq for Column<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Column<T> {}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("key", &self.key).field("cache", &self.cache.get()).finish()
    }
}

impl<T> fmt::Display for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}
