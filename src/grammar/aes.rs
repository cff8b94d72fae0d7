//! Aesthetic mappings.
//!
//! A [`Mapping<O>`] turns a dataset row into a rendered value of type `O`
//! (a color, a line width) and also provides the row's grouping [`Key`].
//! Geometries split a layer's rows into series by the keys of their color
//! and size mappings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use super::column::{Column, Element};
use super::data::Dataset;
use super::theme::Theme;
use super::value::{Key, Scalar};
use crate::color::Rgba;
use crate::error::Result;
use crate::scale::{LinearScale, Scale};

/// Selector and scale pair behind a [`Mapping`].
pub trait Aesthetic<O> {
    /// Grouping key for `row`.
    fn select(&self, data: &Dataset, row: usize) -> Result<Key>;

    /// Rendered value for `row`.
    fn scale(&self, data: &Dataset, row: usize, theme: &Theme) -> Result<O>;
}

/// Aesthetic mapping producing values of type `O`.
pub struct Mapping<O> {
    inner: Box<dyn Aesthetic<O>>,
}

impl<O: 'static> Mapping<O> {
    /// Wrap a custom [`Aesthetic`] implementation.
    pub fn new(aesthetic: impl Aesthetic<O> + 'static) -> Self {
        Self { inner: Box::new(aesthetic) }
    }

    /// Same value for every row. Never splits series.
    pub fn constant(value: O) -> Self
    where
        O: Clone,
    {
        Self::new(Constant(value))
    }

    /// Map each row through `f` applied to its `column` value.
    pub fn custom<I: Element>(column: &Column<I>, f: impl Fn(&I) -> O + 'static) -> Self {
        Self::new(ByColumn { column: column.clone(), f })
    }

    /// Look `column` values up in `inputs`, yielding the output at the same
    /// position, or `fallback` when the value is not listed.
    ///
    /// Extra entries in the longer of `inputs` and `outputs` are ignored.
    pub fn ordinal<I: Element>(column: &Column<I>, inputs: &[I], outputs: &[O], fallback: O) -> Self
    where
        O: Clone,
    {
        let table: HashMap<Key, O> = inputs.iter().map(Element::key).zip(outputs.iter().cloned()).collect();
        Self::custom(column, move |v: &I| table.get(&v.key()).cloned().unwrap_or_else(|| fallback.clone()))
    }

    /// Grouping key for `row`.
    pub fn select(&self, data: &Dataset, row: usize) -> Result<Key> {
        self.inner.select(data, row)
    }

    /// Rendered value for `row`.
    pub fn scale(&self, data: &Dataset, row: usize, theme: &Theme) -> Result<O> {
        self.inner.scale(data, row, theme)
    }
}

impl<T: Element> Mapping<T> {
    /// Use the column value itself.
    pub fn identity(column: &Column<T>) -> Self {
        Self::custom(column, T::clone)
    }

    /// Linearly map `[i0, i1]` onto `[o0, o1]`.
    pub fn linear<I: Scalar>(column: &Column<I>, i0: I, i1: I, o0: T, o1: T) -> Self
    where
        T: Scalar,
    {
        let scale = LinearScale::new((i0.to_f64(), i1.to_f64()), (o0.to_f64(), o1.to_f64()));
        Self::custom(column, move |v: &I| T::from_f64(scale.scale(v.to_f64())))
    }

}

impl Mapping<Rgba> {
    /// Fixed palette entry of the render theme. Never splits series.
    pub fn palette(index: usize) -> Self {
        Self::new(PaletteColor(index))
    }

    /// Assign palette colors to distinct `column` values in first-seen
    /// order.
    ///
    /// The value-to-ordinal memo lives in the mapping, so a value keeps its
    /// color across renders of the same plot.
    pub fn nice_colors<I: Element>(column: &Column<I>) -> Self {
        Self::new(NiceColors { column: column.clone(), seen: RefCell::new(HashMap::new()) })
    }
}

impl<O> fmt::Debug for Mapping<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping").finish_non_exhaustive()
    }
}

struct Constant<O>(O);

impl<O: Clone> Aesthetic<O> for Constant<O> {
    fn select(&self, _: &Dataset, _: usize) -> Result<Key> {
        Ok(Key::Unit)
    }

    fn scale(&self, _: &Dataset, _: usize, _: &Theme) -> Result<O> {
        Ok(self.0.clone())
    }
}

struct PaletteColor(usize);

impl Aesthetic<Rgba> for PaletteColor {
    fn select(&self, _: &Dataset, _: usize) -> Result<Key> {
        Ok(Key::Unit)
    }

    fn scale(&self, _: &Dataset, _: usize, theme: &Theme) -> Result<Rgba> {
        Ok(theme.series_palette(self.0))
    }
}

struct ByColumn<I, F> {
    column: Column<I>,
    f: F,
}

impl<I: Element, O, F: Fn(&I) -> O> Aesthetic<O> for ByColumn<I, F> {
    fn select(&self, data: &Dataset, row: usize) -> Result<Key> {
        Ok(data.get_ref(&self.column, row)?.key())
    }

    fn scale(&self, data: &Dataset, row: usize, _: &Theme) -> Result<O> {
        Ok((self.f)(data.get_ref(&self.column, row)?))
    }
}

struct NiceColors<I> {
    column: Column<I>,
    seen: RefCell<HashMap<Key, usize>>,
}

impl<I: Element> Aesthetic<Rgba> for NiceColors<I> {
    fn select(&self, data: &Dataset, row: usize) -> Result<Key> {
        Ok(data.get_ref(&self.column, row)?.key())
    }

    fn scale(&self, data: &Dataset, row: usize, theme: &Theme) -> Result<Rgba> {
        let key = data.get_ref(&self.column, row)?.key();
        let mut seen = self.seen.borrow_mut();
        let next = seen.len();
        let ordinal = *seen.entry(key).or_insert(next);
        Ok(theme.series_palette(ordinal))
    }
}
