//! Row filters.
//!
//! A [`Filter`] decides per row whether the row takes part in a layer.
//! Filters compose with [`Filter::not`], [`Filter::all`] and [`Filter::any`].

use std::fmt;

use super::column::{Column, Element};
use super::data::Dataset;
use crate::error::Result;

type Predicate = Box<dyn Fn(&Dataset, usize) -> Result<bool>>;

/// Row predicate over a dataset.
pub struct Filter {
    accept: Predicate,
}

impl Filter {
    /// Filter from an arbitrary row predicate.
    pub fn from_fn(f: impl Fn(&Dataset, usize) -> Result<bool> + 'static) -> Self {
        Self { accept: Box::new(f) }
    }

    /// Accept rows whose `column` value satisfies `pred`.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_ggg::grammar::{Column, Dataset, Filter};
    ///
    /// let mut d = Dataset::new();
    /// let v = Column::<i32>::new("v");
    /// d.add_column(&v);
    /// for row in d.grow(4) {
    ///     d.set(&v, row, row as i32).unwrap();
    /// }
    /// let odd = Filter::by(&v, |x| x % 2 == 1);
    /// assert_eq!(odd.rows(&d).unwrap(), vec![1, 3]);
    /// ```
    pub fn by<T: Element>(column: &Column<T>, pred: impl Fn(&T) -> bool + 'static) -> Self {
        let column = column.clone();
        Self::from_fn(move |d, row| Ok(pred(d.get_ref(&column, row)?)))
    }

    /// Accept rows equal to `value`.
    pub fn equal_to<T: Element>(column: &Column<T>, value: T) -> Self {
        Self::by(column, move |v| *v == value)
    }

    /// Accept rows not equal to `value`.
    pub fn not_equal_to<T: Element>(column: &Column<T>, value: T) -> Self {
        Self::by(column, move |v| *v != value)
    }

    /// Accept rows strictly less than `value`.
    pub fn less_than<T: Element + PartialOrd>(column: &Column<T>, value: T) -> Self {
        Self::by(column, move |v| *v < value)
    }

    /// Accept rows less than or equal to `value`.
    pub fn less_than_or_equal<T: Element + PartialOrd>(column: &Column<T>, value: T) -> Self {
        Self::by(column, move |v| *v <= value)
    }

    /// Accept rows strictly greater than `value`.
    pub fn greater_than<T: Element + PartialOrd>(column: &Column<T>, value: T) -> Self {
        Self::by(column, move |v| *v > value)
    }

    /// Accept rows greater than or equal to `value`.
    pub fn greater_than_or_equal<T: Element + PartialOrd>(column: &Column<T>, value: T) -> Self {
        Self::by(column, move |v| *v >= value)
    }

    /// Accept rows whose value is one of `values`.
    pub fn one_of<T: Element>(column: &Column<T>, values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        Self::by(column, move |v| values.contains(v))
    }

    /// Keeps rows whose string value matches `pattern` anywhere.
    pub fn matches(column: &Column<String>, pattern: regex::Regex) -> Self {
        Self::by(column, move |v| pattern.is_match(v))
    }

    /// Invert a filter.
    #[must_use]
    pub fn not(inner: Filter) -> Self {
        Self::from_fn(move |d, row| Ok(!inner.accept(d, row)?))
    }

    /// Accept rows accepted by every filter. An empty list accepts everything.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        let filters: Vec<Filter> = filters.into_iter().collect();
        Self::from_fn(move |d, row| {
            for f in &filters {
                if !f.accept(d, row)? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    /// Accept rows accepted by any filter. An empty list rejects everything.
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        let filters: Vec<Filter> = filters.into_iter().collect();
        Self::from_fn(move |d, row| {
            for f in &filters {
                if f.accept(d, row)? {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// Evaluate the filter for one row.
    pub fn accept(&self, data: &Dataset, row: usize) -> Result<bool> {
        (self.accept)(data, row)
    }

    /// All accepted rows of `data`, ascending.
    pub fn rows(&self, data: &Dataset) -> Result<Vec<usize>> {
        let mut rows = Vec::new();
        for row in 0..data.rows() {
            if self.accept(data, row)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn fixture() -> (Dataset, Column<i64>, Column<String>) {
        let mut d = Dataset::new();
        let n = Column::<i64>::new("n");
        let s = Column::<String>::new("s");
        d.add_column(&n);
        d.add_column(&s);
        for (row, name) in d.grow(5).zip(["a", "b", "a", "c", "b"]) {
            d.set(&n, row, row as i64).unwrap();
            d.set(&s, row, name.to_string()).unwrap();
        }
        (d, n, s)
    }

    #[test]
    fn test_comparisons() {
        let (d, n, _) = fixture();
        assert_eq!(Filter::equal_to(&n, 2).rows(&d).unwrap(), vec![2]);
        assert_eq!(Filter::not_equal_to(&n, 2).rows(&d).unwrap(), vec![0, 1, 3, 4]);
        assert_eq!(Filter::less_than(&n, 2).rows(&d).unwrap(), vec![0, 1]);
        assert_eq!(Filter::less_than_or_equal(&n, 2).rows(&d).unwrap(), vec![0, 1, 2]);
        assert_eq!(Filter::greater_than(&n, 2).rows(&d).unwrap(), vec![3, 4]);
        assert_eq!(Filter::greater_than_or_equal(&n, 2).rows(&d).unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn test_matches() {
        let (d, _, s) = fixture();
        let f = Filter::matches(&s, regex::Regex::new("^[ab]$").unwrap());
        assert_eq!(f.rows(&d).unwrap(), vec![0, 1, 2, 4]);

        let f = Filter::not(Filter::matches(&s, regex::Regex::new("a|c").unwrap()));
        assert_eq!(f.rows(&d).unwrap(), vec![1, 4]);

        let stale = Column::<String>::new("gone");
        let err = Filter::matches(&stale, regex::Regex::new(".").unwrap()).rows(&d).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
    }

    #[test]
    fn test_one_of_and_combinators() {
        let (d, n, s) = fixture();
        let ab = Filter::one_of(&s, ["a".to_string(), "b".to_string()]);
        assert_eq!(ab.rows(&d).unwrap(), vec![0, 1, 2, 4]);

        let f = Filter::all([Filter::equal_to(&s, "a".to_string()), Filter::greater_than(&n, 0)]);
        assert_eq!(f.rows(&d).unwrap(), vec![2]);

        let f = Filter::any([Filter::equal_to(&s, "c".to_string()), Filter::equal_to(&n, 0)]);
        assert_eq!(f.rows(&d).unwrap(), vec![0, 3]);

        let f = Filter::not(Filter::equal_to(&s, "b".to_string()));
        assert_eq!(f.rows(&d).unwrap(), vec![0, 2, 3]);

        assert_eq!(Filter::all([]).rows(&d).unwrap().len(), 5);
        assert!(Filter::any([]).rows(&d).unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_propagates() {
        let (d, _, _) = fixture();
        let ghost = Column::<f64>::new("ghost");
        let err = Filter::greater_than(&ghost, 0.0).rows(&d).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { .. }));
    }
}
