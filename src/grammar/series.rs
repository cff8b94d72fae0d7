//! Series grouping and X-run aggregation.
//!
//! A layer's rows are split into [`Series`] by grouping key, in first-seen
//! key order, and each series is then sorted by (X, Y). Statistics consume a
//! sorted series one X value at a time through [`XRuns`].

use indexmap::IndexMap;

use super::value::{Key, Scalar};
use crate::error::{Error, Result};

/// Rows sharing one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    key: Key,
    rows: Vec<usize>,
}

impl Series {
    /// Create a series from its key and rows.
    #[must_use]
    pub fn new(key: Key, rows: Vec<usize>) -> Self {
        Self { key, rows }
    }

    /// Grouping key shared by every row.
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Row indices in series order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stable-sort rows by X ascending, then Y ascending.
    ///
    /// `xs` and `ys` are whole columns indexed by row.
    ///
    /// # Panics
    ///
    /// Panics if a row index is out of bounds for `xs` or `ys`.
    pub fn sort_by_xy<X: Scalar, Y: Scalar>(&mut self, xs: &[X], ys: &[Y]) {
        self.rows.sort_by(|&a, &b| xs[a].compare(&xs[b]).then_with(|| ys[a].compare(&ys[b])));
    }

    /// Maximal runs of equal X. Requires rows sorted by X.
    pub fn x_runs<'s, X: Scalar>(&'s self, xs: &'s [X]) -> XRuns<'s, X> {
        XRuns::new(&self.rows, xs)
    }
}

/// Partition `rows` into series by the key `select` assigns to each row.
///
/// Series appear in the order their key is first seen, and rows within a
/// series keep their input order. Rows at or past `row_count` are rejected.
///
/// # Errors
///
/// Returns [`Error::RowOutOfBounds`] for an invalid row, or the first error
/// reported by `select`.
pub fn group_series<I, F>(rows: I, row_count: usize, mut select: F) -> Result<Vec<Series>>
where
    I: IntoIterator<Item = usize>,
    F: FnMut(usize) -> Result<Key>,
{
    let mut buckets: IndexMap<Key, Vec<usize>> = IndexMap::new();
    for row in rows {
        if row >= row_count {
            return Err(Error::RowOutOfBounds { row, rows: row_count });
        }
        buckets.entry(select(row)?).or_default().push(row);
    }
    Ok(buckets.into_iter().map(|(key, rows)| Series::new(key, rows)).collect())
}

/// Cursor over maximal runs of exactly equal X within a sorted series.
///
/// Yields `(first_row, run_rows)`. The first row of a run supplies the X
/// coordinate (and the row styling) for the aggregated mark. Equality is
/// exact, so each `NaN` X forms its own run.
#[derive(Debug, Clone)]
pub struct XRuns<'s, X> {
    rows: &'s [usize],
    xs: &'s [X],
    pos: usize,
}

impl<'s, X: Scalar> XRuns<'s, X> {
    /// Cursor over `rows`, reading X values from `xs`.
    #[must_use]
    pub fn new(rows: &'s [usize], xs: &'s [X]) -> Self {
        Self { rows, xs, pos: 0 }
    }
}

impl<'s, X: Scalar> Iterator for XRuns<'s, X> {
    type Item = (usize, &'s [usize]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let first = *self.rows.get(start)?;
        let x = self.xs[first];
        let mut end = start + 1;
        while end < self.rows.len() && self.xs[self.rows[end]] == x {
            end += 1;
        }
        self.pos = end;
        Some((first, &self.rows[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_first_seen_order() {
        let keys = ["b", "a", "b", "c", "a"];
        let series = group_series(0..5, 5, |r| Ok(Key::Str(keys[r].to_string()))).unwrap();
        let names: Vec<_> = series.iter().map(|s| s.key().clone()).collect();
        assert_eq!(names, vec![Key::Str("b".into()), Key::Str("a".into()), Key::Str("c".into())]);
        assert_eq!(series[0].rows(), &[0, 2]);
        assert_eq!(series[1].rows(), &[1, 4]);
        assert_eq!(series[2].rows(), &[3]);
    }

    #[test]
    fn test_group_empty_and_errors() {
        assert!(group_series(0..0, 0, |_| Ok(Key::Unit)).unwrap().is_empty());
        assert!(matches!(group_series([3], 2, |_| Ok(Key::Unit)), Err(Error::RowOutOfBounds { row: 3, rows: 2 })));
        let failing = group_series(0..2, 2, |_| Err(Error::MissingData));
        assert!(matches!(failing, Err(Error::MissingData)));
    }

    #[test]
    fn test_sort_by_xy_stable() {
        let xs = [2.0, 1.0, 2.0, 1.0, 2.0];
        let ys = [5i32, 3, 1, 3, 1];
        let mut s = Series::new(Key::Unit, vec![0, 1, 2, 3, 4]);
        s.sort_by_xy(&xs, &ys);
        // Ties on (x, y) keep input order: 1 before 3, 2 before 4.
        assert_eq!(s.rows(), &[1, 3, 2, 4, 0]);
    }

    #[test]
    fn test_x_runs() {
        let xs = [1u32, 1, 2, 3, 3, 3];
        let s = Series::new(Key::Unit, vec![0, 1, 2, 3, 4, 5]);
        let runs: Vec<_> = s.x_runs(&xs).collect();
        assert_eq!(runs, vec![(0, &[0, 1][..]), (2, &[2][..]), (3, &[3, 4, 5][..])]);
    }

    #[test]
    fn test_x_runs_nan_is_singleton() {
        let xs = [f64::NAN, f64::NAN];
        let s = Series::new(Key::Unit, vec![0, 1]);
        assert_eq!(s.x_runs(&xs).count(), 2);
        let empty = Series::new(Key::Unit, Vec::new());
        assert_eq!(empty.x_runs(&xs).count(), 0);
    }
}
