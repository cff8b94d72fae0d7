//! Typed columnar dataset.
//!
//! A [`Dataset`] owns an ordered list of columns that always have the same
//! number of rows. Columns are addressed through [`Column<T>`] handles and
//! rows are added in bulk with [`Dataset::grow`].

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::column::{Column, ColumnData, ColumnKey, Element};
use super::value::Value;
use crate::error::{Error, Result};

/// Rows shown in full by `Display` before switching to head and tail.
const PRINT_ALL_BELOW: usize = 20;
/// Rows shown at each end when the dataset is elided.
const PRINT_EDGE: usize = 10;

/// Columnar store of typed values.
///
/// # Example
///
/// ```
/// use trueno_ggg::grammar::{Column, Dataset};
///
/// let mut d = Dataset::new();
/// let name = Column::<String>::new("name");
/// let score = Column::<i64>::new("score");
/// d.add_column(&name);
/// d.add_column(&score);
///
/// for row in d.grow(2) {
///     d.set(&score, row, row as i64 * 10).unwrap();
/// }
/// assert_eq!(d.values(&score).unwrap(), &[0, 10]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Columns in insertion order.
    columns: Vec<(ColumnKey, ColumnData)>,
    /// Identity to position in `columns`.
    index: HashMap<ColumnKey, usize>,
    /// Row count shared by every column.
    rows: usize,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in column order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(key, _)| key.name())
    }

    /// Add an empty column for `column`, zero-filled to the current row count.
    ///
    /// Returns `false` (and changes nothing) if a column with the same
    /// identity already exists.
    pub fn add_column<T: Element>(&mut self, column: &Column<T>) -> bool {
        if self.index.contains_key(column.key()) {
            return false;
        }
        self.push(column.key().clone(), ColumnData::zeroed(T::KIND, self.rows));
        column.remember(self.columns.len() - 1);
        true
    }

    /// Append `n` zero-filled rows to every column and return the new row
    /// indices.
    pub fn grow(&mut self, n: usize) -> Range<usize> {
        let start = self.rows;
        for (_, data) in &mut self.columns {
            data.grow(n);
        }
        self.rows += n;
        start..self.rows
    }

    /// `true` if the dataset has a column with this handle's identity.
    pub fn contains<T: Element>(&self, column: &Column<T>) -> bool {
        self.position(column).is_ok()
    }

    /// All values of a column, in row order.
    pub fn values<T: Element>(&self, column: &Column<T>) -> Result<&[T]> {
        let pos = self.position(column)?;
        T::slice(&self.columns[pos].1).ok_or_else(|| not_found(column))
    }

    /// Borrow the value at `row`.
    pub fn get_ref<T: Element>(&self, column: &Column<T>, row: usize) -> Result<&T> {
        let values = self.values(column)?;
        values.get(row).ok_or(Error::RowOutOfBounds { row, rows: self.rows })
    }

    /// Copy of the value at `row`.
    pub fn get<T: Element>(&self, column: &Column<T>, row: usize) -> Result<T> {
        self.get_ref(column, row).cloned()
    }

    /// Overwrite the value at `row`.
    pub fn set<T: Element>(&mut self, column: &Column<T>, row: usize, value: T) -> Result<()> {
        let rows = self.rows;
        let pos = self.position(column)?;
        let values = T::slice_mut(&mut self.columns[pos].1).ok_or_else(|| not_found(column))?;
        let slot = values.get_mut(row).ok_or(Error::RowOutOfBounds { row, rows })?;
        *slot = value;
        Ok(())
    }

    /// Remove a column. Later columns shift down by one position.
    pub fn delete<T: Element>(&mut self, column: &Column<T>) -> Result<()> {
        let pos = self.position(column)?;
        let (key, _) = self.columns.remove(pos);
        self.index.remove(&key);
        for p in self.index.values_mut() {
            if *p > pos {
                *p -= 1;
            }
        }
        Ok(())
    }

    /// Replace `column` with a column of `S` values computed row by row.
    ///
    /// The new column keeps the source name and is appended after the other
    /// columns. If any row fails, the dataset is left exactly as it was and
    /// the first failure is returned as [`Error::Conversion`].
    ///
    /// # Errors
    ///
    /// - [`Error::ColumnNotFound`] if `column` is not in the dataset.
    /// - [`Error::ColumnExists`] if another column already has the target
    ///   identity.
    /// - [`Error::Conversion`] if `f` fails for some row.
    pub fn convert<T, S, E, F>(&mut self, column: &Column<T>, mut f: F) -> Result<Column<S>>
    where
        T: Element,
        S: Element,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        F: FnMut(&T) -> std::result::Result<S, E>,
    {
        let target = Column::<S>::new(column.name());
        if target.key() != column.key() && self.index.contains_key(target.key()) {
            return Err(Error::ColumnExists { column: target.to_string() });
        }

        let converted = self
            .values(column)?
            .iter()
            .enumerate()
            .map(|(row, v)| {
                f(v).map_err(|e| Error::Conversion { column: column.to_string(), row, source: e.into() })
            })
            .collect::<Result<Vec<S>>>()?;

        self.delete(column)?;
        self.push(target.key().clone(), S::wrap(converted));
        target.remember(self.columns.len() - 1);
        tracing::debug!(from = %column, to = %target, rows = self.rows, "converted column");
        Ok(target)
    }

    /// Parse a string column into any element type implementing [`FromStr`].
    ///
    /// ```
    /// use trueno_ggg::grammar::{Column, Dataset};
    ///
    /// let mut d = Dataset::new();
    /// let raw = Column::<String>::new("n");
    /// d.add_column(&raw);
    /// for row in d.grow(2) {
    ///     d.set(&raw, row, format!("{}", row + 40)).unwrap();
    /// }
    /// let n = d.parse::<i64>(&raw).unwrap();
    /// assert_eq!(d.values(&n).unwrap(), &[40, 41]);
    /// assert!(!d.contains(&raw));
    /// ```
    pub fn parse<S>(&mut self, column: &Column<String>) -> Result<Column<S>>
    where
        S: Element + FromStr,
        S::Err: std::error::Error + Send + Sync + 'static,
    {
        self.convert(column, |s: &String| s.parse::<S>())
    }

    /// Type-erased view of the cell at (`column` position, `row`).
    #[must_use]
    pub fn value(&self, column: usize, row: usize) -> Option<Value<'_>> {
        self.columns.get(column)?.1.value(row)
    }

    /// Resolve a handle to a column position.
    ///
    /// The cached position is used only when the column stored there has the
    /// handle's identity. Otherwise the identity map is consulted and the
    /// cache refreshed.
    fn position<T: Element>(&self, column: &Column<T>) -> Result<usize> {
        let cached = column.cached();
        if let Some((key, _)) = self.columns.get(cached) {
            if key == column.key() {
                return Ok(cached);
            }
        }
        let pos = *self.index.get(column.key()).ok_or_else(|| not_found(column))?;
        column.remember(pos);
        Ok(pos)
    }

    fn push(&mut self, key: ColumnKey, data: ColumnData) {
        self.index.insert(key.clone(), self.columns.len());
        self.columns.push((key, data));
    }
}

fn not_found<T>(column: &Column<T>) -> Error {
    Error::ColumnNotFound { column: column.to_string() }
}

impl fmt::Display for Dataset {
    /// Column-aligned table: header, separator, then every row when there
    /// are fewer than 20, otherwise the first 10, `...` and the last 10.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_ids: Vec<Option<usize>> = if self.rows < PRINT_ALL_BELOW {
            (0..self.rows).map(Some).collect()
        } else {
            (0..PRINT_EDGE)
                .map(Some)
                .chain(std::iter::once(None))
                .chain((self.rows - PRINT_EDGE..self.rows).map(Some))
                .collect()
        };

        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|(key, data)| {
                let mut col = vec![key.name().to_string(), "-".to_string()];
                col.extend(row_ids.iter().map(|id| match id {
                    Some(row) => data.value(*row).map(|v| v.to_string()).unwrap_or_default(),
                    None => "...".to_string(),
                }));
                col
            })
            .collect();
        let widths: Vec<usize> =
            cells.iter().map(|col| col.iter().map(|c| c.chars().count()).max().unwrap_or(0)).collect();

        for line in 0..row_ids.len() + 2 {
            for (i, col) in cells.iter().enumerate() {
                if i + 1 == cells.len() {
                    f.write_str(&col[line])?;
                } else {
                    write!(f, "{:<width$}", col[line], width = widths[i] + 2)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(n: usize) -> (Dataset, Column<f64>, Column<i64>) {
        let mut d = Dataset::new();
        let x = Column::<f64>::new("x");
        let y = Column::<i64>::new("y");
        d.add_column(&x);
        d.add_column(&y);
        for row in d.grow(n) {
            d.set(&x, row, row as f64 * 0.5).unwrap();
            d.set(&y, row, row as i64).unwrap();
        }
        (d, x, y)
    }

    #[test]
    fn test_add_column_backfills() {
        let (mut d, _, _) = xy(3);
        let z = Column::<String>::new("z");
        assert!(d.add_column(&z));
        assert_eq!(d.values(&z).unwrap(), &[String::new(), String::new(), String::new()]);
        assert!(!d.add_column(&z));
        assert!(!d.add_column(&Column::<String>::new("z")));
        assert_eq!(d.column_count(), 3);
    }

    #[test]
    fn test_same_name_different_kind() {
        let mut d = Dataset::new();
        assert!(d.add_column(&Column::<f64>::new("v")));
        assert!(d.add_column(&Column::<i64>::new("v")));
        assert_eq!(d.column_names().collect::<Vec<_>>(), vec!["v", "v"]);
    }

    #[test]
    fn test_grow_returns_new_rows() {
        let (mut d, x, _) = xy(2);
        assert_eq!(d.grow(3), 2..5);
        assert_eq!(d.rows(), 5);
        assert_eq!(d.values(&x).unwrap().len(), 5);
        assert_eq!(d.grow(0), 5..5);
    }

    #[test]
    fn test_get_set_errors() {
        let (mut d, x, _) = xy(2);
        assert!(matches!(d.get(&x, 2), Err(Error::RowOutOfBounds { row: 2, rows: 2 })));
        assert!(matches!(d.set(&x, 9, 1.0), Err(Error::RowOutOfBounds { .. })));
        let missing = Column::<f64>::new("nope");
        assert!(matches!(d.get(&missing, 0), Err(Error::ColumnNotFound { .. })));
        assert!(!d.contains(&missing));
        d.set(&x, 1, 9.0).unwrap();
        assert_eq!(*d.get_ref(&x, 1).unwrap(), 9.0);
    }

    #[test]
    fn test_stale_cache_rechecks_identity() {
        let (mut d, x, y) = xy(3);
        assert_eq!(d.get(&y, 2).unwrap(), 2);
        // x is at position 0; deleting it moves y down.
        d.delete(&x).unwrap();
        assert_eq!(d.get(&y, 2).unwrap(), 2);
        assert!(matches!(d.get(&x, 0), Err(Error::ColumnNotFound { .. })));

        // A different column at the old position must not be read through x.
        let other = Column::<f64>::new("other");
        d.add_column(&other);
        d.set(&other, 0, 42.0).unwrap();
        assert!(d.get(&x, 0).is_err());
        assert!(d.set(&x, 0, 1.0).is_err());
        assert_eq!(d.get(&other, 0).unwrap(), 42.0);
    }

    #[test]
    fn test_delete_repairs_positions() {
        let mut d = Dataset::new();
        let cols: Vec<Column<u8>> = (0..4).map(|i| Column::new(format!("c{i}"))).collect();
        for c in &cols {
            d.add_column(c);
        }
        d.grow(1);
        for (i, c) in cols.iter().enumerate() {
            d.set(c, 0, i as u8).unwrap();
        }
        d.delete(&cols[1]).unwrap();
        // Fresh handles have no cache and go through the identity map.
        for i in [0usize, 2, 3] {
            let fresh = Column::<u8>::new(format!("c{i}"));
            assert_eq!(d.get(&fresh, 0).unwrap(), i as u8);
        }
        assert!(d.delete(&cols[1]).is_err());
    }

    #[test]
    fn test_convert_success_replaces_column() {
        let (mut d, _, y) = xy(3);
        let s = d.convert(&y, |v: &i64| Ok::<_, std::convert::Infallible>(format!("#{v}"))).unwrap();
        assert!(!d.contains(&y));
        assert_eq!(s.name(), "y");
        assert_eq!(d.values(&s).unwrap(), &["#0".to_string(), "#1".to_string(), "#2".to_string()]);
        assert_eq!(d.column_count(), 2);
    }

    #[test]
    fn test_convert_failure_leaves_dataset_unchanged() {
        let mut d = Dataset::new();
        let raw = Column::<String>::new("n");
        d.add_column(&raw);
        for (row, s) in d.grow(3).zip(["1", "x", "3"]) {
            d.set(&raw, row, s.to_string()).unwrap();
        }
        let before: Vec<String> = d.column_names().map(str::to_string).collect();

        let err = d.parse::<i64>(&raw).unwrap_err();
        assert!(matches!(err, Error::Conversion { row: 1, .. }));
        assert_eq!(d.column_names().map(str::to_string).collect::<Vec<_>>(), before);
        assert_eq!(d.get(&raw, 1).unwrap(), "x");
        assert!(!d.contains(&Column::<i64>::new("n")));
    }

    #[test]
    fn test_parse_format_round_trip_extremes() {
        let mut d = Dataset::new();
        let raw = Column::<String>::new("n");
        d.add_column(&raw);
        let values = [i64::MAX, -7, 0, i64::MIN];
        for (row, v) in d.grow(values.len()).zip(values) {
            d.set(&raw, row, v.to_string()).unwrap();
        }

        let n = d.parse::<i64>(&raw).unwrap();
        assert_eq!(d.get(&n, 0).unwrap(), i64::MAX);
        let back = d.convert(&n, |v: &i64| Ok::<_, std::convert::Infallible>(v.to_string())).unwrap();
        assert_eq!(back.name(), "n");
        assert_eq!(d.get(&back, 0).unwrap(), "9223372036854775807");
        assert_eq!(d.get(&back, 3).unwrap(), i64::MIN.to_string());
        assert_eq!(d.column_count(), 1);
    }

    #[test]
    fn test_convert_target_exists() {
        let mut d = Dataset::new();
        let a = Column::<i64>::new("a");
        let b = Column::<f64>::new("a");
        d.add_column(&a);
        d.add_column(&b);
        let res = d.convert(&a, |v: &i64| Ok::<f64, std::convert::Infallible>(*v as f64));
        assert!(matches!(res, Err(Error::ColumnExists { .. })));
        assert!(d.contains(&a));
    }

    #[test]
    fn test_parse_float_and_uint() {
        let mut d = Dataset::new();
        let raw = Column::<String>::new("v");
        d.add_column(&raw);
        d.grow(1);
        d.set(&raw, 0, "2.5".to_string()).unwrap();
        let v = d.parse::<f64>(&raw).unwrap();
        assert_eq!(d.get(&v, 0).unwrap(), 2.5);

        let raw = Column::<String>::new("u");
        d.add_column(&raw);
        d.set(&raw, 0, "-1".to_string()).unwrap();
        assert!(d.parse::<u64>(&raw).is_err());
    }

    #[test]
    fn test_value_cell_view() {
        let (d, _, _) = xy(2);
        assert_eq!(d.value(0, 1), Some(Value::F64(0.5)));
        assert_eq!(d.value(1, 1), Some(Value::Int(1)));
        assert_eq!(d.value(2, 0), None);
        assert_eq!(d.value(0, 2), None);
    }

    #[test]
    fn test_display_small() {
        let (d, _, _) = xy(2);
        let out = d.to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "x    y");
        assert_eq!(lines[1], "-    -");
        assert_eq!(lines[2], "0    0");
        assert_eq!(lines[3], "0.5  1");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_display_elides_long() {
        let (d, _, _) = xy(25);
        let out = d.to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2 + 10 + 1 + 10);
        assert!(lines[12].starts_with("..."));
        assert!(lines[13].ends_with("15"));
        assert!(lines[22].ends_with("24"));
    }
}
