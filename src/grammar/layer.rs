//! Layers: one dataset, X/Y columns, optional statistic and a geometry.
//!
//! Rendering a layer is split in two. [`AnyLayer::prepare`] does all the
//! fallible work (validation, filtering, grouping, sorting, aggregation and
//! styling) and yields data-space marks. [`PreparedLayer::draw`] then maps
//! marks through the axis scales onto a canvas and cannot fail, so a plot
//! either draws every layer or none.

use super::column::Column;
use super::data::Dataset;
use super::filter::Filter;
use super::geom::{Geom, GeomKind, Mark};
use super::series::group_series;
use super::stat::Statistic;
use super::theme::Theme;
use super::value::{Key, Scalar};
use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::scale::Scale;

/// Type-erased layer, as stored by a [`Plot`](super::Plot).
pub trait AnyLayer {
    /// Validate the layer and compute its styled marks.
    fn prepare(&self, theme: &Theme) -> Result<PreparedLayer>;
}

/// Layer over X values of type `X` and Y values of type `Y`.
///
/// # Example
///
/// ```
/// use trueno_ggg::grammar::{AnyLayer, Column, Dataset, Geom, Layer, Mapping, Statistic, Theme};
///
/// let mut d = Dataset::new();
/// let x = Column::<i64>::new("x");
/// let y = Column::<f64>::new("y");
/// d.add_column(&x);
/// d.add_column(&y);
/// for row in d.grow(4) {
///     d.set(&x, row, (row / 2) as i64).unwrap();
///     d.set(&y, row, row as f64).unwrap();
/// }
///
/// let layer = Layer::new()
///     .data(&d)
///     .x(&x)
///     .y(&y)
///     .stat(Statistic::mean())
///     .geom(Geom::point(Mapping::palette(0), Mapping::constant(3.0)));
/// let prepared = layer.prepare(&Theme::grey()).unwrap();
/// assert_eq!(prepared.y_range(), Some((0.5, 2.5)));
/// ```
#[derive(Debug)]
pub struct Layer<'a, X, Y> {
    data: Option<&'a Dataset>,
    x: Option<Column<X>>,
    y: Option<Column<Y>>,
    stat: Option<Statistic>,
    geom: Option<Geom>,
    filter: Option<Filter>,
}

impl<X, Y> Default for Layer<'_, X, Y> {
    fn default() -> Self {
        Self { data: None, x: None, y: None, stat: None, geom: None, filter: None }
    }
}

impl<'a, X: Scalar, Y: Scalar> Layer<'a, X, Y> {
    /// Empty layer; every part must be set before rendering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dataset.
    #[must_use]
    pub fn data(mut self, data: &'a Dataset) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the X column.
    #[must_use]
    pub fn x(mut self, column: &Column<X>) -> Self {
        self.x = Some(column.clone());
        self
    }

    /// Set the Y column.
    #[must_use]
    pub fn y(mut self, column: &Column<Y>) -> Self {
        self.y = Some(column.clone());
        self
    }

    /// Aggregate Y over runs of equal X.
    #[must_use]
    pub fn stat(mut self, stat: Statistic) -> Self {
        self.stat = Some(stat);
        self
    }

    /// Set the geometry.
    #[must_use]
    pub fn geom(mut self, geom: Geom) -> Self {
        self.geom = Some(geom);
        self
    }

    /// Only use rows accepted by `filter`.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    fn validate(&self) -> Result<(&'a Dataset, &Column<X>, &Column<Y>, &Geom)> {
        let geom = self.geom.as_ref().ok_or(Error::MissingGeom)?;
        let data = self.data.ok_or(Error::MissingData)?;
        let x = self.x.as_ref().ok_or(Error::MissingXColumn)?;
        let y = self.y.as_ref().ok_or(Error::MissingYColumn)?;
        match &self.stat {
            None if geom.dimensions() != 1 => {
                return Err(Error::MissingStatistic { dims: geom.dimensions() });
            }
            Some(stat) if stat.dimensions() != geom.dimensions() => {
                return Err(Error::DimensionMismatch { geom: geom.dimensions(), stat: stat.dimensions() });
            }
            _ => {}
        }
        Ok((data, x, y, geom))
    }
}

impl<X: Scalar, Y: Scalar> AnyLayer for Layer<'_, X, Y> {
    fn prepare(&self, theme: &Theme) -> Result<PreparedLayer> {
        let (data, x, y, geom) = self.validate()?;
        tracing::trace!("layer {} ~ {} validated", y, x);

        let xs = data.values(x)?;
        let ys = data.values(y)?;
        let rows = match &self.filter {
            Some(filter) => filter.rows(data)?,
            None => (0..data.rows()).collect(),
        };

        let mut groups = group_series(rows, data.rows(), |row| geom.grouping(data, row))?;
        tracing::trace!("layer grouped");
        tracing::debug!("layer {} ~ {}: {} series", y, x, groups.len());

        for s in &mut groups {
            s.sort_by_xy(xs, ys);
        }
        tracing::trace!("layer sorted");

        let dims = geom.dimensions();
        let mut series = Vec::with_capacity(groups.len());
        for s in &groups {
            let mut marks = Vec::new();
            match &self.stat {
                None => {
                    for &row in s.rows() {
                        let (color, size) = geom.style(data, row, theme)?;
                        marks.push(Mark { row, x: xs[row].to_f64(), ys: vec![ys[row].to_f64()], color, size });
                    }
                }
                Some(stat) => {
                    for (row, run) in s.x_runs(xs) {
                        let mut out = vec![0.0; dims];
                        stat.apply_into(run.iter().map(|&r| ys[r]), &mut out);
                        let (color, size) = geom.style(data, row, theme)?;
                        marks.push(Mark { row, x: xs[row].to_f64(), ys: out, color, size });
                    }
                }
            }
            series.push(PreparedSeries { key: s.key().clone(), marks });
        }
        if let Some(stat) = &self.stat {
            tracing::trace!("layer aggregated with {}", stat.name());
        }

        Ok(PreparedLayer { kind: geom.kind(), series })
    }
}

/// Styled marks of one series, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSeries {
    key: Key,
    marks: Vec<Mark>,
}

impl PreparedSeries {
    /// Grouping key of the series.
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Marks sorted by X.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }
}

/// A validated layer, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedLayer {
    kind: GeomKind,
    series: Vec<PreparedSeries>,
}

impl PreparedLayer {
    /// Geometry type.
    #[must_use]
    pub const fn kind(&self) -> GeomKind {
        self.kind
    }

    /// Series in first-seen order.
    #[must_use]
    pub fn series(&self) -> &[PreparedSeries] {
        &self.series
    }

    /// Total number of marks.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.series.iter().map(|s| s.marks.len()).sum()
    }

    /// Extent of finite mark X values, `None` if there are none.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        extent(self.marks().map(|m| m.x))
    }

    /// Extent of finite mark Y values across all dimensions.
    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        extent(self.marks().flat_map(|m| m.ys.iter().copied()))
    }

    /// Draw every series onto `canvas`.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        x_scale: &dyn Scale<f64, f64>,
        y_scale: &dyn Scale<f64, f64>,
        scale_factor: f64,
    ) {
        for s in &self.series {
            self.kind.draw(&s.marks, canvas, x_scale, y_scale, scale_factor);
        }
        tracing::trace!("layer drawn");
    }

    fn marks(&self) -> impl Iterator<Item = &Mark> + '_ {
        self.series.iter().flat_map(|s| s.marks.iter())
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::color::Rgba;
    use crate::grammar::Mapping;
    use crate::scale::LinearScale;

    struct Fixture {
        d: Dataset,
        x: Column<f64>,
        y: Column<f64>,
        s: Column<String>,
    }

    fn fixture() -> Fixture {
        let mut d = Dataset::new();
        let x = Column::<f64>::new("x");
        let y = Column::<f64>::new("y");
        let s = Column::<String>::new("s");
        d.add_column(&x);
        d.add_column(&y);
        d.add_column(&s);
        let rows = [(2.0, 1.0, "b"), (1.0, 4.0, "a"), (1.0, 2.0, "a"), (2.0, 3.0, "a"), (1.0, 9.0, "b")];
        for (row, (xv, yv, sv)) in d.grow(rows.len()).zip(rows) {
            d.set(&x, row, xv).unwrap();
            d.set(&y, row, yv).unwrap();
            d.set(&s, row, sv.to_string()).unwrap();
        }
        Fixture { d, x, y, s }
    }

    fn points() -> Geom {
        Geom::point(Mapping::constant(Rgba::BLACK), Mapping::constant(1.0))
    }

    #[test]
    fn test_validation_order() {
        let f = fixture();
        let th = Theme::grey();
        let err = Layer::<f64, f64>::new().prepare(&th).unwrap_err();
        assert!(matches!(err, Error::MissingGeom));
        let err = Layer::<f64, f64>::new().geom(points()).prepare(&th).unwrap_err();
        assert!(matches!(err, Error::MissingData));
        let err = Layer::<f64, f64>::new().geom(points()).data(&f.d).prepare(&th).unwrap_err();
        assert!(matches!(err, Error::MissingXColumn));
        let err = Layer::<f64, f64>::new().geom(points()).data(&f.d).x(&f.x).prepare(&th).unwrap_err();
        assert!(matches!(err, Error::MissingYColumn));
    }

    #[test]
    fn test_dimension_guards() {
        let f = fixture();
        let th = Theme::grey();
        let bars = || Geom::error_bar(Mapping::constant(Rgba::BLACK), Mapping::constant(1.0));

        let err = Layer::new().data(&f.d).x(&f.x).y(&f.y).geom(bars()).prepare(&th).unwrap_err();
        assert!(matches!(err, Error::MissingStatistic { dims: 2 }));

        let err = Layer::new().data(&f.d).x(&f.x).y(&f.y).geom(bars()).stat(Statistic::mean()).prepare(&th);
        assert!(matches!(err, Err(Error::DimensionMismatch { geom: 2, stat: 1 })));

        let err = Layer::new()
            .data(&f.d)
            .x(&f.x)
            .y(&f.y)
            .geom(points())
            .stat(Statistic::confidence(0.9).unwrap())
            .prepare(&th);
        assert!(matches!(err, Err(Error::DimensionMismatch { geom: 1, stat: 2 })));

        let ok = Layer::new()
            .data(&f.d)
            .x(&f.x)
            .y(&f.y)
            .geom(bars())
            .stat(Statistic::confidence_normal(0.9).unwrap())
            .prepare(&th)
            .unwrap();
        assert_eq!(ok.kind(), GeomKind::ErrorBar);
        assert!(ok.series()[0].marks().iter().all(|m| m.ys.len() == 2));
    }

    #[test]
    fn test_missing_column_in_dataset() {
        let f = fixture();
        let ghost = Column::<f64>::new("ghost");
        let err = Layer::new().data(&f.d).x(&f.x).y(&ghost).geom(points()).prepare(&Theme::grey());
        assert!(matches!(err, Err(Error::ColumnNotFound { .. })));
    }

    #[test]
    fn test_series_grouped_and_sorted() {
        let f = fixture();
        let geom = Geom::line(Mapping::nice_colors(&f.s), Mapping::constant(2.0));
        let layer = Layer::new().data(&f.d).x(&f.x).y(&f.y).geom(geom);
        let prepared = layer.prepare(&Theme::spaceage()).unwrap();

        assert_eq!(prepared.series().len(), 2);
        let b = &prepared.series()[0];
        assert_eq!(b.key(), &Key::pair(Key::Str("b".into()), Key::Unit));
        let b_rows: Vec<usize> = b.marks().iter().map(|m| m.row).collect();
        assert_eq!(b_rows, vec![4, 0]);

        let a_rows: Vec<usize> = prepared.series()[1].marks().iter().map(|m| m.row).collect();
        assert_eq!(a_rows, vec![2, 1, 3]);
        assert_eq!(prepared.mark_count(), 5);
        assert_eq!(prepared.x_range(), Some((1.0, 2.0)));
        assert_eq!(prepared.y_range(), Some((1.0, 9.0)));
    }

    #[test]
    fn test_statistic_per_x_run() {
        let f = fixture();
        let layer = Layer::new().data(&f.d).x(&f.x).y(&f.y).geom(points()).stat(Statistic::sum());
        let prepared = layer.prepare(&Theme::grey()).unwrap();
        let marks = prepared.series()[0].marks();
        assert_eq!(marks.len(), 2);
        // x = 1: rows 2, 1, 4 -> 2 + 4 + 9
        assert_eq!((marks[0].x, marks[0].ys[0], marks[0].row), (1.0, 15.0, 2));
        assert_eq!((marks[1].x, marks[1].ys[0]), (2.0, 4.0));
    }

    #[test]
    fn test_filter_excludes_rows() {
        let f = fixture();
        let layer = Layer::new()
            .data(&f.d)
            .x(&f.x)
            .y(&f.y)
            .geom(points())
            .filter(Filter::equal_to(&f.s, "a".to_string()));
        let prepared = layer.prepare(&Theme::grey()).unwrap();
        assert_eq!(prepared.mark_count(), 3);
        assert_eq!(prepared.y_range(), Some((2.0, 4.0)));
    }

    #[test]
    fn test_empty_dataset() {
        let mut d = Dataset::new();
        let x = Column::<i32>::new("x");
        let y = Column::<i32>::new("y");
        d.add_column(&x);
        d.add_column(&y);
        let prepared = Layer::new().data(&d).x(&x).y(&y).geom(points()).prepare(&Theme::grey()).unwrap();
        assert!(prepared.series().is_empty());
        assert_eq!(prepared.x_range(), None);
    }

    #[test]
    fn test_draw_lines() {
        let f = fixture();
        let geom = Geom::line(Mapping::palette(0), Mapping::constant(1.0));
        let prepared = Layer::new().data(&f.d).x(&f.x).y(&f.y).geom(geom).prepare(&Theme::grey()).unwrap();
        let mut canvas = RecordingCanvas::new(10, 10);
        let sx = LinearScale::new((1.0, 2.0), (0.0, 10.0));
        let sy = LinearScale::new((9.0, 1.0), (0.0, 10.0));
        prepared.draw(&mut canvas, &sx, &sy, 1.0);
        assert_eq!(canvas.stroke_count(), 4);
    }
}
