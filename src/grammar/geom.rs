//! Geometries: the visual primitive a layer draws.
//!
//! A geometry owns a color and a size [`Mapping`]. Their selectors form the
//! layer's grouping key, and their scales style each mark.

use super::aes::Mapping;
use super::data::Dataset;
use super::theme::Theme;
use super::value::Key;
use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::error::Result;
use crate::scale::Scale;

/// Geometry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeomKind {
    /// Filled dots; size is the radius.
    Point,
    /// Segments between consecutive marks of a series; size is the width.
    Line,
    /// Vertical stroke from `lo` to `hi`; size is the width.
    ErrorBar,
}

impl GeomKind {
    /// Number of Y values each mark carries.
    #[must_use]
    pub const fn dimensions(self) -> usize {
        match self {
            GeomKind::Point | GeomKind::Line => 1,
            GeomKind::ErrorBar => 2,
        }
    }

    /// Draw one series of marks in device space.
    ///
    /// `scale_factor` multiplies mark sizes so output density tracks the
    /// image resolution.
    pub fn draw(
        self,
        marks: &[Mark],
        canvas: &mut dyn Canvas,
        x_scale: &dyn Scale<f64, f64>,
        y_scale: &dyn Scale<f64, f64>,
        scale_factor: f64,
    ) {
        match self {
            GeomKind::Point => {
                for m in marks {
                    let size = 2.0 * scale_factor * m.size;
                    canvas.draw_point(x_scale.scale(m.x), y_scale.scale(m.ys[0]), m.color, size);
                }
            }
            GeomKind::Line => {
                for pair in marks.windows(2) {
                    let (prev, cur) = (&pair[0], &pair[1]);
                    canvas.move_to(x_scale.scale(prev.x), y_scale.scale(prev.ys[0]));
                    canvas.line_to(x_scale.scale(cur.x), y_scale.scale(cur.ys[0]));
                    canvas.stroke(cur.color, scale_factor * cur.size);
                }
            }
            GeomKind::ErrorBar => {
                for m in marks {
                    let dx = x_scale.scale(m.x);
                    canvas.move_to(dx, y_scale.scale(m.ys[0]));
                    canvas.line_to(dx, y_scale.scale(m.ys[1]));
                    canvas.stroke(m.color, scale_factor * m.size);
                }
            }
        }
    }
}

/// One styled data-space mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    /// Row the mark's style came from.
    pub row: usize,
    /// X coordinate.
    pub x: f64,
    /// Y values, one per geometry dimension.
    pub ys: Vec<f64>,
    /// Mark color.
    pub color: Rgba,
    /// Mark size before resolution scaling.
    pub size: f64,
}

/// Geometry with its color and size mappings.
#[derive(Debug)]
pub struct Geom {
    kind: GeomKind,
    color: Mapping<Rgba>,
    size: Mapping<f64>,
}

impl Geom {
    /// Geometry of `kind` styled by the given mappings.
    #[must_use]
    pub fn new(kind: GeomKind, color: Mapping<Rgba>, size: Mapping<f64>) -> Self {
        Self { kind, color, size }
    }

    /// Points with radius from `size`.
    #[must_use]
    pub fn point(color: Mapping<Rgba>, size: Mapping<f64>) -> Self {
        Self::new(GeomKind::Point, color, size)
    }

    /// Lines with width from `size`.
    #[must_use]
    pub fn line(color: Mapping<Rgba>, size: Mapping<f64>) -> Self {
        Self::new(GeomKind::Line, color, size)
    }

    /// Vertical interval bars with width from `size`.
    #[must_use]
    pub fn error_bar(color: Mapping<Rgba>, size: Mapping<f64>) -> Self {
        Self::new(GeomKind::ErrorBar, color, size)
    }

    /// Geometry type.
    #[must_use]
    pub const fn kind(&self) -> GeomKind {
        self.kind
    }

    /// Number of Y values each mark carries.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.kind.dimensions()
    }

    /// Series key of `row`: the pair of color and size selector keys.
    pub fn grouping(&self, data: &Dataset, row: usize) -> Result<Key> {
        Ok(Key::pair(self.color.select(data, row)?, self.size.select(data, row)?))
    }

    /// Color and size of the mark styled by `row`.
    pub fn style(&self, data: &Dataset, row: usize, theme: &Theme) -> Result<(Rgba, f64)> {
        Ok((self.color.scale(data, row, theme)?, self.size.scale(data, row, theme)?))
    }
}
