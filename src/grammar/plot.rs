//! Plot: layers plus presentation, rendered onto a canvas.
//!
//! Rendering prepares every layer before anything is drawn, so a
//! configuration error anywhere yields no output at all.

use super::aes::Mapping;
use super::column::{Column, Element};
use super::data::Dataset;
use super::geom::Geom;
use super::layer::{AnyLayer, Layer, PreparedLayer};
use super::theme::Theme;
use super::value::Scalar;
use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::scale::{AxisScale, Scale};
use crate::ticks::DEFAULT_TICK_COUNT;

/// Reference resolution for the stroke scale factor.
const BASE_PIXELS: f64 = 1080.0 * 720.0;

/// Presentation options for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisOptions {
    /// Axis title.
    pub title: String,
    /// Fixed `(min, max)` instead of the data range.
    pub limits: Option<(f64, f64)>,
    /// Logarithmic axis in this base.
    pub log_base: Option<u32>,
    /// Explicit tick positions; empty means generated ticks.
    pub ticks: Vec<f64>,
}

impl AxisOptions {
    /// Axis with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    /// Fix the axis range.
    #[must_use]
    pub fn limits(mut self, min: f64, max: f64) -> Self {
        self.limits = Some((min, max));
        self
    }

    /// Use a logarithmic scale.
    #[must_use]
    pub fn log_scale(mut self, base: u32) -> Self {
        self.log_base = Some(base);
        self
    }

    /// Use explicit tick positions.
    #[must_use]
    pub fn ticks(mut self, ticks: impl IntoIterator<Item = f64>) -> Self {
        self.ticks = ticks.into_iter().collect();
        self
    }
}

/// Non-data plot settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Presentation {
    /// Plot title.
    pub title: String,
    /// X axis.
    pub x: AxisOptions,
    /// Y axis.
    pub y: AxisOptions,
    /// Legend visibility.
    pub legend: bool,
}

/// Pixel geometry of a plot of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Image width.
    pub width: f64,
    /// Image height.
    pub height: f64,
    /// Space above the chart.
    pub pad_top: f64,
    /// Space left of the chart.
    pub pad_left: f64,
    /// Space right of the chart.
    pub pad_right: f64,
    /// Space below the chart.
    pub pad_bottom: f64,
    /// Stroke and mark size multiplier, at least 1.
    pub scale_factor: f64,
}

impl Layout {
    /// Layout for a `width` x `height` image.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            width: w,
            height: h,
            pad_top: w / 10.0,
            pad_left: h / 8.0,
            pad_right: w / 20.0,
            pad_bottom: h / 8.0,
            scale_factor: (w * h / BASE_PIXELS).sqrt().round().max(1.0),
        }
    }

    /// Left device coordinate of the chart area.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.pad_left
    }

    /// Right device coordinate of the chart area.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.width - self.pad_right
    }

    /// Top device coordinate of the chart area.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.pad_top
    }

    /// Bottom device coordinate of the chart area.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.height - self.pad_bottom
    }
}

/// Axis scales and ticks resolved for one render.
#[derive(Debug, Clone)]
pub struct Axes {
    /// X scale (data to device).
    pub x: AxisScale,
    /// Y scale (data to device, inverted).
    pub y: AxisScale,
    /// X tick positions in data space.
    pub x_ticks: Vec<f64>,
    /// Y tick positions in data space.
    pub y_ticks: Vec<f64>,
}

/// A plot: ordered layers and presentation options.
///
/// # Example
///
/// ```
/// use trueno_ggg::grammar::{AxisOptions, Column, Dataset, Plot, Theme};
///
/// let mut d = Dataset::new();
/// let x = Column::<f64>::new("x");
/// let y = Column::<f64>::new("y");
/// let s = Column::<String>::new("series");
/// d.add_column(&x);
/// d.add_column(&y);
/// d.add_column(&s);
/// for row in d.grow(6) {
///     d.set(&x, row, (row % 3) as f64).unwrap();
///     d.set(&y, row, (row * row) as f64).unwrap();
///     d.set(&s, row, if row < 3 { "a" } else { "b" }.to_string()).unwrap();
/// }
///
/// let plot = Plot::line_plot(&d, &x, &y, &s).title("growth").x_axis(AxisOptions::new("x"));
/// let fb = plot.render(&Theme::spaceage(), 320, 240).unwrap();
/// assert_eq!(fb.width(), 320);
/// ```
#[derive(Default)]
pub struct Plot<'a> {
    layers: Vec<Box<dyn AnyLayer + 'a>>,
    presentation: Presentation,
}

impl<'a> Plot<'a> {
    /// Empty plot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line plot of `y` against `x` with one colored line per distinct
    /// `series` value.
    #[must_use]
    pub fn line_plot<X: Scalar, Y: Scalar, S: Element>(
        data: &'a Dataset,
        x: &Column<X>,
        y: &Column<Y>,
        series: &Column<S>,
    ) -> Self {
        Self::new().layer(
            Layer::new().data(data).x(x).y(y).geom(Geom::line(Mapping::nice_colors(series), Mapping::constant(2.0))),
        )
    }

    /// Append a layer; later layers draw on top.
    #[must_use]
    pub fn layer(mut self, layer: impl AnyLayer + 'a) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.presentation.title = title.into();
        self
    }

    /// Set X axis options.
    #[must_use]
    pub fn x_axis(mut self, axis: AxisOptions) -> Self {
        self.presentation.x = axis;
        self
    }

    /// Set Y axis options.
    #[must_use]
    pub fn y_axis(mut self, axis: AxisOptions) -> Self {
        self.presentation.y = axis;
        self
    }

    /// Show or hide the legend.
    #[must_use]
    pub fn legend(mut self, visible: bool) -> Self {
        self.presentation.legend = visible;
        self
    }

    /// Presentation options.
    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Prepare every layer, stopping at the first error.
    pub fn prepare(&self, theme: &Theme) -> Result<Vec<PreparedLayer>> {
        self.layers.iter().map(|l| l.prepare(theme)).collect()
    }

    /// Resolve axis scales and ticks for `prepared` layers in `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] when a logarithmic axis has a
    /// non-positive domain.
    pub fn axes(&self, prepared: &[PreparedLayer], layout: &Layout) -> Result<Axes> {
        let (x_min, x_max) = axis_domain(&self.presentation.x, prepared.iter().filter_map(PreparedLayer::x_range));
        let (y_min, y_max) = axis_domain(&self.presentation.y, prepared.iter().filter_map(PreparedLayer::y_range));
        check_log_domain("X", &self.presentation.x, x_min, x_max)?;
        check_log_domain("Y", &self.presentation.y, y_min, y_max)?;

        let x = AxisScale::new(self.presentation.x.log_base, (x_min, x_max), (layout.left(), layout.right()))?;
        let y = AxisScale::new(self.presentation.y.log_base, (y_max, y_min), (layout.top(), layout.bottom()))?;
        let x_ticks = axis_ticks(&self.presentation.x, &x);
        let y_ticks = axis_ticks(&self.presentation.y, &y);
        tracing::debug!("x ticks {:?}, y ticks {:?}", x_ticks, y_ticks);
        Ok(Axes { x, y, x_ticks, y_ticks })
    }

    fn resolve(&self, theme: &Theme, layout: &Layout) -> Result<(Vec<PreparedLayer>, Option<Axes>)> {
        let resolved = self.prepare(theme).and_then(|prepared| {
            let axes = if prepared.is_empty() { None } else { Some(self.axes(&prepared, layout)?) };
            Ok((prepared, axes))
        });
        match resolved {
            Err(e) if e.is_configuration() => {
                tracing::warn!(error = %e, layers = self.layers.len(), "plot rejected before drawing");
                Err(e)
            }
            other => other,
        }
    }

    /// Render to a new `width` x `height` framebuffer.
    ///
    /// Each layer is rasterized into its own transparent buffer and
    /// composited over the frame.
    ///
    /// # Errors
    ///
    /// Returns the first layer or axis error; nothing is drawn in that case.
    pub fn render(&self, theme: &Theme, width: u32, height: u32) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(width, height)?;
        let layout = Layout::new(width, height);
        let (prepared, axes) = self.resolve(theme, &layout)?;

        draw_frame(&mut fb, theme, &layout, axes.as_ref());
        if let Some(axes) = &axes {
            for layer in &prepared {
                let mut buf = Framebuffer::new(width, height)?;
                layer.draw(&mut buf, &axes.x, &axes.y, layout.scale_factor);
                fb.composite(&buf)?;
            }
        }
        Ok(fb)
    }

    /// Render onto an existing canvas, sized by the canvas.
    ///
    /// # Errors
    ///
    /// Returns the first layer or axis error before any draw call is made.
    pub fn render_to(&self, canvas: &mut dyn Canvas, theme: &Theme) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let layout = Layout::new(width, height);
        let (prepared, axes) = self.resolve(theme, &layout)?;

        draw_frame(canvas, theme, &layout, axes.as_ref());
        if let Some(axes) = &axes {
            for layer in &prepared {
                layer.draw(canvas, &axes.x, &axes.y, layout.scale_factor);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Plot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plot")
            .field("layers", &self.layers.len())
            .field("presentation", &self.presentation)
            .finish()
    }
}

/// User limits, else the union of layer ranges, else `[0, 0]`.
fn axis_domain(axis: &AxisOptions, ranges: impl Iterator<Item = (f64, f64)>) -> (f64, f64) {
    if let Some(limits) = axis.limits {
        return limits;
    }
    ranges.reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h))).unwrap_or((0.0, 0.0))
}

fn check_log_domain(name: &str, axis: &AxisOptions, min: f64, max: f64) -> Result<()> {
    if axis.log_base.is_some() && !(min > 0.0 && max > 0.0) {
        return Err(Error::ScaleDomain(format!(
            "specified log scale, but domain of {name} values is zero or negative: [{min}, {max}]"
        )));
    }
    Ok(())
}

fn axis_ticks(axis: &AxisOptions, scale: &AxisScale) -> Vec<f64> {
    if axis.ticks.is_empty() {
        scale.ticks(DEFAULT_TICK_COUNT)
    } else {
        axis.ticks.clone()
    }
}

/// Backgrounds, grid, axis lines and tick marks.
fn draw_frame(canvas: &mut dyn Canvas, theme: &Theme, layout: &Layout, axes: Option<&Axes>) {
    let (l, r, t, b) = (layout.left(), layout.right(), layout.top(), layout.bottom());
    let sf = layout.scale_factor;

    canvas.fill_rect(0.0, 0.0, layout.width, layout.height, theme.border_background);
    canvas.fill_rect(l, t, r - l, b - t, theme.chart_background);

    let Some(axes) = axes else {
        return;
    };

    if theme.show_grid {
        for &x in &axes.x_ticks {
            let dx = axes.x.scale(x);
            canvas.move_to(dx, b);
            canvas.line_to(dx, t);
        }
        for &y in &axes.y_ticks {
            let dy = axes.y.scale(y);
            canvas.move_to(l, dy);
            canvas.line_to(r, dy);
        }
        canvas.stroke(theme.grid_color, sf);
    }

    canvas.move_to(l, b);
    canvas.line_to(r, b);
    canvas.move_to(l, b);
    canvas.line_to(l, t);
    canvas.stroke(theme.foreground, 2.0 * sf);

    for &x in &axes.x_ticks {
        let dx = axes.x.scale(x);
        canvas.move_to(dx, b);
        canvas.line_to(dx, b + layout.pad_bottom / 10.0);
    }
    for &y in &axes.y_ticks {
        let dy = axes.y.scale(y);
        canvas.move_to(l, dy);
        canvas.line_to(l - layout.pad_left / 10.0, dy);
    }
    canvas.stroke(theme.foreground, sf);
}
