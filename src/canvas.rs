//! Drawing capability consumed by the rendering pipeline.
//!
//! The pipeline never touches pixels directly. Everything it draws goes
//! through [`Canvas`], which is implemented by
//! [`Framebuffer`](crate::framebuffer::Framebuffer) for raster output and by
//! [`RecordingCanvas`] for headless inspection of draw calls.

use crate::color::Rgba;

/// Minimal 2D drawing surface in device coordinates (pixels, origin top-left).
pub trait Canvas {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);

    /// Draw a filled dot of diameter `size` centered on `(x, y)`.
    fn draw_point(&mut self, x: f64, y: f64, color: Rgba, size: f64);

    /// Start a new sub-path at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Extend the current sub-path with a straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Stroke and clear the current path.
    fn stroke(&mut self, color: Rgba, width: f64);
}

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// [`Canvas::fill_rect`].
    FillRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Fill color.
        color: Rgba,
    },
    /// [`Canvas::draw_point`].
    Point {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Fill color.
        color: Rgba,
        /// Diameter.
        size: f64,
    },
    /// [`Canvas::move_to`].
    MoveTo(f64, f64),
    /// [`Canvas::line_to`].
    LineTo(f64, f64),
    /// [`Canvas::stroke`].
    Stroke {
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f64,
    },
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty recording surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    /// All recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded point draws as `(x, y, color, size)`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64, Rgba, f64)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Point { x, y, color, size } => Some((x, y, color, size)),
            _ => None,
        })
    }

    /// Number of stroke calls.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Stroke { .. })).count()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn draw_point(&mut self, x: f64, y: f64, color: Rgba, size: f64) {
        self.commands.push(DrawCommand::Point { x, y, color, size });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut c = RecordingCanvas::new(10, 20);
        c.move_to(0.0, 0.0);
        c.line_to(1.0, 1.0);
        c.stroke(Rgba::RED, 2.0);
        c.draw_point(3.0, 4.0, Rgba::BLUE, 5.0);

        assert_eq!(c.width(), 10);
        assert_eq!(c.height(), 20);
        assert_eq!(c.commands().len(), 4);
        assert_eq!(c.commands()[0], DrawCommand::MoveTo(0.0, 0.0));
        assert_eq!(c.stroke_count(), 1);
        let pts: Vec<_> = c.points().collect();
        assert_eq!(pts, vec![(3.0, 4.0, Rgba::BLUE, 5.0)]);
    }
}
