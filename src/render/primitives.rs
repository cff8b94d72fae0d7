//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes the [`Canvas`]
//! contract needs: strokes (thin anti-aliased or thick capsules) and filled
//! dots. All entry points take device coordinates as `f64` and silently skip
//! non-finite input.
//!
//! [`Canvas`]: crate::canvas::Canvas

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Widths at or below this are drawn as a single anti-aliased line.
const HAIRLINE_WIDTH: f64 = 1.0;

// ============================================================================
// Clipping
// ============================================================================

/// Clip a segment to `[xmin, xmax] x [ymin, ymax]` (Liang-Barsky).
///
/// Returns `None` when the segment lies entirely outside the box or has a
/// non-finite endpoint.
#[must_use]
pub fn clip_segment(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    (xmin, ymin): (f64, f64),
    (xmax, ymax): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return None;
    }
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Stroke a segment of the given width onto the framebuffer.
///
/// The segment is clipped to the framebuffer (with a margin of one stroke
/// width) before rasterizing, so far off-screen coordinates cost nothing.
pub fn stroke_segment(
    fb: &mut Framebuffer,
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    color: Rgba,
) {
    let pad = width.max(1.0);
    let Some((a, b)) = clip_segment(
        from,
        to,
        (-pad, -pad),
        (f64::from(fb.width()) + pad, f64::from(fb.height()) + pad),
    ) else {
        return;
    };

    if width <= HAIRLINE_WIDTH {
        draw_line_aa(fb, a.0, a.1, b.0, b.1, color);
    } else {
        draw_capsule(fb, a, b, width / 2.0, color);
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f64::EPSILON { 1.0 } else { dy / dx };

    let mut put = |x: i64, y: i64, intensity: f64| {
        if steep {
            plot(fb, y, x, color, intensity);
        } else {
            plot(fb, x, y, color, intensity);
        }
    };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    put(xpxl1, ypxl1, rfpart(yend) * xgap);
    put(xpxl1, ypxl1 + 1, fpart(yend) * xgap);

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    put(xpxl2, ypxl2, rfpart(yend) * xgap);
    put(xpxl2, ypxl2 + 1, fpart(yend) * xgap);

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i64;
        put(x, ipart, rfpart(intery));
        put(x, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

/// Fill every pixel whose center lies within `radius` of the segment `a..b`.
///
/// Produces a stroke with round caps, so consecutive segments of a polyline
/// join without gaps.
pub fn draw_capsule(fb: &mut Framebuffer, a: (f64, f64), b: (f64, f64), radius: f64, color: Rgba) {
    let min_x = (a.0.min(b.0) - radius).floor().max(0.0);
    let max_x = (a.0.max(b.0) + radius).ceil().min(f64::from(fb.width()) - 1.0);
    let min_y = (a.1.min(b.1) - radius).floor().max(0.0);
    let max_y = (a.1.max(b.1) + radius).ceil().min(f64::from(fb.height()) - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    let (vx, vy) = (b.0 - a.0, b.1 - a.1);
    let len2 = vx * vx + vy * vy;
    let r2 = radius * radius;

    for py in (min_y as u32)..=(max_y as u32) {
        for px in (min_x as u32)..=(max_x as u32) {
            let cx = f64::from(px) + 0.5;
            let cy = f64::from(py) + 0.5;
            let t = if len2 > 0.0 {
                (((cx - a.0) * vx + (cy - a.1) * vy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let ex = cx - (a.0 + t * vx);
            let ey = cy - (a.1 + t * vy);
            if ex * ex + ey * ey <= r2 {
                fb.blend_pixel(px, py, color);
            }
        }
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i64, y: i64, color: Rgba, intensity: f64) {
    if x >= 0 && y >= 0 && x < i64::from(fb.width()) && y < i64::from(fb.height()) {
        let alpha = (f64::from(color.a) * intensity) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

// ============================================================================
// Circle/Point Drawing
// ============================================================================

/// Draw a dot of diameter `size` (rendered as filled circle).
pub fn draw_point(fb: &mut Framebuffer, x: f64, y: f64, size: f64, color: Rgba) {
    if !(x.is_finite() && y.is_finite() && size.is_finite()) {
        return;
    }
    let radius = (size / 2.0).round();
    let w = f64::from(fb.width());
    let h = f64::from(fb.height());
    if x + radius < 0.0 || y + radius < 0.0 || x - radius >= w || y - radius >= h {
        return;
    }
    draw_circle(fb, x as i32, y as i32, radius as i32, color);
}

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_span(fb, cx - x, cx + x, cy + y, color);
        draw_span(fb, cx - x, cx + x, cy - y, color);
        draw_span(fb, cx - y, cx + y, cy + x, color);
        draw_span(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Horizontal run `[x1, x2]` on row `y`, clipped to the framebuffer.
#[inline]
fn draw_span(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }
    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).clamp(0, fb.width() as i32) as u32;
    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}
