//! Rasterization for the [`Framebuffer`](crate::framebuffer::Framebuffer) canvas.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: hairline strokes with sub-pixel accuracy
//! - **Capsule stroke**: thick segments with round caps
//! - **Midpoint Circle**: filled dots
//! - **Liang-Barsky**: segment clipping before rasterization
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Liang, Y.-D., & Barsky, B. A. (1984). "A New Concept and Method for Line Clipping."

mod primitives;

pub use primitives::{clip_segment, draw_capsule, draw_circle, draw_line_aa, draw_point, stroke_segment};
