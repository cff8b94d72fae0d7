//! # Trueno-GGG
//!
//! Grammar-of-graphics plotting over typed, column-oriented datasets.
//!
//! Data lives in a [`grammar::Dataset`] addressed by typed column handles.
//! Layers group rows into series through aesthetic mappings, optionally
//! aggregate each series per X value, and draw points, lines or error bars
//! through a [`canvas::Canvas`]. The built-in raster canvas is a
//! [`framebuffer::Framebuffer`] whose layer compositing runs on the
//! [trueno](https://crates.io/crates/trueno) SIMD vectors.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_ggg::prelude::*;
//!
//! let mut d = Dataset::new();
//! let x = Column::<i64>::new("trial");
//! let y = Column::<f64>::new("latency");
//! d.add_column(&x);
//! d.add_column(&y);
//! for row in d.grow(8) {
//!     d.set(&x, row, (row % 4) as i64).unwrap();
//!     d.set(&y, row, 1.0 + row as f64).unwrap();
//! }
//!
//! let plot = Plot::new()
//!     .layer(Layer::new().data(&d).x(&x).y(&y).stat(Statistic::mean())
//!         .geom(Geom::line(Mapping::palette(0), Mapping::constant(2.0))))
//!     .layer(Layer::new().data(&d).x(&x).y(&y).stat(Statistic::confidence(0.95).unwrap())
//!         .geom(Geom::error_bar(Mapping::palette(1), Mapping::constant(1.0))));
//!
//! let fb = plot.render(&Theme::grey(), 640, 480).unwrap();
//! assert_eq!(fb.width(), 640);
//! ```
//!
//! ## Feature Flags
//!
//! - `gpu`: Enable GPU compute acceleration in trueno
//! - `parallel`: Enable parallel processing in trueno
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Heckbert, P. (1990). "Nice Numbers for Graph Labels." Graphics Gems.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type.
pub mod color;

/// Drawing surface abstraction.
pub mod canvas;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Axis tick generation.
pub mod ticks;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Grammar of Graphics implementation.
pub mod grammar;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-ggg operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_ggg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, RecordingCanvas};
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::grammar::{
        AnyLayer, AxisOptions, Column, Dataset, Filter, Geom, Layer, Mapping, Plot, Statistic, Theme,
    };
    pub use crate::scale::{AxisScale, LinearScale, LogScale, Scale};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
