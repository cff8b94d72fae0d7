//! Grammar of Graphics implementation.
//!
//! A plot is built from typed columns in a [`Dataset`], combined into
//! [`Layer`]s that pair X and Y columns with an optional [`Statistic`] and
//! a [`Geom`]. Aesthetic [`Mapping`]s derive per-row color and size, and
//! also decide how rows split into series.
//!
//! # Components
//!
//! - **Data**: column-oriented storage addressed by typed [`Column`] handles
//! - **Filters**: composable row predicates
//! - **Aesthetics**: mappings from rows to visual properties (color, size)
//! - **Statistics**: per-X aggregation (count, sum, mean, confidence intervals)
//! - **Geometries**: points, lines and error bars
//! - **Themes**: colors and palettes applied at render time
//!
//! # Example
//!
//! ```rust
//! use trueno_ggg::grammar::*;
//!
//! let mut d = Dataset::new();
//! let x = Column::<f64>::new("x");
//! let y = Column::<f64>::new("y");
//! d.add_column(&x);
//! d.add_column(&y);
//! for row in d.grow(3) {
//!     d.set(&x, row, row as f64).unwrap();
//!     d.set(&y, row, 4.0 + row as f64).unwrap();
//! }
//!
//! let plot = Plot::new().layer(
//!     Layer::new()
//!         .data(&d)
//!         .x(&x)
//!         .y(&y)
//!         .filter(Filter::less_than(&x, 2.0))
//!         .geom(Geom::point(Mapping::palette(0), Mapping::constant(3.0))),
//! );
//! let fb = plot.render(&Theme::grey(), 200, 150).unwrap();
//! assert_eq!(fb.height(), 150);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod column;
mod data;
mod filter;
mod geom;
mod interval;
mod layer;
mod plot;
mod series;
mod stat;
mod theme;
mod value;

pub use aes::{Aesthetic, Mapping};
pub use column::{Column, ColumnData, ColumnKey, Element, ElementKind};
pub use data::Dataset;
pub use filter::Filter;
pub use geom::{Geom, GeomKind, Mark};
pub use interval::{DistributionFree, IntervalEstimator, NormalTheory};
pub use layer::{AnyLayer, Layer, PreparedLayer, PreparedSeries};
pub use plot::{AxisOptions, Axes, Layout, Plot, Presentation};
pub use series::{group_series, Series, XRuns};
pub use stat::Statistic;
pub use theme::{Theme, THEME_NAMES};
pub use value::{Key, Scalar, Value};
