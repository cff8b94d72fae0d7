//! Error types for trueno-ggg operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a plot.
#[derive(Error, Debug)]
pub enum Error {
    /// A column handle's identity is not present in the dataset.
    #[error("column {column} not in dataset")]
    ColumnNotFound {
        /// Debug form of the column handle (`name (kind)`).
        column: String,
    },

    /// A column with the same identity already exists.
    #[error("column {column} already in dataset")]
    ColumnExists {
        /// Debug form of the column handle (`name (kind)`).
        column: String,
    },

    /// Row index outside `[0, rows)`.
    #[error("row {row} out of bounds for dataset with {rows} rows")]
    RowOutOfBounds {
        /// Requested row.
        row: usize,
        /// Number of rows in the dataset.
        rows: usize,
    },

    /// A row-wise column conversion failed.
    #[error("converting column {column} failed at row {row}: {source}")]
    Conversion {
        /// Debug form of the source column handle.
        column: String,
        /// First row that failed to convert.
        row: usize,
        /// Error reported by the conversion function.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Layer has no geometry.
    #[error("no initialized geom for layer")]
    MissingGeom,

    /// Layer has no dataset.
    #[error("no intended dataset specified for layer")]
    MissingData,

    /// Layer has no X column.
    #[error("no initialized X column for layer")]
    MissingXColumn,

    /// Layer has no Y column.
    #[error("no initialized Y column for layer")]
    MissingYColumn,

    /// Geometry expects more than one Y dimension but no statistic produces them.
    #[error("no statistic provided, but geom expects {dims} Y dimensions")]
    MissingStatistic {
        /// Dimensions expected by the geometry.
        dims: usize,
    },

    /// Geometry and statistic disagree on output arity.
    #[error("dimensional mismatch: {geom}-dimensional geom, but {stat}-dimensional statistic")]
    DimensionMismatch {
        /// Dimensions expected by the geometry.
        geom: usize,
        /// Dimensions produced by the statistic.
        stat: usize,
    },

    /// Confidence level outside the open interval (0, 1).
    #[error("confidence level must be in (0, 1), got {0}")]
    InvalidConfidence(f64),

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// No builtin theme with this name.
    #[error("unknown theme {0}")]
    UnknownTheme(String),

    /// Invalid dimensions for framebuffer or plot.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}

impl Error {
    /// Returns `true` for errors raised while validating a layer or plot
    /// configuration, before anything is drawn.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingGeom
                | Error::MissingData
                | Error::MissingXColumn
                | Error::MissingYColumn
                | Error::MissingStatistic { .. }
                | Error::DimensionMismatch { .. }
                | Error::InvalidConfidence(_)
                | Error::ScaleDomain(_)
                | Error::UnknownTheme(_)
                | Error::InvalidDimensions { .. }
        )
    }
}
