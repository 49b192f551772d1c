//! Error types for view construction and rasterization.
//!
//! Only recoverable setup problems are reported here: a rasterization window
//! that does not fit the view, a destination buffer of the wrong size, or two
//! sources of a binary view that disagree on their dimensions.
//!
//! Precondition violations on the hot path (dereferencing an accessor that has
//! been moved outside its view, dereferencing an end iterator) are *not*
//! detected. Failures raised by user functors travel through their own error
//! type; see [`crate::rasterize::try_rasterize`].
//!
//! # Usage
//!
//! ```rust
//! use rasterview_core::{BBox, Error, Result};
//!
//! fn check_window(window: BBox, cols: u32, rows: u32) -> Result<()> {
//!     if !BBox::from_size(cols, rows).contains_bbox(&window) {
//!         return Err(Error::invalid_region(window, cols, rows));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_window(BBox::new(1, 0, 1, 2), 2, 2).is_ok());
//! assert!(check_window(BBox::new(1, 0, 2, 2), 2, 2).is_err());
//! ```

use crate::BBox;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by view construction and rasterization.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds), [`InvalidRegion`](Error::InvalidRegion)
/// - **Dimension errors**: [`DimensionMismatch`](Error::DimensionMismatch),
///   [`PlaneMismatch`](Error::PlaneMismatch), [`InvalidDimensions`](Error::InvalidDimensions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// Only produced by checked accessors such as
    /// [`Image::try_set_pixel`](crate::Image::try_set_pixel).
    #[error("pixel ({x}, {y}, plane {plane}) out of bounds for image {cols}x{rows}x{planes}")]
    OutOfBounds {
        /// Column that was addressed
        x: i32,
        /// Row that was addressed
        y: i32,
        /// Plane that was addressed
        plane: u32,
        /// Image columns
        cols: u32,
        /// Image rows
        rows: u32,
        /// Image planes
        planes: u32,
    },

    /// A window does not lie inside the region a view can be evaluated over.
    #[error("region {region} exceeds view bounds {cols}x{rows}")]
    InvalidRegion {
        /// The offending window
        region: BBox,
        /// View columns
        cols: u32,
        /// View rows
        rows: u32,
    },

    /// Two grids that must agree on their size do not.
    ///
    /// Returned when building a binary view over differently sized sources
    /// and when a destination buffer does not match the rasterized window.
    #[error("dimension mismatch: {a_cols}x{a_rows}x{a_planes} vs {b_cols}x{b_rows}x{b_planes}")]
    DimensionMismatch {
        /// First grid columns
        a_cols: u32,
        /// First grid rows
        a_rows: u32,
        /// First grid planes
        a_planes: u32,
        /// Second grid columns
        b_cols: u32,
        /// Second grid rows
        b_rows: u32,
        /// Second grid planes
        b_planes: u32,
    },

    /// Destination plane count differs from the source plane count.
    #[error("plane mismatch: source has {expected} planes, destination has {got}")]
    PlaneMismatch {
        /// Planes in the source view
        expected: u32,
        /// Planes in the destination buffer
        got: u32,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when a buffer is built from data whose length does not match
    /// `cols * rows * planes`, or when that product overflows.
    #[error("invalid dimensions: {cols}x{rows}x{planes} ({reason})")]
    InvalidDimensions {
        /// Requested columns
        cols: u32,
        /// Requested rows
        rows: u32,
        /// Requested planes
        planes: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: i32, y: i32, plane: u32, dims: (u32, u32, u32)) -> Self {
        Self::OutOfBounds {
            x,
            y,
            plane,
            cols: dims.0,
            rows: dims.1,
            planes: dims.2,
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(region: BBox, cols: u32, rows: u32) -> Self {
        Self::InvalidRegion { region, cols, rows }
    }

    /// Creates an [`Error::DimensionMismatch`] error from two `(cols, rows, planes)` triples.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32, u32), b: (u32, u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_cols: a.0,
            a_rows: a.1,
            a_planes: a.2,
            b_cols: b.0,
            b_rows: b.1,
            b_planes: b.2,
        }
    }

    /// Creates an [`Error::PlaneMismatch`] error.
    #[inline]
    pub fn plane_mismatch(expected: u32, got: u32) -> Self {
        Self::PlaneMismatch { expected, got }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(dims: (u32, u32, u32), reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            cols: dims.0,
            rows: dims.1,
            planes: dims.2,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::InvalidRegion { .. })
    }

    /// Returns `true` if two grids disagreed on their size.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::PlaneMismatch { .. } | Self::InvalidDimensions { .. }
        )
    }
}
