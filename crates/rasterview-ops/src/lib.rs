//! # rasterview-ops
//!
//! Ready-made functors and fill strategies on top of `rasterview-core`.
//!
//! # Modules
//!
//! - [`functors`] - Value-based pixel functions (negate, threshold, arithmetic)
//! - [`stencil`] - Accessor-based neighborhood functions (derivatives,
//!   Laplacian, box mean)
//! - [`coords`] - Point transforms, window mapping and the resampling view
//! - [`parallel`] - Multi-threaded rasterization
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{ClampEdge, EdgeExtendView, Image, ImageView};
//! use rasterview_ops::{parallel, stencil, RasterOptions};
//!
//! let img = Image::from_fn(64, 64, 1, |x, y, _| ((x - 32) * (y - 32)) as f32);
//!
//! // Horizontal gradient, evaluated up to the border
//! let dx = stencil::derivative_x(EdgeExtendView::new(&img, ClampEdge));
//! let out = parallel::materialize(&dx, &RasterOptions::default()).unwrap();
//! assert_eq!(out.dimensions(), (64, 64, 1));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Split large fills across threads with rayon (default)
//! - `serde` - Serialization for [`RasterOptions`], [`coords::AffineTransform`]
//!   and [`coords::Interpolation`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod options;

pub mod coords;
pub mod functors;
pub mod parallel;
pub mod stencil;

pub use coords::{
    forward_bbox, reverse_bbox, transform_view, AffineTransform, Interpolation, Lerp,
    PointTransform, TransformView,
};
pub use error::{TransformError, TransformResult};
pub use options::RasterOptions;
