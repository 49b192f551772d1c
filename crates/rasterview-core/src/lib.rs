//! # rasterview-core
//!
//! Lazy image views and the rasterization engine that materializes them.
//!
//! This crate provides the foundational types of the rasterview workspace:
//!
//! - [`ImageView`] - The view trait: a `cols × rows × planes` grid of pixels
//!   computed on demand, with static capability flags
//! - [`PixelAccessor`] - Movable cursor used by neighborhood computations
//! - [`Image`] - Owned plane-major pixel buffer, the root of view chains
//! - [`UnaryPerPixelView`], [`BinaryPerPixelView`],
//!   [`UnaryPerPixelAccessorView`] - Transform views over user functors
//! - [`ViewIter`] - Raster-order traversal of any view
//! - [`rasterize`], [`try_rasterize`] - Partial or full materialization into
//!   caller-supplied buffers
//! - [`BBox`] - Windows and work areas
//!
//! ## Design Philosophy
//!
//! Views hold their sources and a functor, never pixel data. Nothing is
//! computed until a pixel is read, an iterator is walked or a window is
//! rasterized, so long chains cost nothing to build:
//!
//! ```rust
//! use rasterview_core::{per_pixel_view, BBox, Image, ImageView};
//!
//! let img = Image::from_data(2, 2, 1, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
//! let view = per_pixel_view(per_pixel_view(&img, |v: f32| v * 10.0), |v: f32| -v);
//!
//! let mut dst: Image<f32> = Image::new(2, 1, 1);
//! view.rasterize(&mut dst, BBox::new(0, 1, 2, 1)).unwrap();
//! assert_eq!(dst.data(), &[-30.0, -40.0]);
//! ```
//!
//! Capabilities are associated consts, resolved at compile time. Generic
//! code branches on them without evaluating pixels:
//!
//! - `MULTIPLY_ACCESSIBLE` - pixels may be re-read at the cost of a fresh
//!   read (stored data, value-based functors)
//! - `PURE` - reading has no side effects; parallel rasterization requires it
//! - `BULK_RASTERIZE` - the view has a faster fill than the accessor walk
//!
//! ## Crate Structure
//!
//! ```text
//! rasterview-core (this crate)
//!    ^
//!    |
//!    +-- rasterview-ops (stock functors, point transforms, parallel fill)
//!    +-- rasterview-tests (integration tests)
//!    +-- rasterview-bench (benchmarks)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`BBox`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod accessor;
pub mod bbox;
pub mod crop;
pub mod edge;
pub mod error;
pub mod functor;
pub mod image;
pub mod iter;
pub mod procedural;
pub mod rasterize;
pub mod traits;
pub mod transform;
pub mod view;

// Re-exports for convenience
pub use accessor::{ImageAccessor, PixelAccessor, ViewAccessor};
pub use bbox::BBox;
pub use crop::{crop, CropView};
pub use edge::{ClampEdge, ConstantEdge, EdgeExtendView, EdgeExtension, PeriodicEdge, ZeroEdge};
pub use error::{Error, Result};
pub use functor::{AccessorFunction, BinaryPixelFunction, Impure, PixelFunction};
pub use image::Image;
pub use iter::ViewIter;
pub use procedural::{ConstantView, ProceduralView};
pub use rasterize::{
    collect_window, rasterize, rasterize_full, rasterize_generic, try_rasterize, validate_window,
};
pub use traits::{has_pixel_type, is_image_view, is_multiply_accessible, is_pure, view_traits, ViewTraits};
pub use transform::{
    binary_per_pixel_view, per_pixel_accessor_view, per_pixel_view, BinaryAccessor,
    BinaryPerPixelView, PerPixelAccessorAccessor, UnaryAccessor, UnaryPerPixelAccessorView,
    UnaryPerPixelView,
};
pub use view::ImageView;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use rasterview_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::accessor::PixelAccessor;
    pub use crate::bbox::BBox;
    pub use crate::edge::{ClampEdge, ConstantEdge, EdgeExtendView, PeriodicEdge, ZeroEdge};
    pub use crate::error::{Error, Result};
    pub use crate::functor::{AccessorFunction, BinaryPixelFunction, Impure, PixelFunction};
    pub use crate::image::Image;
    pub use crate::rasterize::{rasterize, try_rasterize};
    pub use crate::transform::{binary_per_pixel_view, per_pixel_accessor_view, per_pixel_view};
    pub use crate::view::ImageView;
}
