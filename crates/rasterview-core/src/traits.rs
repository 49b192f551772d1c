//! Static capability queries over view types.
//!
//! The capabilities of a view are associated consts of [`ImageView`] and
//! its `Pixel` type, so they are known without evaluating a single pixel.
//! [`ViewTraits`] gathers them into one descriptor that can be logged,
//! compared or cached at composition time.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{per_pixel_view, view_traits, Image, Impure};
//!
//! let img: Image<[f32; 3]> = Image::new(4, 4, 1);
//! let gray = per_pixel_view(&img, |px: [f32; 3]| px[0]);
//!
//! let traits = rasterview_core::ViewTraits::of(&gray);
//! assert!(traits.is_multiply_accessible);
//! assert!(traits.is_pure);
//! assert!(traits.is_image_view);
//! assert!(!traits.has_bulk_rasterize);
//! assert_eq!(traits.pixel_type, "f32");
//!
//! let noisy = per_pixel_view(&img, Impure(|px: [f32; 3]| px[1]));
//! assert!(!rasterview_core::is_multiply_accessible(&noisy));
//! assert!(!rasterview_core::is_pure(&noisy));
//! # let _ = view_traits::<Image<u8>>();
//! ```

use crate::ImageView;
use std::any::TypeId;

/// Capability descriptor of a view type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTraits {
    /// See [`ImageView::MULTIPLY_ACCESSIBLE`].
    pub is_multiply_accessible: bool,
    /// See [`ImageView::PURE`].
    pub is_pure: bool,
    /// See [`ImageView::IS_IMAGE_VIEW`].
    pub is_image_view: bool,
    /// See [`ImageView::BULK_RASTERIZE`].
    pub has_bulk_rasterize: bool,
    /// Name of [`ImageView::Pixel`].
    pub pixel_type: &'static str,
}

impl ViewTraits {
    /// Descriptor of the type of `view`.
    #[inline]
    pub fn of<V: ImageView>(_view: &V) -> Self {
        view_traits::<V>()
    }
}

/// Descriptor of the view type `V`.
pub fn view_traits<V: ImageView>() -> ViewTraits {
    ViewTraits {
        is_multiply_accessible: V::MULTIPLY_ACCESSIBLE,
        is_pure: V::PURE,
        is_image_view: V::IS_IMAGE_VIEW,
        has_bulk_rasterize: V::BULK_RASTERIZE,
        pixel_type: std::any::type_name::<V::Pixel>(),
    }
}

/// Returns [`ImageView::MULTIPLY_ACCESSIBLE`] of the type of `view`.
#[inline]
pub fn is_multiply_accessible<V: ImageView>(_view: &V) -> bool {
    V::MULTIPLY_ACCESSIBLE
}

/// Returns [`ImageView::PURE`] of the type of `view`.
#[inline]
pub fn is_pure<V: ImageView>(_view: &V) -> bool {
    V::PURE
}

/// Returns [`ImageView::IS_IMAGE_VIEW`] of the type of `view`.
#[inline]
pub fn is_image_view<V: ImageView>(_view: &V) -> bool {
    V::IS_IMAGE_VIEW
}

/// Returns `true` if the pixel type of `view` is `T`.
#[inline]
pub fn has_pixel_type<T: 'static, V>(_view: &V) -> bool
where
    V: ImageView,
    V::Pixel: 'static,
{
    TypeId::of::<T>() == TypeId::of::<V::Pixel>()
}
