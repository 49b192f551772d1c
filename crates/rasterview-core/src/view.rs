//! The view abstraction.
//!
//! A view is anything that behaves like a `cols × rows × planes` grid of
//! pixels computed on demand. Concrete buffers ([`Image`]) are views whose
//! pixels live in memory; transform views compute their pixels from one or
//! two source views and a user functor; edge-extended, cropped, constant and
//! procedural views round out the set.
//!
//! # Capabilities
//!
//! Each view type states statically what generic code may assume about it:
//!
//! - [`ImageView::PURE`] - reading pixels has no side effects, so they may
//!   be computed in any order or concurrently
//! - [`ImageView::MULTIPLY_ACCESSIBLE`] - reading the same pixel twice is
//!   free of side effects and about as cheap as the first read
//! - [`ImageView::IS_IMAGE_VIEW`] - always `true` for views; lets generic
//!   code tell views apart from scalar operands
//! - [`ImageView::BULK_RASTERIZE`] - the view overrides
//!   [`ImageView::rasterize_bulk`] with something faster than the generic
//!   accessor walk
//! - [`ImageView::Pixel`] - the value type of `pixel()`
//!
//! See [`crate::traits`] for the runtime descriptor built from these.
//!
//! # Ownership
//!
//! `&V` is a view whenever `V` is, so chains can either own or borrow their
//! sources:
//!
//! ```rust
//! use rasterview_core::{per_pixel_view, Image, ImageView};
//!
//! let img = Image::from_data(2, 1, 1, vec![1.0f32, 2.0]).unwrap();
//! let doubled = per_pixel_view(&img, |v: f32| v * 2.0);
//! assert_eq!(doubled.pixel(1, 0, 0), 4.0);
//! ```

use crate::{BBox, Image, PixelAccessor, Result, ViewIter};

/// A lazily evaluated grid of pixels.
///
/// # Implementing
///
/// Implementors provide the dimensions, indexed access and an accessor
/// factory. `pixel(x, y, p)` and `accessor(x, y, p).get()` must agree for
/// every in-bounds coordinate.
///
/// Coordinates outside `0..cols`, `0..rows`, `0..planes` are a precondition
/// violation unless the view states otherwise through
/// [`is_valid_window`](Self::is_valid_window).
pub trait ImageView: Sized {
    /// The value produced for each pixel.
    type Pixel;

    /// Cursor type produced by [`accessor`](Self::accessor).
    type Accessor<'a>: PixelAccessor<Pixel = Self::Pixel>
    where
        Self: 'a;

    /// Re-reading a pixel has no side effects and costs about as much as
    /// the first read.
    ///
    /// This is a trusted declaration, never verified at runtime.
    const MULTIPLY_ACCESSIBLE: bool;

    /// Reading pixels has no side effects. Parallel fills require it.
    const PURE: bool = true;

    /// Marks conforming view types.
    const IS_IMAGE_VIEW: bool = true;

    /// The view provides a specialized [`rasterize_bulk`](Self::rasterize_bulk).
    const BULK_RASTERIZE: bool = false;

    /// Number of columns.
    fn cols(&self) -> u32;

    /// Number of rows.
    fn rows(&self) -> u32;

    /// Number of planes.
    fn planes(&self) -> u32;

    /// Computes the pixel at (x, y) in plane `p`.
    fn pixel(&self, x: i32, y: i32, p: u32) -> Self::Pixel;

    /// Creates an accessor positioned at (x, y) in plane `p`.
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_>;

    /// Accessor positioned at the first pixel.
    #[inline]
    fn origin(&self) -> Self::Accessor<'_> {
        self.accessor(0, 0, 0)
    }

    /// `(cols, rows, planes)`.
    #[inline]
    fn dimensions(&self) -> (u32, u32, u32) {
        (self.cols(), self.rows(), self.planes())
    }

    /// The window `(0, 0, cols, rows)`.
    #[inline]
    fn bounds(&self) -> BBox {
        BBox::from_size(self.cols(), self.rows())
    }

    /// Total number of pixels over all planes.
    #[inline]
    fn len(&self) -> usize {
        self.cols() as usize * self.rows() as usize * self.planes() as usize
    }

    /// Returns `true` if the view has no pixels.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if every pixel of `window` (in all planes) can be
    /// evaluated.
    ///
    /// Defaults to containment in [`bounds`](Self::bounds). Transform views
    /// forward to their sources (expanded by the work area for accessor
    /// functions); edge-extended views accept any window.
    #[inline]
    fn is_valid_window(&self, window: &BBox) -> bool {
        self.bounds().contains_bbox(window)
    }

    /// Fills `dst` with the pixels of `window`, all planes.
    ///
    /// Only called by the rasterization engine after it has validated the
    /// window and the destination size, and only when
    /// [`BULK_RASTERIZE`](Self::BULK_RASTERIZE) is set. The default is the
    /// generic accessor walk.
    fn rasterize_bulk(&self, dst: &mut Image<Self::Pixel>, window: BBox)
    where
        Self::Pixel: Clone,
    {
        crate::rasterize::rasterize_generic(self, dst, window);
    }

    /// Raster-order iterator over every pixel.
    #[inline]
    fn iter(&self) -> ViewIter<'_, Self> {
        ViewIter::begin(self)
    }

    /// Iterator positioned at the first pixel.
    #[inline]
    fn begin(&self) -> ViewIter<'_, Self> {
        ViewIter::begin(self)
    }

    /// The one-past-the-last iterator.
    #[inline]
    fn end(&self) -> ViewIter<'_, Self> {
        ViewIter::end(self)
    }

    /// Rasterizes `window` of this view into `dst`.
    ///
    /// See [`crate::rasterize::rasterize`].
    #[inline]
    fn rasterize(&self, dst: &mut Image<Self::Pixel>, window: BBox) -> Result<()>
    where
        Self::Pixel: Clone,
    {
        crate::rasterize::rasterize(self, dst, window)
    }

    /// Rasterizes the whole view into a new buffer.
    #[inline]
    fn materialize(&self) -> Result<Image<Self::Pixel>>
    where
        Self::Pixel: Clone,
    {
        Image::from_view(self)
    }
}

impl<V: ImageView> ImageView for &V {
    type Pixel = V::Pixel;
    type Accessor<'a>
        = V::Accessor<'a>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = V::MULTIPLY_ACCESSIBLE;
    const PURE: bool = V::PURE;
    const IS_IMAGE_VIEW: bool = V::IS_IMAGE_VIEW;
    const BULK_RASTERIZE: bool = V::BULK_RASTERIZE;

    #[inline]
    fn cols(&self) -> u32 {
        (**self).cols()
    }

    #[inline]
    fn rows(&self) -> u32 {
        (**self).rows()
    }

    #[inline]
    fn planes(&self) -> u32 {
        (**self).planes()
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32, p: u32) -> V::Pixel {
        (**self).pixel(x, y, p)
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> V::Accessor<'_> {
        (**self).accessor(x, y, p)
    }

    #[inline]
    fn is_valid_window(&self, window: &BBox) -> bool {
        (**self).is_valid_window(window)
    }

    fn rasterize_bulk(&self, dst: &mut Image<V::Pixel>, window: BBox)
    where
        V::Pixel: Clone,
    {
        (**self).rasterize_bulk(dst, window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_is_a_view() {
        let img = Image::from_data(2, 2, 1, vec![1u8, 2, 3, 4]).unwrap();
        let r = &img;
        assert_eq!(r.dimensions(), (2, 2, 1));
        assert_eq!(r.pixel(1, 1, 0), 4);
        assert_eq!(r.accessor(0, 1, 0).get(), 3);
        assert!(<&Image<u8> as ImageView>::BULK_RASTERIZE);
        assert!(<&Image<u8> as ImageView>::MULTIPLY_ACCESSIBLE);
    }

    #[test]
    fn test_default_bounds_and_len() {
        let img: Image<f32> = Image::new(4, 3, 2);
        assert_eq!(img.bounds(), BBox::new(0, 0, 4, 3));
        assert_eq!(img.len(), 24);
        assert!(!img.is_empty());
        assert!(img.is_valid_window(&BBox::new(1, 1, 3, 2)));
        assert!(!img.is_valid_window(&BBox::new(1, 1, 4, 2)));
    }
}
