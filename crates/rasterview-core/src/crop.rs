//! Sub-window views.
//!
//! [`CropView`] exposes a rectangular window of its source as a view of its
//! own, with (0, 0) at the window's top-left corner. Accessors are the
//! source's accessors shifted by the window offset, so a crop costs nothing
//! per pixel.
//!
//! Rasterizing a crop maps the requested window onto the source and hands
//! it to the source's bulk path: a crop of an [`Image`](crate::Image)
//! still copies whole rows.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{crop, BBox, Image, ImageView};
//!
//! let img = Image::from_fn(4, 4, 1, |x, y, _| x + 4 * y);
//! let inner = crop(&img, BBox::new(1, 1, 2, 2)).unwrap();
//! assert_eq!(inner.dimensions(), (2, 2, 1));
//! assert_eq!(inner.materialize().unwrap().data(), &[5, 6, 9, 10]);
//! ```

use crate::{BBox, Error, Image, ImageView, Result};

/// Crops `source` to `region`.
///
/// # Errors
///
/// Returns [`Error::InvalidRegion`] if `region` is not a valid window of
/// `source`.
#[inline]
pub fn crop<V: ImageView>(source: V, region: BBox) -> Result<CropView<V>> {
    CropView::new(source, region)
}

/// A rectangular window of a source view.
#[derive(Debug, Clone, Copy)]
pub struct CropView<V> {
    source: V,
    region: BBox,
}

impl<V: ImageView> CropView<V> {
    /// Creates the crop; see [`crop`].
    pub fn new(source: V, region: BBox) -> Result<Self> {
        if !source.is_valid_window(&region) {
            return Err(Error::invalid_region(region, source.cols(), source.rows()));
        }
        Ok(Self { source, region })
    }

    /// The cropped view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// The window of the source this view exposes.
    #[inline]
    pub fn region(&self) -> BBox {
        self.region
    }

    /// Maps a window of this view to the corresponding source window.
    #[inline]
    pub fn source_window(&self, window: &BBox) -> BBox {
        window.translate(self.region.x, self.region.y)
    }
}

impl<V: ImageView> ImageView for CropView<V> {
    type Pixel = V::Pixel;
    type Accessor<'a>
        = V::Accessor<'a>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = V::MULTIPLY_ACCESSIBLE;
    const PURE: bool = V::PURE;
    const BULK_RASTERIZE: bool = V::BULK_RASTERIZE;

    #[inline]
    fn cols(&self) -> u32 {
        self.region.width
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.region.height
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.source.planes()
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32, p: u32) -> V::Pixel {
        self.source.pixel(x + self.region.x, y + self.region.y, p)
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> V::Accessor<'_> {
        self.source.accessor(x + self.region.x, y + self.region.y, p)
    }

    fn is_valid_window(&self, window: &BBox) -> bool {
        self.bounds().contains_bbox(window) && self.source.is_valid_window(&self.source_window(window))
    }

    fn rasterize_bulk(&self, dst: &mut Image<V::Pixel>, window: BBox)
    where
        V::Pixel: Clone,
    {
        self.source.rasterize_bulk(dst, self.source_window(&window));
    }
}
