//! Concrete pixel buffers.
//!
//! [`Image`] is the only view that owns pixel data. Every view chain bottoms
//! out in one or more images, and every rasterization writes into one.
//!
//! # Memory Layout
//!
//! Pixels are stored **plane-major**, then row-major:
//!
//! ```text
//! plane 0: [row 0: x0 x1 x2 ...][row 1: x0 x1 x2 ...] ...
//! plane 1: [row 0: x0 x1 x2 ...][row 1: x0 x1 x2 ...] ...
//! ```
//!
//! so pixel (x, y, p) lives at `(p * rows + y) * cols + x`. A row of one
//! plane is always a contiguous slice, which is what the bulk rasterization
//! path copies.
//!
//! # Usage
//!
//! ```rust
//! use rasterview_core::{Image, ImageView};
//!
//! let mut img: Image<f32> = Image::new(4, 3, 1);
//! img.set_pixel(2, 1, 0, 0.5);
//! assert_eq!(img.pixel(2, 1, 0), 0.5);
//! assert_eq!(img.cols(), 4);
//! ```
//!
//! # Used By
//!
//! - [`crate::rasterize`] - destination of every fill
//! - [`crate::transform`] - typical root of a view chain

use crate::{BBox, Error, ImageAccessor, ImageView, Result};
use std::sync::Arc;

/// Owned, plane-major pixel buffer.
///
/// # Memory Management
///
/// The pixel buffer is stored in an [`Arc<Vec<P>>`], enabling zero-copy
/// cloning. Mutation goes through [`Arc::make_mut`], so a shared buffer is
/// copied on first write.
///
/// # Example
///
/// ```rust
/// use rasterview_core::Image;
///
/// let a = Image::filled(2, 2, 1, 1u8);
/// let mut b = a.clone(); // shares data
/// b.set_pixel(0, 0, 0, 9); // copy-on-write
/// assert_eq!(a.pixel(0, 0, 0), 1);
/// assert_eq!(b.pixel(0, 0, 0), 9);
/// ```
#[derive(Clone, PartialEq)]
pub struct Image<P> {
    data: Arc<Vec<P>>,
    cols: u32,
    rows: u32,
    planes: u32,
}

fn checked_len(cols: u32, rows: u32, planes: u32) -> Result<usize> {
    (cols as usize)
        .checked_mul(rows as usize)
        .and_then(|v| v.checked_mul(planes as usize))
        .ok_or_else(|| Error::invalid_dimensions((cols, rows, planes), "pixel count overflows"))
}

impl<P> Image<P> {
    /// Creates an image from existing pixel data in plane-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `cols * rows * planes`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::Image;
    ///
    /// let img = Image::from_data(2, 2, 1, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(img.pixel(1, 0, 0), 2.0);
    /// assert!(Image::from_data(2, 2, 1, vec![0.0f32; 3]).is_err());
    /// ```
    pub fn from_data(cols: u32, rows: u32, planes: u32, data: Vec<P>) -> Result<Self> {
        let expected = checked_len(cols, rows, planes)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                (cols, rows, planes),
                format!("expected {} pixels, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            cols,
            rows,
            planes,
        })
    }

    /// Creates an image by evaluating `f(x, y, p)` in raster order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::Image;
    ///
    /// let img = Image::from_fn(3, 1, 1, |x, _, _| x * 2);
    /// assert_eq!(img.data(), &[0, 2, 4]);
    /// ```
    pub fn from_fn<F>(cols: u32, rows: u32, planes: u32, mut f: F) -> Self
    where
        F: FnMut(i32, i32, u32) -> P,
    {
        let mut data = Vec::with_capacity(cols as usize * rows as usize * planes as usize);
        for p in 0..planes {
            for y in 0..rows as i32 {
                for x in 0..cols as i32 {
                    data.push(f(x, y, p));
                }
            }
        }
        Self {
            data: Arc::new(data),
            cols,
            rows,
            planes,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of planes.
    #[inline]
    pub fn planes(&self) -> u32 {
        self.planes
    }

    /// Returns `(cols, rows, planes)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.cols, self.rows, self.planes)
    }

    /// Number of pixels in one plane.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Returns a window covering the entire image.
    #[inline]
    pub fn bounds(&self) -> BBox {
        BBox::from_size(self.cols, self.rows)
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[P] {
        &self.data
    }

    /// Returns `true` if (x, y, p) addresses a pixel of this image.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32, p: u32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.cols && (y as u32) < self.rows && p < self.planes
    }

    #[inline]
    fn index(&self, x: i32, y: i32, p: u32) -> usize {
        debug_assert!(self.in_bounds(x, y, p), "pixel ({x}, {y}, {p}) out of bounds");
        (p as usize * self.rows as usize + y as usize) * self.cols as usize + x as usize
    }

    #[inline]
    fn row_range(&self, y: u32, p: u32) -> std::ops::Range<usize> {
        debug_assert!(y < self.rows && p < self.planes, "row out of bounds");
        let start = (p as usize * self.rows as usize + y as usize) * self.cols as usize;
        start..start + self.cols as usize
    }

    /// Returns a reference to the pixel at (x, y, p).
    ///
    /// # Panics
    ///
    /// Panics if (x, y, p) is out of bounds.
    #[inline]
    pub fn pixel_ref(&self, x: i32, y: i32, p: u32) -> &P {
        &self.data[self.index(x, y, p)]
    }

    /// Returns one row of one plane.
    ///
    /// # Panics
    ///
    /// Panics if `y >= rows` or `p >= planes`.
    #[inline]
    pub fn row(&self, y: u32, p: u32) -> &[P] {
        &self.data[self.row_range(y, p)]
    }

    /// Returns one plane as a contiguous slice.
    #[inline]
    pub fn plane(&self, p: u32) -> &[P] {
        let len = self.pixel_count();
        let start = p as usize * len;
        &self.data[start..start + len]
    }
}

impl<P: Clone> Image<P> {
    /// Creates a new image filled with `P::default()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::Image;
    ///
    /// let img: Image<f32> = Image::new(1920, 1080, 3);
    /// assert_eq!(img.dimensions(), (1920, 1080, 3));
    /// ```
    pub fn new(cols: u32, rows: u32, planes: u32) -> Self
    where
        P: Default,
    {
        Self::filled(cols, rows, planes, P::default())
    }

    /// Creates an image with every pixel set to `value`.
    pub fn filled(cols: u32, rows: u32, planes: u32, value: P) -> Self {
        let len = cols as usize * rows as usize * planes as usize;
        Self {
            data: Arc::new(vec![value; len]),
            cols,
            rows,
            planes,
        }
    }

    /// Rasterizes a whole view into a new image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the view cannot be evaluated over
    /// its own bounds, e.g. a stencil over a source that is not
    /// edge-extended.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::{per_pixel_view, Image};
    ///
    /// let src = Image::from_data(2, 1, 1, vec![1.0f32, 2.0]).unwrap();
    /// let neg = Image::from_view(&per_pixel_view(&src, |v: f32| -v)).unwrap();
    /// assert_eq!(neg.data(), &[-1.0, -2.0]);
    /// ```
    pub fn from_view<V>(view: &V) -> Result<Self>
    where
        V: ImageView<Pixel = P>,
    {
        let window = view.bounds();
        if !view.is_valid_window(&window) {
            return Err(Error::invalid_region(window, view.cols(), view.rows()));
        }
        let data = crate::rasterize::collect_window(view, window);
        Self::from_data(view.cols(), view.rows(), view.planes(), data)
    }

    /// Returns a mutable reference to the pixel data.
    ///
    /// If the data is shared, this clones it first (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [P] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Ensures this image has exclusive ownership of its data.
    #[inline]
    pub fn make_mut(&mut self) {
        let _ = Arc::make_mut(&mut self.data);
    }

    /// Returns the pixel at (x, y, p).
    ///
    /// # Panics
    ///
    /// Panics if (x, y, p) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32, p: u32) -> P {
        self.data[self.index(x, y, p)].clone()
    }

    /// Returns the pixel at (x, y, p), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32, p: u32) -> Option<P> {
        if self.in_bounds(x, y, p) {
            Some(self.pixel(x, y, p))
        } else {
            None
        }
    }

    /// Returns a mutable reference to the pixel at (x, y, p).
    ///
    /// # Panics
    ///
    /// Panics if (x, y, p) is out of bounds.
    #[inline]
    pub fn pixel_mut(&mut self, x: i32, y: i32, p: u32) -> &mut P {
        let i = self.index(x, y, p);
        &mut Arc::make_mut(&mut self.data)[i]
    }

    /// Sets the pixel at (x, y, p).
    ///
    /// # Panics
    ///
    /// Panics if (x, y, p) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, p: u32, value: P) {
        *self.pixel_mut(x, y, p) = value;
    }

    /// Sets the pixel at (x, y, p), reporting out-of-bounds coordinates.
    pub fn try_set_pixel(&mut self, x: i32, y: i32, p: u32, value: P) -> Result<()> {
        if !self.in_bounds(x, y, p) {
            return Err(Error::out_of_bounds(x, y, p, self.dimensions()));
        }
        self.set_pixel(x, y, p, value);
        Ok(())
    }

    /// Fills the entire image with `value`.
    pub fn fill(&mut self, value: P) {
        for px in self.data_mut() {
            *px = value.clone();
        }
    }

    /// Returns one mutable row of one plane.
    #[inline]
    pub fn row_mut(&mut self, y: u32, p: u32) -> &mut [P] {
        let range = self.row_range(y, p);
        &mut self.data_mut()[range]
    }

    /// Applies a function to each pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(&P) -> P,
    {
        for px in self.data_mut() {
            *px = f(px);
        }
    }
}

impl<P: Clone> ImageView for Image<P> {
    type Pixel = P;
    type Accessor<'a>
        = ImageAccessor<'a, P>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = true;
    const BULK_RASTERIZE: bool = true;

    #[inline]
    fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32, p: u32) -> P {
        Image::pixel(self, x, y, p)
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> ImageAccessor<'_, P> {
        let cols = self.cols as isize;
        let plane_stride = cols * self.rows as isize;
        let offset = p as isize * plane_stride + y as isize * cols + x as isize;
        ImageAccessor::new(&self.data, offset, cols, plane_stride)
    }

    fn rasterize_bulk(&self, dst: &mut Image<P>, window: BBox) {
        let x0 = window.x as usize;
        let x1 = x0 + window.width as usize;
        for p in 0..self.planes {
            for (dy, y) in (window.y..window.max_y()).enumerate() {
                let src = &self.row(y as u32, p)[x0..x1];
                dst.row_mut(dy as u32, p).clone_from_slice(src);
            }
        }
    }
}

impl<P> std::fmt::Debug for Image<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("planes", &self.planes)
            .field("pixel", &std::any::type_name::<P>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelAccessor;

    #[test]
    fn test_image_new() {
        let img: Image<f32> = Image::new(100, 50, 3);
        assert_eq!(img.cols(), 100);
        assert_eq!(img.rows(), 50);
        assert_eq!(img.planes(), 3);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.data().len(), 15000);
    }

    #[test]
    fn test_plane_major_layout() {
        let img = Image::from_fn(2, 2, 2, |x, y, p| (x, y, p));
        assert_eq!(img.data()[0], (0, 0, 0));
        assert_eq!(img.data()[1], (1, 0, 0));
        assert_eq!(img.data()[2], (0, 1, 0));
        assert_eq!(img.data()[4], (0, 0, 1));
        assert_eq!(img.row(1, 1), &[(0, 1, 1), (1, 1, 1)]);
        assert_eq!(img.plane(1).len(), 4);
    }

    #[test]
    fn test_image_set_get_pixel() {
        let mut img: Image<f32> = Image::new(10, 10, 1);
        img.set_pixel(5, 5, 0, 1.0);
        assert_eq!(img.pixel(5, 5, 0), 1.0);
        assert_eq!(img.pixel(0, 0, 0), 0.0);
        assert_eq!(img.get_pixel(10, 0, 0), None);
        assert_eq!(img.get_pixel(-1, 0, 0), None);
        assert_eq!(img.get_pixel(0, 0, 1), None);
    }

    #[test]
    fn test_try_set_pixel_out_of_bounds() {
        let mut img: Image<u8> = Image::new(2, 2, 1);
        let err = img.try_set_pixel(2, 0, 0, 1).unwrap_err();
        assert!(err.is_bounds_error());
        assert!(img.try_set_pixel(1, 1, 0, 1).is_ok());
        assert_eq!(img.pixel(1, 1, 0), 1);
    }

    #[test]
    fn test_image_fill_and_map() {
        let mut img: Image<f32> = Image::new(4, 4, 2);
        img.fill(0.5);
        img.map_pixels(|v| v * 2.0);
        assert!(img.iter().all(|v| v == 1.0));
    }

    #[test]
    fn test_image_from_data_wrong_size() {
        let result = Image::from_data(10, 10, 1, vec![1.0f32; 10]);
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_image_clone_cow() {
        let img1 = Image::filled(10, 10, 1, 1.0f32);
        let mut img2 = img1.clone();
        img2.set_pixel(0, 0, 0, 2.0);
        assert_eq!(img1.pixel(0, 0, 0), 1.0);
        assert_eq!(img2.pixel(0, 0, 0), 2.0);
    }

    #[test]
    fn test_accessor_matches_indexing() {
        let img = Image::from_fn(3, 3, 2, |x, y, p| (p as i32) * 9 + y * 3 + x);
        for (x, y) in img.bounds().iter_coords() {
            for p in 0..2 {
                assert_eq!(img.accessor(x, y, p).get(), img.pixel(x, y, p));
            }
        }
    }

    #[test]
    fn test_bulk_rasterize_copies_window() {
        let img = Image::from_fn(4, 3, 2, |x, y, p| (p as i32) * 100 + y * 10 + x);
        let mut dst: Image<i32> = Image::new(2, 2, 2);
        img.rasterize_bulk(&mut dst, BBox::new(1, 1, 2, 2));
        assert_eq!(dst.data(), &[11, 12, 21, 22, 111, 112, 121, 122]);
    }
}
