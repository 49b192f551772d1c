//! Edge-extended views.
//!
//! [`EdgeExtendView`] makes a view addressable at any coordinate. Inside
//! the source bounds it reads the source; outside, an [`EdgeExtension`]
//! decides the value. Stencils built over an edge-extended view can be
//! rasterized up to and including the border pixels.
//!
//! | Extension | Outside value |
//! |-----------|---------------|
//! | [`ZeroEdge`] | `P::default()` |
//! | [`ConstantEdge`] | a fixed pixel |
//! | [`ClampEdge`] | the nearest border pixel |
//! | [`PeriodicEdge`] | the source tiled in both directions |
//!
//! Planes are never extended.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{ClampEdge, EdgeExtendView, Image, ImageView, PeriodicEdge};
//!
//! let img = Image::from_data(3, 1, 1, vec![1, 2, 3]).unwrap();
//!
//! let clamped = EdgeExtendView::new(&img, ClampEdge);
//! assert_eq!(clamped.pixel(-5, 0, 0), 1);
//! assert_eq!(clamped.pixel(7, 2, 0), 3);
//!
//! let tiled = EdgeExtendView::new(&img, PeriodicEdge);
//! assert_eq!(tiled.pixel(-1, 0, 0), 3);
//! assert_eq!(tiled.pixel(4, 0, 0), 2);
//! ```

use crate::{BBox, ImageView, ViewAccessor};

/// Value of a view outside its bounds.
///
/// `extend` is only called with (x, y) outside `0..cols × 0..rows` of a
/// non-empty view and a valid plane.
pub trait EdgeExtension<P> {
    /// Computes the pixel at out-of-bounds (x, y) in plane `p`.
    fn extend<V: ImageView<Pixel = P>>(&self, view: &V, x: i32, y: i32, p: u32) -> P;
}

/// Zero (`Default`) outside the bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroEdge;

impl<P: Default> EdgeExtension<P> for ZeroEdge {
    #[inline]
    fn extend<V: ImageView<Pixel = P>>(&self, _view: &V, _x: i32, _y: i32, _p: u32) -> P {
        P::default()
    }
}

/// A fixed pixel outside the bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantEdge<P>(pub P);

impl<P: Clone> EdgeExtension<P> for ConstantEdge<P> {
    #[inline]
    fn extend<V: ImageView<Pixel = P>>(&self, _view: &V, _x: i32, _y: i32, _p: u32) -> P {
        self.0.clone()
    }
}

/// Nearest border pixel outside the bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClampEdge;

impl<P> EdgeExtension<P> for ClampEdge {
    #[inline]
    fn extend<V: ImageView<Pixel = P>>(&self, view: &V, x: i32, y: i32, p: u32) -> P {
        let cx = x.clamp(0, view.cols() as i32 - 1);
        let cy = y.clamp(0, view.rows() as i32 - 1);
        view.pixel(cx, cy, p)
    }
}

/// The source repeated in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodicEdge;

impl<P> EdgeExtension<P> for PeriodicEdge {
    #[inline]
    fn extend<V: ImageView<Pixel = P>>(&self, view: &V, x: i32, y: i32, p: u32) -> P {
        let wx = x.rem_euclid(view.cols() as i32);
        let wy = y.rem_euclid(view.rows() as i32);
        view.pixel(wx, wy, p)
    }
}

/// A view defined at every (x, y).
///
/// Dimensions, pixel type and multiply-accessibility are those of the
/// source. Any window is valid, except a non-empty window over an empty
/// source: there is nothing to extend.
#[derive(Debug, Clone, Copy)]
pub struct EdgeExtendView<V, E> {
    source: V,
    extension: E,
}

impl<V, E> EdgeExtendView<V, E>
where
    V: ImageView,
    E: EdgeExtension<V::Pixel>,
{
    /// Extends `source` with `extension`.
    #[inline]
    pub fn new(source: V, extension: E) -> Self {
        Self { source, extension }
    }

    /// The extended view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// The extension rule.
    #[inline]
    pub fn extension(&self) -> &E {
        &self.extension
    }
}

impl<V, E> ImageView for EdgeExtendView<V, E>
where
    V: ImageView,
    E: EdgeExtension<V::Pixel>,
{
    type Pixel = V::Pixel;
    type Accessor<'a>
        = ViewAccessor<'a, Self>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = V::MULTIPLY_ACCESSIBLE;
    const PURE: bool = V::PURE;

    #[inline]
    fn cols(&self) -> u32 {
        self.source.cols()
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.source.rows()
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.source.planes()
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32, p: u32) -> V::Pixel {
        if self.source.bounds().contains(x, y) {
            self.source.pixel(x, y, p)
        } else {
            self.extension.extend(&self.source, x, y, p)
        }
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        ViewAccessor::new(self, x, y, p)
    }

    #[inline]
    fn is_valid_window(&self, window: &BBox) -> bool {
        window.is_empty() || !self.source.bounds().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rasterize, Error, Image, PixelAccessor};

    fn ramp() -> Image<i32> {
        // 3x2: 0 1 2 / 10 11 12
        Image::from_fn(3, 2, 1, |x, y, _| x + 10 * y)
    }

    #[test]
    fn test_inside_reads_source() {
        let img = ramp();
        let view = EdgeExtendView::new(&img, ZeroEdge);
        for (x, y) in img.bounds().iter_coords() {
            assert_eq!(view.pixel(x, y, 0), img.pixel(x, y, 0));
        }
    }

    #[test]
    fn test_zero_and_constant() {
        let img = ramp();
        let zero = EdgeExtendView::new(&img, ZeroEdge);
        assert_eq!(zero.pixel(-1, 0, 0), 0);
        assert_eq!(zero.pixel(3, 1, 0), 0);

        let constant = EdgeExtendView::new(&img, ConstantEdge(-7));
        assert_eq!(constant.pixel(0, -1, 0), -7);
        assert_eq!(constant.pixel(1, 1, 0), 11);
    }

    #[test]
    fn test_clamp() {
        let img = ramp();
        let view = EdgeExtendView::new(&img, ClampEdge);
        assert_eq!(view.pixel(-3, -3, 0), 0);
        assert_eq!(view.pixel(5, 0, 0), 2);
        assert_eq!(view.pixel(1, 9, 0), 11);
        assert_eq!(view.pixel(9, 9, 0), 12);
    }

    #[test]
    fn test_periodic() {
        let img = ramp();
        let view = EdgeExtendView::new(&img, PeriodicEdge);
        assert_eq!(view.pixel(-1, 0, 0), 2);
        assert_eq!(view.pixel(3, 0, 0), 0);
        assert_eq!(view.pixel(4, -1, 0), 11);
        assert_eq!(view.pixel(-4, 2, 0), 2);
    }

    #[test]
    fn test_accessor_walks_off_the_edge() {
        let img = ramp();
        let view = EdgeExtendView::new(&img, ClampEdge);
        let mut acc = view.accessor(-1, 0, 0);
        let mut row = Vec::new();
        for _ in 0..5 {
            row.push(acc.get());
            acc.next_col();
        }
        assert_eq!(row, vec![0, 0, 1, 2, 2]);
    }

    #[test]
    fn test_every_window_valid() {
        let img = ramp();
        let view = EdgeExtendView::new(&img, ZeroEdge);
        assert!(view.is_valid_window(&BBox::new(-10, -10, 100, 100)));
        assert!(<EdgeExtendView<&Image<i32>, ZeroEdge> as ImageView>::MULTIPLY_ACCESSIBLE);
    }

    #[test]
    fn test_empty_source_has_nothing_to_extend() {
        let empty: Image<f32> = Image::new(0, 0, 1);
        let clamped = EdgeExtendView::new(&empty, ClampEdge);
        assert!(!clamped.is_valid_window(&BBox::new(0, 0, 1, 1)));
        assert!(clamped.is_valid_window(&BBox::new(3, 3, 0, 0)));

        let mut dst: Image<f32> = Image::new(1, 1, 1);
        let err = rasterize(&clamped, &mut dst, BBox::new(0, 0, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { .. }));

        let tiled = EdgeExtendView::new(&empty, PeriodicEdge);
        assert!(rasterize(&tiled, &mut dst, BBox::new(-2, 5, 1, 1)).is_err());
    }
}
