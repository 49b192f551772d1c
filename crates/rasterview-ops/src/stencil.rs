//! Stock accessor-based functors (neighborhood stencils).
//!
//! Each stencil reads a small neighborhood through the accessor it is
//! handed and declares that neighborhood as its work area. Inputs are any
//! pixel type convertible to `f64`; outputs are `f64`.
//!
//! | Stencil | Work area | Output |
//! |---------|-----------|--------|
//! | [`DerivativeX`] | (-1, 0, 3, 1) | `(v[x+1] - v[x-1]) / 2` |
//! | [`DerivativeY`] | (0, -1, 1, 3) | `(v[y+1] - v[y-1]) / 2` |
//! | [`Laplacian`] | (-1, -1, 3, 3) | 4-neighbour sum minus `4 v` |
//! | [`BoxMean`] | (-r, -r, 2r+1, 2r+1) | neighborhood mean |
//!
//! Over a plain image a stencil can only be evaluated where its work area
//! stays inside the image. Wrap the source in an edge-extended view to
//! evaluate every pixel.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{ClampEdge, EdgeExtendView, Image, ImageView};
//! use rasterview_ops::stencil::derivative_x;
//!
//! let ramp = Image::from_fn(4, 1, 1, |x, _, _| (x * x) as f32);
//!
//! // Interior only: the border columns need pixels outside the image.
//! assert!(derivative_x(&ramp).materialize().is_err());
//!
//! let dx = derivative_x(EdgeExtendView::new(&ramp, ClampEdge)).materialize().unwrap();
//! assert_eq!(dx.data(), &[0.5, 2.0, 4.0, 2.5]);
//! ```

use rasterview_core::{
    per_pixel_accessor_view, AccessorFunction, BBox, ImageView, PixelAccessor,
    UnaryPerPixelAccessorView,
};

#[inline]
fn sample<A>(acc: &A) -> f64
where
    A: PixelAccessor,
    A::Pixel: Into<f64>,
{
    acc.get().into()
}

/// Horizontal central difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivativeX;

impl<P: Into<f64>> AccessorFunction<P> for DerivativeX {
    type Output = f64;

    fn work_area(&self) -> BBox {
        BBox::new(-1, 0, 3, 1)
    }

    #[inline]
    fn apply<A: PixelAccessor<Pixel = P>>(&self, acc: A) -> f64 {
        (sample(&acc.offset(1, 0)) - sample(&acc.offset(-1, 0))) * 0.5
    }
}

/// Vertical central difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivativeY;

impl<P: Into<f64>> AccessorFunction<P> for DerivativeY {
    type Output = f64;

    fn work_area(&self) -> BBox {
        BBox::new(0, -1, 1, 3)
    }

    #[inline]
    fn apply<A: PixelAccessor<Pixel = P>>(&self, acc: A) -> f64 {
        (sample(&acc.offset(0, 1)) - sample(&acc.offset(0, -1))) * 0.5
    }
}

/// 5-point Laplacian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Laplacian;

impl<P: Into<f64>> AccessorFunction<P> for Laplacian {
    type Output = f64;

    fn work_area(&self) -> BBox {
        BBox::new(-1, -1, 3, 3)
    }

    #[inline]
    fn apply<A: PixelAccessor<Pixel = P>>(&self, mut acc: A) -> f64 {
        let center = sample(&acc);
        acc.prev_col();
        let mut sum = sample(&acc);
        acc.advance(2, 0);
        sum += sample(&acc);
        acc.advance(-1, -1);
        sum += sample(&acc);
        acc.advance(0, 2);
        sum += sample(&acc);
        sum - 4.0 * center
    }
}

/// Mean over a `(2r + 1) × (2r + 1)` square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxMean {
    /// Half-width of the square.
    pub radius: u32,
}

impl<P: Into<f64>> AccessorFunction<P> for BoxMean {
    type Output = f64;

    fn work_area(&self) -> BBox {
        let r = self.radius as i32;
        let side = 2 * self.radius + 1;
        BBox::new(-r, -r, side, side)
    }

    fn apply<A: PixelAccessor<Pixel = P>>(&self, acc: A) -> f64 {
        let r = self.radius as i32;
        let side = 2 * r + 1;
        let mut row = acc.offset(-r, -r);
        let mut sum = 0.0;
        for _ in 0..side {
            let mut col = row.clone();
            for _ in 0..side {
                sum += sample(&col);
                col.next_col();
            }
            row.next_row();
        }
        sum / (side * side) as f64
    }
}

// === Helper constructors ===

/// Horizontal derivative of `source`.
#[inline]
pub fn derivative_x<V>(source: V) -> UnaryPerPixelAccessorView<V, DerivativeX>
where
    V: ImageView,
    V::Pixel: Into<f64>,
{
    per_pixel_accessor_view(source, DerivativeX)
}

/// Vertical derivative of `source`.
#[inline]
pub fn derivative_y<V>(source: V) -> UnaryPerPixelAccessorView<V, DerivativeY>
where
    V: ImageView,
    V::Pixel: Into<f64>,
{
    per_pixel_accessor_view(source, DerivativeY)
}

/// Laplacian of `source`.
#[inline]
pub fn laplacian<V>(source: V) -> UnaryPerPixelAccessorView<V, Laplacian>
where
    V: ImageView,
    V::Pixel: Into<f64>,
{
    per_pixel_accessor_view(source, Laplacian)
}

/// Box mean of `source` with the given radius.
#[inline]
pub fn box_mean<V>(source: V, radius: u32) -> UnaryPerPixelAccessorView<V, BoxMean>
where
    V: ImageView,
    V::Pixel: Into<f64>,
{
    per_pixel_accessor_view(source, BoxMean { radius })
}
