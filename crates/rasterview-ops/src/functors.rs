//! Stock value-based pixel functions.
//!
//! Small functors for the common per-pixel maps, usable directly with
//! [`per_pixel_view`] and [`binary_per_pixel_view`] or through the helper
//! constructors below.
//!
//! # Unary
//!
//! - [`Negate`] - `-v`
//! - [`Threshold`] - `high` above `level`, `low` otherwise
//! - [`Scale`] - `v * k`
//! - [`Clamp`] - `v` limited to `[lo, hi]`
//!
//! # Binary
//!
//! - [`Add`], [`Sub`], [`Mul`] - arithmetic of two views
//! - [`AbsDiff`] - `|a - b|`
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{Image, ImageView};
//! use rasterview_ops::functors::{abs_diff, threshold};
//!
//! let a = Image::from_data(3, 1, 1, vec![1.0f32, 5.0, 9.0]).unwrap();
//! let b = Image::from_data(3, 1, 1, vec![2.0f32, 2.0, 2.0]).unwrap();
//!
//! let diff = abs_diff(&a, &b).unwrap();
//! let mask = threshold(diff, 2.0, 0u8, 255u8);
//! assert_eq!(mask.materialize().unwrap().data(), &[0, 255, 255]);
//! ```

use rasterview_core::{
    binary_per_pixel_view, per_pixel_view, BinaryPerPixelView, BinaryPixelFunction, ImageView,
    PixelFunction, Result, UnaryPerPixelView,
};
use std::ops;

/// Arithmetic negation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Negate;

impl<P: ops::Neg> PixelFunction<P> for Negate {
    type Output = P::Output;

    #[inline]
    fn apply(&self, px: P) -> P::Output {
        -px
    }
}

/// Binarization against a level.
///
/// Pixels strictly above `level` map to `high`, all others to `low`. The
/// output type is that of `low`/`high`, so a float image can threshold into
/// a `u8` mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold<T, O> {
    /// Comparison level.
    pub level: T,
    /// Value at or below the level.
    pub low: O,
    /// Value above the level.
    pub high: O,
}

impl<P, O> PixelFunction<P> for Threshold<P, O>
where
    P: PartialOrd,
    O: Clone,
{
    type Output = O;

    #[inline]
    fn apply(&self, px: P) -> O {
        if px > self.level {
            self.high.clone()
        } else {
            self.low.clone()
        }
    }
}

/// Multiplication by a constant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scale<K>(pub K);

impl<P, K> PixelFunction<P> for Scale<K>
where
    P: ops::Mul<K>,
    K: Copy,
{
    type Output = P::Output;

    #[inline]
    fn apply(&self, px: P) -> P::Output {
        px * self.0
    }
}

/// Limits pixels to `[lo, hi]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clamp<T> {
    /// Lower bound.
    pub lo: T,
    /// Upper bound.
    pub hi: T,
}

impl<P> PixelFunction<P> for Clamp<P>
where
    P: PartialOrd + Clone,
{
    type Output = P;

    #[inline]
    fn apply(&self, px: P) -> P {
        if px < self.lo {
            self.lo.clone()
        } else if px > self.hi {
            self.hi.clone()
        } else {
            px
        }
    }
}

/// `a + b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Add;

impl<A: ops::Add<B>, B> BinaryPixelFunction<A, B> for Add {
    type Output = A::Output;

    #[inline]
    fn apply(&self, a: A, b: B) -> A::Output {
        a + b
    }
}

/// `a - b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sub;

impl<A: ops::Sub<B>, B> BinaryPixelFunction<A, B> for Sub {
    type Output = A::Output;

    #[inline]
    fn apply(&self, a: A, b: B) -> A::Output {
        a - b
    }
}

/// `a * b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mul;

impl<A: ops::Mul<B>, B> BinaryPixelFunction<A, B> for Mul {
    type Output = A::Output;

    #[inline]
    fn apply(&self, a: A, b: B) -> A::Output {
        a * b
    }
}

/// `|a - b|`, computed without underflow for unsigned pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbsDiff;

impl<P> BinaryPixelFunction<P, P> for AbsDiff
where
    P: PartialOrd + ops::Sub<Output = P>,
{
    type Output = P;

    #[inline]
    fn apply(&self, a: P, b: P) -> P {
        if a >= b { a - b } else { b - a }
    }
}

// === Helper constructors ===

/// `-v` for every pixel of `source`.
#[inline]
pub fn negate<V>(source: V) -> UnaryPerPixelView<V, Negate>
where
    V: ImageView,
    V::Pixel: ops::Neg,
{
    per_pixel_view(source, Negate)
}

/// Binarizes `source` at `level`.
#[inline]
pub fn threshold<V, O>(source: V, level: V::Pixel, low: O, high: O) -> UnaryPerPixelView<V, Threshold<V::Pixel, O>>
where
    V: ImageView,
    V::Pixel: PartialOrd,
    O: Clone,
{
    per_pixel_view(source, Threshold { level, low, high })
}

/// Multiplies every pixel of `source` by `k`.
#[inline]
pub fn scale<V, K>(source: V, k: K) -> UnaryPerPixelView<V, Scale<K>>
where
    V: ImageView,
    V::Pixel: ops::Mul<K>,
    K: Copy,
{
    per_pixel_view(source, Scale(k))
}

/// Limits every pixel of `source` to `[lo, hi]`.
#[inline]
pub fn clamp<V>(source: V, lo: V::Pixel, hi: V::Pixel) -> UnaryPerPixelView<V, Clamp<V::Pixel>>
where
    V: ImageView,
    V::Pixel: PartialOrd + Clone,
{
    per_pixel_view(source, Clamp { lo, hi })
}

/// Pixel-wise sum of two equally sized views.
///
/// # Errors
///
/// Fails with `DimensionMismatch` if the views differ in size.
#[inline]
pub fn add<A, B>(a: A, b: B) -> Result<BinaryPerPixelView<A, B, Add>>
where
    A: ImageView,
    B: ImageView,
    A::Pixel: ops::Add<B::Pixel>,
{
    binary_per_pixel_view(a, b, Add)
}

/// Pixel-wise difference of two equally sized views.
#[inline]
pub fn sub<A, B>(a: A, b: B) -> Result<BinaryPerPixelView<A, B, Sub>>
where
    A: ImageView,
    B: ImageView,
    A::Pixel: ops::Sub<B::Pixel>,
{
    binary_per_pixel_view(a, b, Sub)
}

/// Pixel-wise product of two equally sized views.
#[inline]
pub fn mul<A, B>(a: A, b: B) -> Result<BinaryPerPixelView<A, B, Mul>>
where
    A: ImageView,
    B: ImageView,
    A::Pixel: ops::Mul<B::Pixel>,
{
    binary_per_pixel_view(a, b, Mul)
}

/// Pixel-wise absolute difference of two equally sized views.
#[inline]
pub fn abs_diff<A, B>(a: A, b: B) -> Result<BinaryPerPixelView<A, B, AbsDiff>>
where
    A: ImageView,
    B: ImageView<Pixel = A::Pixel>,
    A::Pixel: PartialOrd + ops::Sub<Output = A::Pixel>,
{
    binary_per_pixel_view(a, b, AbsDiff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rasterview_core::{Error, Image};

    fn ramp() -> Image<f32> {
        Image::from_fn(4, 2, 1, |x, y, _| x as f32 + 4.0 * y as f32)
    }

    #[test]
    fn test_negate() {
        let img = ramp();
        let neg = negate(&img);
        for (x, y) in img.bounds().iter_coords() {
            assert_eq!(neg.pixel(x, y, 0), -img.pixel(x, y, 0));
        }
    }

    #[test]
    fn test_threshold_changes_type() {
        let img = ramp();
        let mask = threshold(&img, 3.0, false, true);
        assert!(rasterview_core::has_pixel_type::<bool, _>(&mask));
        assert!(!mask.pixel(3, 0, 0));
        assert!(mask.pixel(0, 1, 0));
    }

    #[test]
    fn test_scale_and_clamp() {
        let img = ramp();
        let scaled = scale(&img, 0.5f32);
        assert_relative_eq!(scaled.pixel(3, 1, 0), 3.5);

        let clamped = clamp(&img, 2.0, 5.0);
        let out = clamped.materialize().unwrap();
        assert_eq!(out.data(), &[2.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_binary_ops() {
        let a = ramp();
        let b = Image::filled(4, 2, 1, 2.0f32);
        assert_eq!(add(&a, &b).unwrap().pixel(1, 0, 0), 3.0);
        assert_eq!(sub(&a, &b).unwrap().pixel(1, 0, 0), -1.0);
        assert_eq!(mul(&a, &b).unwrap().pixel(3, 1, 0), 14.0);
        assert_eq!(abs_diff(&a, &b).unwrap().pixel(0, 0, 0), 2.0);
    }

    #[test]
    fn test_abs_diff_unsigned() {
        let a = Image::from_data(2, 1, 1, vec![3u8, 200]).unwrap();
        let b = Image::from_data(2, 1, 1, vec![10u8, 50]).unwrap();
        let d = abs_diff(&a, &b).unwrap();
        assert_eq!(d.materialize().unwrap().data(), &[7, 150]);
    }

    #[test]
    fn test_binary_size_mismatch() {
        let a = ramp();
        let b: Image<f32> = Image::new(2, 2, 1);
        assert!(matches!(add(&a, &b), Err(Error::DimensionMismatch { .. })));
    }
}
