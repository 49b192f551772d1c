//! User-supplied per-pixel computations.
//!
//! Two kinds of functor drive transform views:
//!
//! - [`PixelFunction`] / [`BinaryPixelFunction`] receive dereferenced pixel
//!   values. Any `Fn(In) -> Out` closure is a pixel function.
//! - [`AccessorFunction`] receives an accessor positioned at the output
//!   pixel and reads a neighborhood through relative moves. It declares the
//!   footprint it reads as its [`work_area`](AccessorFunction::work_area).
//!
//! Each functor carries two static declarations, both trusted and never
//! checked:
//!
//! - `PURE` (default `true`): evaluation has no side effects, so pixels may
//!   be computed in any order or on several threads. Functors holding
//!   internal mutable state must declare `false`, for example by wrapping
//!   them in [`Impure`].
//! - `MULTIPLY_ACCESSIBLE`: re-reading an output pixel costs about as much
//!   as reading a source pixel. Value-based functors default to `true`.
//!   Accessor functors default to `false`, since every read re-evaluates
//!   the whole neighborhood.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{AccessorFunction, BBox, PixelAccessor};
//!
//! /// Horizontal forward difference.
//! struct ForwardDiff;
//!
//! impl AccessorFunction<f32> for ForwardDiff {
//!     type Output = f32;
//!
//!     fn work_area(&self) -> BBox {
//!         BBox::new(0, 0, 2, 1)
//!     }
//!
//!     fn apply<A: PixelAccessor<Pixel = f32>>(&self, acc: A) -> f32 {
//!         acc.offset(1, 0).get() - acc.get()
//!     }
//! }
//! ```

use crate::{BBox, PixelAccessor};

/// Value-based per-pixel function.
pub trait PixelFunction<In> {
    /// Pixel type produced.
    type Output;

    /// Calling `apply` has no side effect.
    const PURE: bool = true;

    /// Re-applying to the same input is pure and cheap.
    const MULTIPLY_ACCESSIBLE: bool = true;

    /// Computes one output pixel.
    fn apply(&self, px: In) -> Self::Output;
}

impl<In, Out, F> PixelFunction<In> for F
where
    F: Fn(In) -> Out,
{
    type Output = Out;

    #[inline]
    fn apply(&self, px: In) -> Out {
        self(px)
    }
}

/// Value-based function of two pixels at the same coordinate.
pub trait BinaryPixelFunction<A, B> {
    /// Pixel type produced.
    type Output;

    /// See [`PixelFunction::PURE`].
    const PURE: bool = true;

    /// See [`PixelFunction::MULTIPLY_ACCESSIBLE`].
    const MULTIPLY_ACCESSIBLE: bool = true;

    /// Computes one output pixel.
    fn apply(&self, a: A, b: B) -> Self::Output;
}

impl<A, B, Out, F> BinaryPixelFunction<A, B> for F
where
    F: Fn(A, B) -> Out,
{
    type Output = Out;

    #[inline]
    fn apply(&self, a: A, b: B) -> Out {
        self(a, b)
    }
}

/// Neighborhood function reading its input through an accessor.
///
/// `P` is the source pixel type. The output type depends only on the
/// functor and `P`, never on the concrete accessor, so the same functor can
/// be applied over any view with pixel type `P`.
pub trait AccessorFunction<P> {
    /// Pixel type produced.
    type Output;

    /// See [`PixelFunction::PURE`].
    const PURE: bool = true;

    /// Off by default: each read walks the whole work area. A functor whose
    /// work area is a single pixel may declare `true`.
    const MULTIPLY_ACCESSIBLE: bool = false;

    /// Footprint read from the source, relative to the addressed pixel.
    ///
    /// The rasterizer expands every requested window by this area and
    /// requires the result to be a valid window of the source.
    fn work_area(&self) -> BBox;

    /// Computes one output pixel from an accessor positioned on it.
    fn apply<A: PixelAccessor<Pixel = P>>(&self, acc: A) -> Self::Output;
}

/// Marks a functor as stateful.
///
/// Wrap functors that keep internal mutable state (counters, caches, random
/// generators). Views built over them report `PURE == false` and
/// `MULTIPLY_ACCESSIBLE == false`, which keeps parallel rasterization away
/// from them.
///
/// # Example
///
/// ```rust
/// use rasterview_core::{per_pixel_view, Image, ImageView, Impure};
/// use std::cell::Cell;
///
/// let img: Image<f32> = Image::new(2, 2, 1);
/// let calls = Cell::new(0);
/// let counted = per_pixel_view(&img, Impure(|v: f32| {
///     calls.set(calls.get() + 1);
///     v
/// }));
/// assert!(!rasterview_core::is_multiply_accessible(&counted));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Impure<F>(pub F);

impl<In, F: PixelFunction<In>> PixelFunction<In> for Impure<F> {
    type Output = F::Output;
    const PURE: bool = false;
    const MULTIPLY_ACCESSIBLE: bool = false;

    #[inline]
    fn apply(&self, px: In) -> F::Output {
        self.0.apply(px)
    }
}

impl<A, B, F: BinaryPixelFunction<A, B>> BinaryPixelFunction<A, B> for Impure<F> {
    type Output = F::Output;
    const PURE: bool = false;
    const MULTIPLY_ACCESSIBLE: bool = false;

    #[inline]
    fn apply(&self, a: A, b: B) -> F::Output {
        self.0.apply(a, b)
    }
}

impl<P, F: AccessorFunction<P>> AccessorFunction<P> for Impure<F> {
    type Output = F::Output;
    const PURE: bool = false;
    const MULTIPLY_ACCESSIBLE: bool = false;

    #[inline]
    fn work_area(&self) -> BBox {
        self.0.work_area()
    }

    #[inline]
    fn apply<A: PixelAccessor<Pixel = P>>(&self, acc: A) -> F::Output {
        self.0.apply(acc)
    }
}
