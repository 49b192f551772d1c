//! Transform views: lazy per-pixel computations over source views.
//!
//! A transform view holds its source view(s) and a functor, nothing else. It
//! has no storage; each pixel is computed when it is read, walked by an
//! iterator or rasterized.
//!
//! - [`UnaryPerPixelView`] - `f(src(x, y, p))`
//! - [`BinaryPerPixelView`] - `f(a(x, y, p), b(x, y, p))`
//! - [`UnaryPerPixelAccessorView`] - `f(accessor of src at (x, y, p))`
//!
//! The dimensions are those of the (first) source. The pixel type is the
//! functor's output type, independent of the source pixel type, so maps may
//! change the type (e.g. a color image to a scalar). A transform view is
//! multiply accessible only if its functor and all its sources are.
//!
//! Indexed access and accessor dereference agree at every coordinate: the
//! accessor of a transform view wraps its source's accessor and applies the
//! same functor on dereference.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{binary_per_pixel_view, per_pixel_view, Image, ImageView};
//!
//! let a = Image::from_data(2, 1, 1, vec![1.0f32, 2.0]).unwrap();
//! let b = Image::from_data(2, 1, 1, vec![10.0f32, 20.0]).unwrap();
//!
//! let sum = binary_per_pixel_view(&a, &b, |x: f32, y: f32| x + y).unwrap();
//! let halved = per_pixel_view(sum, |v: f32| v / 2.0);
//! assert_eq!(halved.pixel(1, 0, 0), 11.0);
//! ```

use crate::{
    AccessorFunction, BBox, BinaryPixelFunction, Error, ImageView, PixelAccessor, PixelFunction,
    Result,
};

/// Wraps `source` in a value-based unary transform view.
#[inline]
pub fn per_pixel_view<V, F>(source: V, func: F) -> UnaryPerPixelView<V, F>
where
    V: ImageView,
    F: PixelFunction<V::Pixel>,
{
    UnaryPerPixelView::new(source, func)
}

/// Combines two equally sized views pixel by pixel.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the sources disagree on cols,
/// rows or planes.
#[inline]
pub fn binary_per_pixel_view<A, B, F>(a: A, b: B, func: F) -> Result<BinaryPerPixelView<A, B, F>>
where
    A: ImageView,
    B: ImageView,
    F: BinaryPixelFunction<A::Pixel, B::Pixel>,
{
    BinaryPerPixelView::new(a, b, func)
}

/// Wraps `source` in an accessor-based unary transform view.
#[inline]
pub fn per_pixel_accessor_view<V, F>(source: V, func: F) -> UnaryPerPixelAccessorView<V, F>
where
    V: ImageView,
    F: AccessorFunction<V::Pixel>,
{
    UnaryPerPixelAccessorView::new(source, func)
}

// ----------------------------------------------------------------------------

/// Value-based unary transform view.
#[derive(Debug, Clone, Copy)]
pub struct UnaryPerPixelView<V, F> {
    source: V,
    func: F,
}

impl<V, F> UnaryPerPixelView<V, F>
where
    V: ImageView,
    F: PixelFunction<V::Pixel>,
{
    /// Creates the view.
    #[inline]
    pub fn new(source: V, func: F) -> Self {
        Self { source, func }
    }

    /// The source view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// The pixel function.
    #[inline]
    pub fn func(&self) -> &F {
        &self.func
    }

    /// Splits the view back into source and functor.
    #[inline]
    pub fn into_parts(self) -> (V, F) {
        (self.source, self.func)
    }
}

impl<V, F> ImageView for UnaryPerPixelView<V, F>
where
    V: ImageView,
    F: PixelFunction<V::Pixel>,
{
    type Pixel = F::Output;
    type Accessor<'a>
        = UnaryAccessor<'a, V::Accessor<'a>, F>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = V::MULTIPLY_ACCESSIBLE && F::MULTIPLY_ACCESSIBLE;
    const PURE: bool = V::PURE && F::PURE;

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
    fn pixel(&self, x: i32, y: i32, p: u32) -> F::Output {
        self.func.apply(self.source.pixel(x, y, p))
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        UnaryAccessor {
            inner: self.source.accessor(x, y, p),
            func: &self.func,
        }
    }

    #[inline]
    fn is_valid_window(&self, window: &BBox) -> bool {
        self.source.is_valid_window(window)
    }
}

/// Accessor of a [`UnaryPerPixelView`].
pub struct UnaryAccessor<'a, A, F> {
    inner: A,
    func: &'a F,
}

impl<A: Clone, F> Clone for UnaryAccessor<'_, A, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            func: self.func,
        }
    }
}

impl<A, F> PixelAccessor for UnaryAccessor<'_, A, F>
where
    A: PixelAccessor,
    F: PixelFunction<A::Pixel>,
{
    type Pixel = F::Output;

    #[inline]
    fn advance(&mut self, dx: i32, dy: i32) {
        self.inner.advance(dx, dy);
    }

    #[inline]
    fn next_plane(&mut self) {
        self.inner.next_plane();
    }

    #[inline]
    fn prev_plane(&mut self) {
        self.inner.prev_plane();
    }

    #[inline]
    fn get(&self) -> F::Output {
        self.func.apply(self.inner.get())
    }

    #[inline]
    fn next_col(&mut self) {
        self.inner.next_col();
    }

    #[inline]
    fn prev_col(&mut self) {
        self.inner.prev_col();
    }

    #[inline]
    fn next_row(&mut self) {
        self.inner.next_row();
    }

    #[inline]
    fn prev_row(&mut self) {
        self.inner.prev_row();
    }
}

// ----------------------------------------------------------------------------

/// Value-based binary transform view.
///
/// Both sources always have identical dimensions; this is checked once at
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct BinaryPerPixelView<A, B, F> {
    a: A,
    b: B,
    func: F,
}

impl<A, B, F> BinaryPerPixelView<A, B, F>
where
    A: ImageView,
    B: ImageView,
    F: BinaryPixelFunction<A::Pixel, B::Pixel>,
{
    /// Creates the view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `a` and `b` differ in cols,
    /// rows or planes.
    pub fn new(a: A, b: B, func: F) -> Result<Self> {
        if a.dimensions() != b.dimensions() {
            return Err(Error::dimension_mismatch(a.dimensions(), b.dimensions()));
        }
        Ok(Self { a, b, func })
    }

    /// The first source.
    #[inline]
    pub fn first(&self) -> &A {
        &self.a
    }

    /// The second source.
    #[inline]
    pub fn second(&self) -> &B {
        &self.b
    }

    /// The pixel function.
    #[inline]
    pub fn func(&self) -> &F {
        &self.func
    }
}

impl<A, B, F> ImageView for BinaryPerPixelView<A, B, F>
where
    A: ImageView,
    B: ImageView,
    F: BinaryPixelFunction<A::Pixel, B::Pixel>,
{
    type Pixel = F::Output;
    type Accessor<'a>
        = BinaryAccessor<'a, A::Accessor<'a>, B::Accessor<'a>, F>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool =
        A::MULTIPLY_ACCESSIBLE && B::MULTIPLY_ACCESSIBLE && F::MULTIPLY_ACCESSIBLE;
    const PURE: bool = A::PURE && B::PURE && F::PURE;

    #[inline]
    fn cols(&self) -> u32 {
        self.a.cols()
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.a.rows()
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.a.planes()
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32, p: u32) -> F::Output {
        self.func.apply(self.a.pixel(x, y, p), self.b.pixel(x, y, p))
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        BinaryAccessor {
            a: self.a.accessor(x, y, p),
            b: self.b.accessor(x, y, p),
            func: &self.func,
        }
    }

    #[inline]
    fn is_valid_window(&self, window: &BBox) -> bool {
        self.a.is_valid_window(window) && self.b.is_valid_window(window)
    }
}

/// Accessor of a [`BinaryPerPixelView`]; moves both source accessors in
/// lockstep.
pub struct BinaryAccessor<'a, A, B, F> {
    a: A,
    b: B,
    func: &'a F,
}

impl<A: Clone, B: Clone, F> Clone for BinaryAccessor<'_, A, B, F> {
    fn clone(&self) -> Self {
        Self {
            a: self.a.clone(),
            b: self.b.clone(),
            func: self.func,
        }
    }
}

impl<A, B, F> PixelAccessor for BinaryAccessor<'_, A, B, F>
where
    A: PixelAccessor,
    B: PixelAccessor,
    F: BinaryPixelFunction<A::Pixel, B::Pixel>,
{
    type Pixel = F::Output;

    #[inline]
    fn advance(&mut self, dx: i32, dy: i32) {
        self.a.advance(dx, dy);
        self.b.advance(dx, dy);
    }

    #[inline]
    fn next_plane(&mut self) {
        self.a.next_plane();
        self.b.next_plane();
    }

    #[inline]
    fn prev_plane(&mut self) {
        self.a.prev_plane();
        self.b.prev_plane();
    }

    #[inline]
    fn get(&self) -> F::Output {
        self.func.apply(self.a.get(), self.b.get())
    }

    #[inline]
    fn next_col(&mut self) {
        self.a.next_col();
        self.b.next_col();
    }
}

// ----------------------------------------------------------------------------

/// Accessor-based unary transform view.
///
/// Every output pixel is `func.apply(source.accessor(x, y, p))`. Evaluating
/// a window `W` reads `W.expand(&func.work_area())` from the source, which
/// must be a valid window of the source (wrap the source in an
/// [`EdgeExtendView`](crate::EdgeExtendView) to evaluate up to the border).
#[derive(Debug, Clone, Copy)]
pub struct UnaryPerPixelAccessorView<V, F> {
    source: V,
    func: F,
}

impl<V, F> UnaryPerPixelAccessorView<V, F>
where
    V: ImageView,
    F: AccessorFunction<V::Pixel>,
{
    /// Creates the view.
    #[inline]
    pub fn new(source: V, func: F) -> Self {
        Self { source, func }
    }

    /// The source view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// The accessor function.
    #[inline]
    pub fn func(&self) -> &F {
        &self.func
    }

    /// The functor's footprint relative to each output pixel.
    #[inline]
    pub fn work_area(&self) -> BBox {
        self.func.work_area()
    }

    /// The source window read when evaluating `window`.
    #[inline]
    pub fn source_window(&self, window: &BBox) -> BBox {
        window.expand(&self.func.work_area())
    }
}

impl<V, F> ImageView for UnaryPerPixelAccessorView<V, F>
where
    V: ImageView,
    F: AccessorFunction<V::Pixel>,
{
    type Pixel = F::Output;
    type Accessor<'a>
        = PerPixelAccessorAccessor<'a, V::Accessor<'a>, F>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = V::MULTIPLY_ACCESSIBLE && F::MULTIPLY_ACCESSIBLE;
    const PURE: bool = V::PURE && F::PURE;

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
    fn pixel(&self, x: i32, y: i32, p: u32) -> F::Output {
        self.func.apply(self.source.accessor(x, y, p))
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        PerPixelAccessorAccessor {
            inner: self.source.accessor(x, y, p),
            func: &self.func,
        }
    }

    #[inline]
    fn is_valid_window(&self, window: &BBox) -> bool {
        self.source.is_valid_window(&self.source_window(window))
    }
}

/// Accessor of a [`UnaryPerPixelAccessorView`]; hands a copy of the source
/// accessor to the functor on dereference.
pub struct PerPixelAccessorAccessor<'a, A, F> {
    inner: A,
    func: &'a F,
}

impl<A: Clone, F> Clone for PerPixelAccessorAccessor<'_, A, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            func: self.func,
        }
    }
}

impl<A, F> PixelAccessor for PerPixelAccessorAccessor<'_, A, F>
where
    A: PixelAccessor,
    F: AccessorFunction<A::Pixel>,
{
    type Pixel = F::Output;

    #[inline]
    fn advance(&mut self, dx: i32, dy: i32) {
        self.inner.advance(dx, dy);
    }

    #[inline]
    fn next_plane(&mut self) {
        self.inner.next_plane();
    }

    #[inline]
    fn prev_plane(&mut self) {
        self.inner.prev_plane();
    }

    #[inline]
    fn get(&self) -> F::Output {
        self.func.apply(self.inner.clone())
    }

    #[inline]
    fn next_col(&mut self) {
        self.inner.next_col();
    }
}
