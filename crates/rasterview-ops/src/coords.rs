//! Point transforms and the resampling view built on them.
//!
//! A [`PointTransform`] maps pixel coordinates between two images, in both
//! directions, and may fail for points outside its domain. The rest of this
//! module builds on that boundary:
//!
//! - [`AffineTransform`] - 2D affine map backed by [`glam::DAffine2`]
//! - [`forward_bbox`] / [`reverse_bbox`] - map a pixel window through a
//!   transform by sampling its boundary
//! - [`TransformView`] - lazily resamples a source view through a
//!   transform; failures surface as `Err` pixels and abort
//!   [`try_rasterize`](rasterview_core::try_rasterize)
//!
//! Pixel (x, y) is the point `(x, y)`: integer coordinates are pixel
//! centers.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{try_rasterize, ClampEdge, EdgeExtendView, Image, ImageView};
//! use rasterview_ops::coords::{transform_view, AffineTransform, Interpolation};
//! use rasterview_ops::TransformError;
//!
//! let src = Image::from_fn(4, 4, 1, |x, y, _| (x + 10 * y) as f32);
//! let shift = AffineTransform::translation(1.0, 0.0);
//!
//! let moved = transform_view(
//!     EdgeExtendView::new(&src, ClampEdge),
//!     shift,
//!     Interpolation::Nearest,
//!     4,
//!     4,
//! );
//! let mut dst: Image<f32> = Image::new(4, 4, 1);
//! try_rasterize::<_, _, TransformError>(&moved, &mut dst, moved.bounds()).unwrap();
//! assert_eq!(dst.pixel(1, 2, 0), 20.0);
//! assert_eq!(dst.pixel(0, 2, 0), 20.0);
//! ```

use crate::{TransformError, TransformResult};
use glam::{DAffine2, DVec2};
use rasterview_core::{BBox, ImageView, ViewAccessor};
use tracing::trace;

/// Bidirectional mapping between two pixel coordinate systems.
///
/// `reverse(forward(p))` is `p` wherever both directions succeed.
pub trait PointTransform {
    /// Maps a source point to the destination.
    fn forward(&self, p: DVec2) -> TransformResult<DVec2>;

    /// Maps a destination point back to the source.
    fn reverse(&self, p: DVec2) -> TransformResult<DVec2>;
}

impl<T: PointTransform + ?Sized> PointTransform for &T {
    #[inline]
    fn forward(&self, p: DVec2) -> TransformResult<DVec2> {
        (**self).forward(p)
    }

    #[inline]
    fn reverse(&self, p: DVec2) -> TransformResult<DVec2> {
        (**self).reverse(p)
    }
}

// ============================================================================
// Affine
// ============================================================================

/// A 2D affine transform.
///
/// The inverse is computed once at construction; a singular matrix yields a
/// transform whose [`reverse`](PointTransform::reverse) always fails with
/// [`TransformError::Singular`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    forward: DAffine2,
    inverse: Option<DAffine2>,
}

impl AffineTransform {
    /// Creates a transform from a glam affine matrix.
    pub fn new(forward: DAffine2) -> Self {
        let det = forward.matrix2.determinant();
        let inverse = (det != 0.0 && det.is_finite()).then(|| forward.inverse());
        Self { forward, inverse }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(DAffine2::IDENTITY)
    }

    /// Translation by (dx, dy).
    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new(DAffine2::from_translation(DVec2::new(dx, dy)))
    }

    /// Axis-aligned scaling by (sx, sy).
    #[inline]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(DAffine2::from_scale(DVec2::new(sx, sy)))
    }

    /// The forward matrix.
    #[inline]
    pub fn matrix(&self) -> DAffine2 {
        self.forward
    }

    /// Returns `true` if the transform can be reversed.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.inverse.is_some()
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Singular`] if the matrix is not invertible.
    pub fn inverse(&self) -> TransformResult<Self> {
        self.inverse.map(Self::new).ok_or(TransformError::Singular)
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &AffineTransform) -> Self {
        Self::new(next.forward * self.forward)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl PointTransform for AffineTransform {
    #[inline]
    fn forward(&self, p: DVec2) -> TransformResult<DVec2> {
        Ok(self.forward.transform_point2(p))
    }

    #[inline]
    fn reverse(&self, p: DVec2) -> TransformResult<DVec2> {
        self.inverse
            .map(|inv| inv.transform_point2(p))
            .ok_or(TransformError::Singular)
    }
}

// ============================================================================
// Window mapping
// ============================================================================

/// Maps every boundary pixel of `window` through `map` and returns the
/// smallest window holding all images.
///
/// Images whose enclosing window leaves the `i32` range are out of domain.
fn map_bbox<F>(window: &BBox, map: F) -> TransformResult<BBox>
where
    F: Fn(DVec2) -> TransformResult<DVec2>,
{
    if window.is_empty() {
        return Ok(*window);
    }
    let mut lo = DVec2::splat(f64::INFINITY);
    let mut hi = DVec2::splat(f64::NEG_INFINITY);
    let mut visit = |x: i32, y: i32| -> TransformResult<()> {
        let q = map(DVec2::new(x as f64, y as f64))?;
        if !q.is_finite() {
            return Err(TransformError::out_of_domain(x as f64, y as f64));
        }
        lo = lo.min(q);
        hi = hi.max(q);
        Ok(())
    };

    let (x0, y0) = (window.min_x(), window.min_y());
    let (x1, y1) = (window.max_x() - 1, window.max_y() - 1);
    for x in x0..=x1 {
        visit(x, y0)?;
        if y1 != y0 {
            visit(x, y1)?;
        }
    }
    for y in (y0 + 1)..y1 {
        visit(x0, y)?;
        if x1 != x0 {
            visit(x1, y)?;
        }
    }

    let lo = lo.floor();
    let hi = hi.floor() + 1.0;
    let range = i32::MIN as f64..=i32::MAX as f64;
    for corner in [lo, hi] {
        if !range.contains(&corner.x) || !range.contains(&corner.y) {
            return Err(TransformError::out_of_domain(corner.x, corner.y));
        }
    }
    Ok(BBox::from_corners(lo.x as i32, lo.y as i32, hi.x as i32, hi.y as i32))
}

/// Maps a source window to the enclosing destination window.
///
/// # Errors
///
/// Fails with the transform's error if any boundary pixel cannot be mapped.
pub fn forward_bbox<T: PointTransform>(tx: &T, window: &BBox) -> TransformResult<BBox> {
    let out = map_bbox(window, |p| tx.forward(p))?;
    trace!(%window, result = %out, "forward_bbox");
    Ok(out)
}

/// Maps a destination window to the enclosing source window.
///
/// # Errors
///
/// Fails with the transform's error if any boundary pixel cannot be mapped.
pub fn reverse_bbox<T: PointTransform>(tx: &T, window: &BBox) -> TransformResult<BBox> {
    let out = map_bbox(window, |p| tx.reverse(p))?;
    trace!(%window, result = %out, "reverse_bbox");
    Ok(out)
}

// ============================================================================
// Resampling view
// ============================================================================

/// Sampling rule of a [`TransformView`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    /// Nearest source pixel.
    #[default]
    Nearest,
    /// Bilinear blend of the four surrounding pixels.
    Bilinear,
}

/// Pixels that can be blended linearly.
pub trait Lerp: Clone {
    /// `a + (b - a) * t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(a: &f32, b: &f32, t: f64) -> f32 {
        a + (b - a) * t as f32
    }
}

impl Lerp for f64 {
    #[inline]
    fn lerp(a: &f64, b: &f64, t: f64) -> f64 {
        a + (b - a) * t
    }
}

impl<const N: usize> Lerp for [f32; N] {
    #[inline]
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        std::array::from_fn(|i| <f32 as Lerp>::lerp(&a[i], &b[i], t))
    }
}

/// Resamples `source` through `tx` into a `cols × rows` view.
#[inline]
pub fn transform_view<V, T>(
    source: V,
    tx: T,
    interpolation: Interpolation,
    cols: u32,
    rows: u32,
) -> TransformView<V, T>
where
    V: ImageView,
    V::Pixel: Lerp,
    T: PointTransform,
{
    TransformView::new(source, tx, interpolation, cols, rows)
}

/// A view whose pixel (x, y) is the source sampled at `tx.reverse((x, y))`.
///
/// The pixel type is `Result<P, TransformError>`. A pixel is `Err` when the
/// reverse mapping fails, or when the sample needs source pixels outside the
/// source's valid region. Wrap the source in an
/// [`EdgeExtendView`](rasterview_core::EdgeExtendView) to sample anywhere.
///
/// Every read re-runs the point transform and the interpolation, so the view
/// is not multiply accessible. It is pure whenever its source is.
#[derive(Debug, Clone, Copy)]
pub struct TransformView<V, T> {
    source: V,
    tx: T,
    interpolation: Interpolation,
    cols: u32,
    rows: u32,
}

impl<V, T> TransformView<V, T>
where
    V: ImageView,
    V::Pixel: Lerp,
    T: PointTransform,
{
    /// Creates the view; see [`transform_view`].
    pub fn new(source: V, tx: T, interpolation: Interpolation, cols: u32, rows: u32) -> Self {
        Self {
            source,
            tx,
            interpolation,
            cols,
            rows,
        }
    }

    /// The resampled view.
    #[inline]
    pub fn source(&self) -> &V {
        &self.source
    }

    /// The point transform.
    #[inline]
    pub fn transform(&self) -> &T {
        &self.tx
    }

    /// The sampling rule.
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    fn sample(&self, pt: DVec2, p: u32) -> TransformResult<V::Pixel> {
        if !pt.is_finite() {
            return Err(TransformError::out_of_domain(pt.x, pt.y));
        }
        match self.interpolation {
            Interpolation::Nearest => {
                let x = pt.x.round() as i32;
                let y = pt.y.round() as i32;
                if !self.source.is_valid_window(&BBox::new(x, y, 1, 1)) {
                    return Err(TransformError::out_of_domain(pt.x, pt.y));
                }
                Ok(self.source.pixel(x, y, p))
            }
            Interpolation::Bilinear => {
                let x0 = pt.x.floor();
                let y0 = pt.y.floor();
                let fx = pt.x - x0;
                let fy = pt.y - y0;
                let (x0, y0) = (x0 as i32, y0 as i32);
                let footprint = BBox::new(x0, y0, 1 + u32::from(fx > 0.0), 1 + u32::from(fy > 0.0));
                if !self.source.is_valid_window(&footprint) {
                    return Err(TransformError::out_of_domain(pt.x, pt.y));
                }
                let s = &self.source;
                let top = if fx > 0.0 {
                    Lerp::lerp(&s.pixel(x0, y0, p), &s.pixel(x0 + 1, y0, p), fx)
                } else {
                    s.pixel(x0, y0, p)
                };
                if fy > 0.0 {
                    let bottom = if fx > 0.0 {
                        Lerp::lerp(&s.pixel(x0, y0 + 1, p), &s.pixel(x0 + 1, y0 + 1, p), fx)
                    } else {
                        s.pixel(x0, y0 + 1, p)
                    };
                    Ok(Lerp::lerp(&top, &bottom, fy))
                } else {
                    Ok(top)
                }
            }
        }
    }
}

impl<V, T> ImageView for TransformView<V, T>
where
    V: ImageView,
    V::Pixel: Lerp,
    T: PointTransform,
{
    type Pixel = TransformResult<V::Pixel>;
    type Accessor<'a>
        = ViewAccessor<'a, Self>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = false;
    const PURE: bool = V::PURE;

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
        self.source.planes()
    }

    fn pixel(&self, x: i32, y: i32, p: u32) -> Self::Pixel {
        let pt = self.tx.reverse(DVec2::new(x as f64, y as f64))?;
        self.sample(pt, p)
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        ViewAccessor::new(self, x, y, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rasterview_core::{try_rasterize, ClampEdge, EdgeExtendView, Image, ZeroEdge};

    /// Accepts points with x < limit only, in the source system.
    struct HalfPlane {
        limit: f64,
    }

    impl PointTransform for HalfPlane {
        fn forward(&self, p: DVec2) -> TransformResult<DVec2> {
            if p.x < self.limit {
                Ok(p * 2.0)
            } else {
                Err(TransformError::out_of_domain(p.x, p.y))
            }
        }

        fn reverse(&self, p: DVec2) -> TransformResult<DVec2> {
            let q = p / 2.0;
            if q.x < self.limit {
                Ok(q)
            } else {
                Err(TransformError::Other(format!("no source for ({}, {})", p.x, p.y)))
            }
        }
    }

    #[test]
    fn test_identity_roundtrip() {
        let tx = AffineTransform::identity();
        let p = DVec2::new(25.0, 25.0);
        let fwd = tx.forward(p).unwrap();
        let rev = tx.reverse(p).unwrap();
        assert_relative_eq!(fwd.x, 25.0, epsilon = 1e-12);
        assert_relative_eq!(fwd.y, 25.0, epsilon = 1e-12);
        assert_relative_eq!(rev.x, 25.0, epsilon = 1e-12);
        assert_relative_eq!(rev.y, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_affine_compose_and_inverse() {
        let tx = AffineTransform::scale(2.0, 3.0).then(&AffineTransform::translation(1.0, -1.0));
        let p = DVec2::new(4.0, 5.0);
        let q = tx.forward(p).unwrap();
        assert_relative_eq!(q.x, 9.0);
        assert_relative_eq!(q.y, 14.0);
        let back = tx.inverse().unwrap().forward(q).unwrap();
        assert_relative_eq!(back.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(back.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_transform() {
        let flat = AffineTransform::scale(1.0, 0.0);
        assert!(!flat.is_invertible());
        assert_eq!(flat.reverse(DVec2::ONE), Err(TransformError::Singular));
        assert_eq!(flat.inverse(), Err(TransformError::Singular));
    }

    #[test]
    fn test_bbox_mapping() {
        let tx = AffineTransform::scale(2.0, 2.0);
        let window = BBox::new(0, 0, 4, 3);
        assert_eq!(forward_bbox(&tx, &window).unwrap(), BBox::new(0, 0, 7, 5));
        assert_eq!(reverse_bbox(&tx, &BBox::new(0, 0, 8, 6)).unwrap(), BBox::new(0, 0, 4, 3));

        let shift = AffineTransform::translation(-10.0, 5.0);
        assert_eq!(forward_bbox(&shift, &window).unwrap(), BBox::new(-10, 5, 4, 3));
    }

    #[test]
    fn test_bbox_beyond_coordinate_range_is_out_of_domain() {
        let stretch = AffineTransform::scale(1e10, 1.0);
        let err = forward_bbox(&stretch, &BBox::new(0, 0, 2, 1)).unwrap_err();
        assert!(matches!(err, TransformError::OutOfDomain { .. }));

        let shift = AffineTransform::translation(-3e9, 0.0);
        assert!(forward_bbox(&shift, &BBox::new(0, 0, 2, 2)).is_err());

        let edge = AffineTransform::translation(i32::MAX as f64 - 4.0, 0.0);
        assert_eq!(
            forward_bbox(&edge, &BBox::new(0, 0, 4, 1)).unwrap(),
            BBox::new(i32::MAX - 4, 0, 4, 1)
        );
    }

    #[test]
    fn test_bbox_forward_ok_reverse_fails() {
        let tx = HalfPlane { limit: 100.0 };
        let window = BBox::new(0, 0, 50, 40);
        assert!(forward_bbox(&tx, &window).is_ok());
        let err = reverse_bbox(&tx, &BBox::new(0, 0, 300, 10)).unwrap_err();
        assert!(matches!(err, TransformError::Other(ref msg) if msg.starts_with("no source")));
    }

    #[test]
    fn test_nearest_identity_matches_source() {
        let src = Image::from_fn(3, 3, 2, |x, y, p| (x + 3 * y) as f32 + 100.0 * p as f32);
        let view = transform_view(&src, AffineTransform::identity(), Interpolation::Nearest, 3, 3);
        for p in 0..2 {
            for (x, y) in src.bounds().iter_coords() {
                assert_eq!(view.pixel(x, y, p), Ok(src.pixel(x, y, p)));
            }
        }
    }

    #[test]
    fn test_bilinear_half_pixel() {
        let src = Image::from_fn(3, 1, 1, |x, _, _| (10 * x) as f64);
        let half = AffineTransform::translation(-0.5, 0.0);
        let view = transform_view(&src, half, Interpolation::Bilinear, 2, 1);
        assert_relative_eq!(view.pixel(0, 0, 0).unwrap(), 5.0);
        assert_relative_eq!(view.pixel(1, 0, 0).unwrap(), 15.0);
    }

    #[test]
    fn test_bilinear_at_last_column_without_extension() {
        let src = Image::from_fn(2, 2, 1, |x, y, _| (x + 2 * y) as f32);
        let view = transform_view(&src, AffineTransform::identity(), Interpolation::Bilinear, 2, 2);
        assert_eq!(view.pixel(1, 1, 0), Ok(3.0));
    }

    #[test]
    fn test_outside_source_is_error_unless_extended() {
        let src = Image::filled(2, 2, 1, 1.0f32);
        let shift = AffineTransform::translation(5.0, 0.0);

        let bare = transform_view(&src, shift, Interpolation::Nearest, 2, 2);
        assert!(matches!(bare.pixel(0, 0, 0), Err(TransformError::OutOfDomain { .. })));

        let zero = transform_view(EdgeExtendView::new(&src, ZeroEdge), shift, Interpolation::Nearest, 2, 2);
        assert_eq!(zero.pixel(0, 0, 0), Ok(0.0));
    }

    #[test]
    fn test_try_rasterize_propagates_transform_error() {
        let src = Image::filled(8, 8, 1, [0.5f32, 0.25, 1.0]);
        let view = transform_view(
            EdgeExtendView::new(&src, ClampEdge),
            HalfPlane { limit: 2.0 },
            Interpolation::Bilinear,
            8,
            8,
        );
        let mut dst: Image<[f32; 3]> = Image::new(8, 8, 1);
        let err = try_rasterize(&view, &mut dst, view.bounds()).unwrap_err();
        assert_eq!(err, TransformError::Other("no source for (4, 0)".into()));

        let mut left: Image<[f32; 3]> = Image::new(4, 8, 1);
        try_rasterize(&view, &mut left, BBox::new(0, 0, 4, 8)).unwrap();
        assert_eq!(left.pixel(3, 7, 0), [0.5, 0.25, 1.0]);
    }
}
