//! The rasterization engine: materializing views into buffers.
//!
//! [`rasterize`] fills a destination [`Image`] with the pixels of an
//! axis-aligned window of a view, all planes. The destination's pixel
//! (i, j, p) receives the view's pixel (window.x + i, window.y + j, p).
//!
//! # Paths
//!
//! - **Bulk**: when [`ImageView::BULK_RASTERIZE`] is set, the view's own
//!   [`ImageView::rasterize_bulk`] runs. Images copy whole rows; crops
//!   forward the translated window to their source.
//! - **Generic**: otherwise an accessor is seated at the start of each row
//!   and walked with `next_col()`, in raster order. For accessor-based
//!   transforms this is exactly the walk their functor expects.
//!
//! Both paths produce what indexed access would: rasterization changes the
//! evaluation order, never the values. Rasterizing a sub-window equals
//! rasterizing the whole view and cropping.
//!
//! # Fallible views
//!
//! Views whose pixels are `Result<T, E>` (e.g. built over a coordinate
//! transform that can fail) go through [`try_rasterize`], which stops at the
//! first failing pixel and returns its error unchanged.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{per_pixel_view, rasterize, BBox, Image, ImageView};
//!
//! let src = Image::from_data(2, 2, 1, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
//! let neg = per_pixel_view(&src, |v: f32| -v);
//!
//! let mut column: Image<f32> = Image::new(1, 2, 1);
//! rasterize(&neg, &mut column, BBox::new(1, 0, 1, 2)).unwrap();
//! assert_eq!(column.data(), &[-2.0, -4.0]);
//! ```

use crate::{BBox, Error, Image, ImageView, PixelAccessor, Result};
use tracing::trace;

/// Checks that `window` can be rasterized from `src` into a buffer of
/// `dst_dims`.
///
/// Runs the checks of [`rasterize`] without evaluating any pixel, for
/// alternative fill strategies that write into the destination themselves.
pub fn validate_window<V: ImageView>(src: &V, dst_dims: (u32, u32, u32), window: &BBox) -> Result<()> {
    if !src.is_valid_window(window) {
        return Err(Error::invalid_region(*window, src.cols(), src.rows()));
    }
    if (dst_dims.0, dst_dims.1) != (window.width, window.height) {
        return Err(Error::dimension_mismatch(
            dst_dims,
            (window.width, window.height, src.planes()),
        ));
    }
    if dst_dims.2 != src.planes() {
        return Err(Error::plane_mismatch(src.planes(), dst_dims.2));
    }
    Ok(())
}

/// Rasterizes `window` of `src` into `dst`.
///
/// # Errors
///
/// - [`Error::InvalidRegion`] if `window` is not a valid window of `src`
///   (outside its bounds, or its work-area expansion leaves a source's
///   bounds)
/// - [`Error::DimensionMismatch`] if `dst` is not `window.width` by
///   `window.height`
/// - [`Error::PlaneMismatch`] if `dst` has a different plane count
///
/// `dst` is untouched when an error is returned.
pub fn rasterize<V>(src: &V, dst: &mut Image<V::Pixel>, window: BBox) -> Result<()>
where
    V: ImageView,
    V::Pixel: Clone,
{
    validate_window(src, dst.dimensions(), &window)?;
    trace!(
        cols = src.cols(),
        rows = src.rows(),
        planes = src.planes(),
        %window,
        bulk = V::BULK_RASTERIZE,
        "rasterize"
    );
    if V::BULK_RASTERIZE {
        src.rasterize_bulk(dst, window);
    } else {
        rasterize_generic(src, dst, window);
    }
    Ok(())
}

/// Rasterizes the whole of `src` into `dst`.
pub fn rasterize_full<V>(src: &V, dst: &mut Image<V::Pixel>) -> Result<()>
where
    V: ImageView,
    V::Pixel: Clone,
{
    rasterize(src, dst, src.bounds())
}

/// Rasterizes a view of `Result` pixels, stopping at the first error.
///
/// Pixels are evaluated in raster order; the first `Err` aborts the fill
/// and is returned as is. On error, `dst` holds the pixels written before
/// the failure. Window and destination checks are reported through
/// `E::from`.
///
/// # Example
///
/// ```rust
/// use rasterview_core::{per_pixel_view, try_rasterize, Image, ImageView};
///
/// let src = Image::from_data(3, 1, 1, vec![4.0f64, -1.0, 9.0]).unwrap();
/// let sqrt = per_pixel_view(&src, |v: f64| {
///     if v < 0.0 {
///         Err(rasterview_core::Error::other("negative input"))
///     } else {
///         Ok(v.sqrt())
///     }
/// });
///
/// let mut dst: Image<f64> = Image::new(3, 1, 1);
/// let err = try_rasterize(&sqrt, &mut dst, sqrt.bounds()).unwrap_err();
/// assert_eq!(err.to_string(), "negative input");
/// assert_eq!(dst.pixel(0, 0, 0), 2.0);
/// ```
pub fn try_rasterize<V, T, E>(
    src: &V,
    dst: &mut Image<T>,
    window: BBox,
) -> std::result::Result<(), E>
where
    V: ImageView<Pixel = std::result::Result<T, E>>,
    T: Clone,
    E: From<Error>,
{
    validate_window(src, dst.dimensions(), &window)?;
    trace!(cols = src.cols(), rows = src.rows(), %window, "try_rasterize");
    for p in 0..src.planes() {
        for (row, y) in (window.y..window.max_y()).enumerate() {
            let mut acc = src.accessor(window.x, y, p);
            for slot in dst.row_mut(row as u32, p) {
                *slot = acc.get()?;
                acc.next_col();
            }
        }
    }
    Ok(())
}

/// The per-pixel accessor walk used when a view has no bulk path.
///
/// No checks are made: `window` must be valid for `src` and `dst` must be
/// `window.width × window.height × src.planes()`. Use [`rasterize`] unless
/// those preconditions are already established.
pub fn rasterize_generic<V>(src: &V, dst: &mut Image<V::Pixel>, window: BBox)
where
    V: ImageView,
    V::Pixel: Clone,
{
    for p in 0..src.planes() {
        for (row, y) in (window.y..window.max_y()).enumerate() {
            let mut acc = src.accessor(window.x, y, p);
            for slot in dst.row_mut(row as u32, p) {
                *slot = acc.get();
                acc.next_col();
            }
        }
    }
}

/// Evaluates `window` of `src` into a vector in raster order.
///
/// Same preconditions as [`rasterize_generic`].
pub fn collect_window<V: ImageView>(src: &V, window: BBox) -> Vec<V::Pixel> {
    let mut out = Vec::with_capacity(window.area() as usize * src.planes() as usize);
    for p in 0..src.planes() {
        for y in window.y..window.max_y() {
            let mut acc = src.accessor(window.x, y, p);
            for _ in 0..window.width {
                out.push(acc.get());
                acc.next_col();
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{per_pixel_accessor_view, per_pixel_view, AccessorFunction, Impure};
    use std::cell::Cell;

    struct AccessorNegation;

    impl AccessorFunction<f32> for AccessorNegation {
        type Output = f32;

        fn work_area(&self) -> BBox {
            BBox::unit()
        }

        fn apply<A: PixelAccessor<Pixel = f32>>(&self, acc: A) -> f32 {
            -acc.get()
        }
    }

    fn sample() -> Image<f32> {
        Image::from_data(2, 2, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_full_rasterize_matches_indexing() {
        let img = sample();
        let ppv = per_pixel_accessor_view(&img, AccessorNegation);
        let mut dst: Image<f32> = Image::new(2, 2, 1);
        rasterize_full(&ppv, &mut dst).unwrap();
        assert_eq!(dst.data(), &[-1.0, -2.0, -3.0, -4.0]);
        for (x, y) in ppv.bounds().iter_coords() {
            assert_eq!(dst.pixel(x, y, 0), ppv.pixel(x, y, 0));
        }
    }

    #[test]
    fn test_partial_rasterize_column_and_row() {
        let img = sample();
        let ppv = per_pixel_accessor_view(&img, AccessorNegation);

        let mut col: Image<f32> = Image::new(1, 2, 1);
        rasterize(&ppv, &mut col, BBox::new(1, 0, 1, 2)).unwrap();
        assert_eq!(col.pixel(0, 0, 0), ppv.pixel(1, 0, 0));
        assert_eq!(col.pixel(0, 1, 0), ppv.pixel(1, 1, 0));

        let mut row: Image<f32> = Image::new(2, 1, 1);
        rasterize(&ppv, &mut row, BBox::new(0, 1, 2, 1)).unwrap();
        assert_eq!(row.data(), &[-3.0, -4.0]);
    }

    #[test]
    fn test_window_outside_view_is_rejected() {
        let img = sample();
        let mut dst: Image<f32> = Image::new(2, 2, 1);
        let err = rasterize(&img, &mut dst, BBox::new(1, 0, 2, 2)).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { .. }));
        assert_eq!(dst.data(), &[0.0; 4]);
    }

    #[test]
    fn test_destination_size_is_checked() {
        let img = sample();
        let mut wrong: Image<f32> = Image::new(2, 1, 1);
        assert!(matches!(
            rasterize(&img, &mut wrong, BBox::new(0, 0, 1, 2)),
            Err(Error::DimensionMismatch { .. })
        ));

        let mut planes: Image<f32> = Image::new(1, 2, 3);
        assert!(matches!(
            rasterize(&img, &mut planes, BBox::new(0, 0, 1, 2)),
            Err(Error::PlaneMismatch { expected: 1, got: 3 })
        ));
    }

    #[test]
    fn test_bulk_and_generic_paths_agree() {
        let img = Image::from_fn(5, 4, 2, |x, y, p| (x * 7 + y * 3) as f32 + p as f32);
        let window = BBox::new(1, 1, 3, 2);

        let mut bulk: Image<f32> = Image::new(3, 2, 2);
        rasterize(&img, &mut bulk, window).unwrap();

        let mut generic: Image<f32> = Image::new(3, 2, 2);
        rasterize_generic(&img, &mut generic, window);

        assert_eq!(bulk, generic);
    }

    #[test]
    fn test_empty_window() {
        let img = sample();
        let mut dst: Image<f32> = Image::new(0, 0, 1);
        assert!(rasterize(&img, &mut dst, BBox::new(1, 1, 0, 0)).is_ok());
    }

    #[test]
    fn test_impure_functor_evaluated_once_per_pixel() {
        let img = sample();
        let calls = Cell::new(0usize);
        let counted = per_pixel_view(
            &img,
            Impure(|v: f32| {
                calls.set(calls.get() + 1);
                v
            }),
        );
        let mut dst: Image<f32> = Image::new(2, 2, 1);
        rasterize_full(&counted, &mut dst).unwrap();
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_try_rasterize_aborts_on_first_error() {
        let img = Image::from_data(2, 2, 1, vec![1, 2, -3, 4]).unwrap();
        let checked = per_pixel_view(&img, |v: i32| {
            if v < 0 {
                Err(Error::other(format!("bad pixel {v}")))
            } else {
                Ok(v * 10)
            }
        });
        let mut dst: Image<i32> = Image::new(2, 2, 1);
        let err = try_rasterize(&checked, &mut dst, checked.bounds()).unwrap_err();
        assert_eq!(err, Error::other("bad pixel -3"));
        assert_eq!(dst.data(), &[10, 20, 0, 0]);

        let mut top: Image<i32> = Image::new(2, 1, 1);
        try_rasterize(&checked, &mut top, BBox::new(0, 0, 2, 1)).unwrap();
        assert_eq!(top.data(), &[10, 20]);
    }

    #[test]
    fn test_collect_window_raster_order() {
        let img = Image::from_fn(3, 2, 2, |x, y, p| (x, y, p));
        let values = collect_window(&img, BBox::new(1, 0, 2, 2));
        assert_eq!(
            values,
            vec![(1, 0, 0), (2, 0, 0), (1, 1, 0), (2, 1, 0), (1, 0, 1), (2, 0, 1), (1, 1, 1), (2, 1, 1)]
        );
    }
}
