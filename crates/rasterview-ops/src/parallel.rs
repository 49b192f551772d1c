//! Multi-threaded rasterization using Rayon.
//!
//! The destination is cut into bands of [`RasterOptions::tile_rows`] rows
//! (rows of all planes, stacked plane after plane). Each band is filled on a
//! worker thread with its own accessors, so the result is identical to the
//! sequential engine.
//!
//! A fill is split only when all of these hold:
//!
//! - the `parallel` cargo feature is enabled
//! - the view is [`PURE`](ImageView::PURE)
//! - `opts.parallel` is set
//! - the window has at least `opts.min_parallel_pixels` pixels
//!
//! Otherwise the call falls back to [`rasterview_core::rasterize`].
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{per_pixel_view, Image, ImageView};
//! use rasterview_ops::{parallel, RasterOptions};
//!
//! let src = Image::from_fn(256, 256, 3, |x, y, p| (x ^ y) as f32 + p as f32);
//! let view = per_pixel_view(&src, |v: f32| v * 0.5);
//!
//! let opts = RasterOptions::default().with_min_parallel_pixels(0);
//! let fast = parallel::materialize(&view, &opts).unwrap();
//! assert_eq!(fast, view.materialize().unwrap());
//! ```

use crate::RasterOptions;
use rasterview_core::{BBox, Image, ImageView, Result};
use tracing::debug;

#[cfg(feature = "parallel")]
use rasterview_core::{validate_window, Error, PixelAccessor};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use tracing::trace;

/// Returns `true` if a fill of `window` from `V` would be split.
pub fn would_parallelize<V: ImageView>(src: &V, window: &BBox, opts: &RasterOptions) -> bool {
    let pixels = window.area() * src.planes() as u64;
    let split = cfg!(feature = "parallel")
        && V::PURE
        && opts.parallel
        && !window.is_empty()
        && pixels >= opts.min_parallel_pixels;
    if !split {
        debug!(
            pure = V::PURE,
            enabled = opts.parallel,
            pixels,
            threshold = opts.min_parallel_pixels,
            "sequential fill"
        );
    }
    split
}

/// Row `r` of the stacked destination as (y, plane).
#[cfg(feature = "parallel")]
#[inline]
fn stacked_row(window: &BBox, r: usize) -> (i32, u32) {
    let height = window.height as usize;
    (window.y + (r % height) as i32, (r / height) as u32)
}

/// Fills one band: `rows` holds consecutive destination rows starting at
/// stacked row `first`.
#[cfg(feature = "parallel")]
fn fill_band<V: ImageView>(src: &V, window: &BBox, first: usize, rows: &mut [V::Pixel]) {
    for (k, row) in rows.chunks_mut(window.width as usize).enumerate() {
        let (y, p) = stacked_row(window, first + k);
        let mut acc = src.accessor(window.x, y, p);
        for slot in row {
            *slot = acc.get();
            acc.next_col();
        }
    }
}

/// Fallible [`fill_band`]: stops at the first failing pixel of the band.
#[cfg(feature = "parallel")]
fn try_fill_band<V, T, E>(src: &V, window: &BBox, first: usize, rows: &mut [T]) -> std::result::Result<(), E>
where
    V: ImageView<Pixel = std::result::Result<T, E>>,
{
    for (k, row) in rows.chunks_mut(window.width as usize).enumerate() {
        let (y, p) = stacked_row(window, first + k);
        let mut acc = src.accessor(window.x, y, p);
        for slot in row {
            *slot = acc.get()?;
            acc.next_col();
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn split_rasterize<V>(src: &V, dst: &mut Image<V::Pixel>, window: BBox, opts: &RasterOptions) -> Result<()>
where
    V: ImageView + Sync,
    V::Pixel: Clone + Send,
{
    validate_window(src, dst.dimensions(), &window)?;
    let band_rows = opts.band_rows();
    trace!(%window, band_rows, "parallel rasterize");
    dst.data_mut()
        .par_chunks_mut(band_rows * window.width as usize)
        .enumerate()
        .for_each(|(i, rows)| fill_band(src, &window, i * band_rows, rows));
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn split_rasterize<V>(src: &V, dst: &mut Image<V::Pixel>, window: BBox, _opts: &RasterOptions) -> Result<()>
where
    V: ImageView,
    V::Pixel: Clone,
{
    rasterview_core::rasterize(src, dst, window)
}

#[cfg(feature = "parallel")]
fn split_materialize<V>(src: &V, opts: &RasterOptions) -> Result<Image<V::Pixel>>
where
    V: ImageView + Sync,
    V::Pixel: Clone + Send,
{
    let window = src.bounds();
    if !src.is_valid_window(&window) {
        return Err(Error::invalid_region(window, src.cols(), src.rows()));
    }
    let band_rows = opts.band_rows();
    let total_rows = window.height as usize * src.planes() as usize;
    let width = window.width as usize;
    trace!(%window, band_rows, "parallel materialize");
    let data: Vec<V::Pixel> = (0..total_rows.div_ceil(band_rows))
        .into_par_iter()
        .flat_map_iter(|i| {
            let first = i * band_rows;
            let rows = band_rows.min(total_rows - first);
            (0..rows * width).map(move |k| {
                let (y, p) = stacked_row(&window, first + k / width);
                src.pixel(window.x + (k % width) as i32, y, p)
            })
        })
        .collect();
    Image::from_data(src.cols(), src.rows(), src.planes(), data)
}

#[cfg(not(feature = "parallel"))]
fn split_materialize<V>(src: &V, _opts: &RasterOptions) -> Result<Image<V::Pixel>>
where
    V: ImageView,
    V::Pixel: Clone,
{
    Image::from_view(src)
}

#[cfg(feature = "parallel")]
fn split_try_rasterize<V, T, E>(
    src: &V,
    dst: &mut Image<T>,
    window: BBox,
    opts: &RasterOptions,
) -> std::result::Result<(), E>
where
    V: ImageView<Pixel = std::result::Result<T, E>> + Sync,
    T: Clone + Send,
    E: From<Error> + Send,
{
    validate_window(src, dst.dimensions(), &window)?;
    let band_rows = opts.band_rows();
    trace!(%window, band_rows, "parallel try_rasterize");
    let failure = dst
        .data_mut()
        .par_chunks_mut(band_rows * window.width as usize)
        .enumerate()
        .map(|(i, rows)| try_fill_band(src, &window, i * band_rows, rows))
        .find_map_first(|r| r.err());
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(not(feature = "parallel"))]
fn split_try_rasterize<V, T, E>(
    src: &V,
    dst: &mut Image<T>,
    window: BBox,
    _opts: &RasterOptions,
) -> std::result::Result<(), E>
where
    V: ImageView<Pixel = std::result::Result<T, E>>,
    T: Clone,
    E: From<rasterview_core::Error>,
{
    rasterview_core::try_rasterize(src, dst, window)
}

/// Rasterizes `window` of `src` into `dst`, splitting the work across
/// threads when worthwhile.
///
/// # Errors
///
/// Same as [`rasterview_core::rasterize`].
pub fn rasterize<V>(src: &V, dst: &mut Image<V::Pixel>, window: BBox, opts: &RasterOptions) -> Result<()>
where
    V: ImageView + Sync,
    V::Pixel: Clone + Send,
{
    if would_parallelize(src, &window, opts) {
        split_rasterize(src, dst, window, opts)
    } else {
        rasterview_core::rasterize(src, dst, window)
    }
}

/// Rasterizes the whole of `src` into a new image.
///
/// # Errors
///
/// Same as [`Image::from_view`].
pub fn materialize<V>(src: &V, opts: &RasterOptions) -> Result<Image<V::Pixel>>
where
    V: ImageView + Sync,
    V::Pixel: Clone + Send,
{
    if would_parallelize(src, &src.bounds(), opts) {
        split_materialize(src, opts)
    } else {
        Image::from_view(src)
    }
}

/// Parallel counterpart of [`rasterview_core::try_rasterize`].
///
/// If several pixels fail, the error of the first one in raster order is
/// returned. Bands after it may or may not have been written.
pub fn try_rasterize<V, T, E>(
    src: &V,
    dst: &mut Image<T>,
    window: BBox,
    opts: &RasterOptions,
) -> std::result::Result<(), E>
where
    V: ImageView<Pixel = std::result::Result<T, E>> + Sync,
    T: Clone + Send,
    E: From<rasterview_core::Error> + Send,
{
    if would_parallelize(src, &window, opts) {
        split_try_rasterize(src, dst, window, opts)
    } else {
        rasterview_core::try_rasterize(src, dst, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterview_core::{per_pixel_accessor_view, per_pixel_view, ClampEdge, EdgeExtendView, Impure};

    fn opts() -> RasterOptions {
        RasterOptions::default().with_tile_rows(3).with_min_parallel_pixels(0)
    }

    fn source() -> Image<f32> {
        Image::from_fn(37, 23, 2, |x, y, p| (x * 31 + y * 7) as f32 + 0.5 * p as f32)
    }

    #[test]
    fn test_parallel_equals_sequential() {
        let img = source();
        let view = per_pixel_view(&img, |v: f32| v * v - 3.0);
        let window = BBox::new(4, 2, 29, 17);

        let mut seq: Image<f32> = Image::new(29, 17, 2);
        rasterview_core::rasterize(&view, &mut seq, window).unwrap();

        let mut par: Image<f32> = Image::new(29, 17, 2);
        rasterize(&view, &mut par, window, &opts()).unwrap();

        assert_eq!(seq, par);
    }

    #[test]
    fn test_parallel_materialize_stencil() {
        let img = source();
        let blur = crate::stencil::box_mean(EdgeExtendView::new(&img, ClampEdge), 2);
        let par = materialize(&blur, &opts()).unwrap();
        assert_eq!(par, blur.materialize().unwrap());
    }

    #[test]
    fn test_parallel_checks_window() {
        let img = source();
        let mut dst: Image<f32> = Image::new(10, 10, 2);
        assert!(rasterize(&img, &mut dst, BBox::new(30, 0, 10, 10), &opts()).is_err());
        let mut wrong: Image<f32> = Image::new(10, 9, 2);
        assert!(rasterize(&img, &mut wrong, BBox::new(0, 0, 10, 10), &opts()).is_err());
    }

    #[test]
    fn test_impure_view_stays_sequential() {
        let img = source();
        let impure = per_pixel_view(&img, Impure(|v: f32| v + 1.0));
        assert!(!would_parallelize(&impure, &impure.bounds(), &opts()));
        let stencil = per_pixel_accessor_view(&img, crate::stencil::DerivativeX);
        assert!(!rasterview_core::is_multiply_accessible(&stencil));
        assert_eq!(
            would_parallelize(&stencil, &stencil.bounds(), &opts()),
            cfg!(feature = "parallel")
        );
        assert!(!would_parallelize(&stencil, &stencil.bounds(), &opts().with_parallel(false)));
        assert!(!would_parallelize(&img, &img.bounds(), &RasterOptions::default()));
    }

    #[test]
    fn test_parallel_try_rasterize_first_error() {
        let img = source();
        let checked = per_pixel_view(&img, |v: f32| {
            if v > 500.0 {
                Err(rasterview_core::Error::other(format!("{v}")))
            } else {
                Ok(v)
            }
        });
        let window = img.bounds();
        let mut par: Image<f32> = Image::new(37, 23, 2);
        let par_err = try_rasterize(&checked, &mut par, window, &opts()).unwrap_err();
        let mut seq: Image<f32> = Image::new(37, 23, 2);
        let seq_err = rasterview_core::try_rasterize(&checked, &mut seq, window).unwrap_err();
        assert_eq!(par_err, seq_err);

        let small = BBox::new(0, 0, 5, 2);
        let mut ok: Image<f32> = Image::new(5, 2, 2);
        try_rasterize(&checked, &mut ok, small, &opts()).unwrap();
        assert_eq!(ok.pixel(4, 1, 1), img.pixel(4, 1, 1));
    }
}
