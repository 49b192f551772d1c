//! Benchmarks for rasterview fills.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rasterview_core::{
    crop, per_pixel_view, rasterize, rasterize_generic, BBox, ClampEdge, EdgeExtendView, Image,
    ImageView,
};
use rasterview_ops::{parallel, stencil, transform_view, AffineTransform, Interpolation, RasterOptions};

fn source(size: u32) -> Image<f32> {
    Image::from_fn(size, size, 1, |x, y, _| ((x * 7 + y * 13) % 255) as f32 / 255.0)
}

/// Bulk copy versus the accessor walk on the same window.
fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy");

    for size in [256u32, 1024].iter() {
        let img = source(*size);
        let window = BBox::new(8, 8, size - 16, size - 16);
        let mut dst: Image<f32> = Image::new(window.width, window.height, 1);

        group.throughput(Throughput::Elements(window.area()));

        group.bench_with_input(BenchmarkId::new("bulk", size), &img, |b, img| {
            b.iter(|| rasterize(black_box(img), &mut dst, window))
        });

        group.bench_with_input(BenchmarkId::new("generic", size), &img, |b, img| {
            b.iter(|| rasterize_generic(black_box(img), &mut dst, window))
        });

        group.bench_with_input(BenchmarkId::new("crop_bulk", size), &img, |b, img| {
            let Ok(cropped) = crop(img, window) else { return };
            b.iter(|| rasterize(black_box(&cropped), &mut dst, cropped.bounds()))
        });
    }

    group.finish();
}

/// Per-pixel and neighborhood views.
fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");

    let img = source(1024);
    let window = img.bounds();
    let mut dst: Image<f32> = Image::new(1024, 1024, 1);
    let mut wide: Image<f64> = Image::new(1024, 1024, 1);
    group.throughput(Throughput::Elements(window.area()));

    group.bench_function("per_pixel", |b| {
        let view = per_pixel_view(&img, |v: f32| v * 0.5 + 0.25);
        b.iter(|| rasterize(black_box(&view), &mut dst, window))
    });

    group.bench_function("derivative_x", |b| {
        let view = stencil::derivative_x(EdgeExtendView::new(&img, ClampEdge));
        b.iter(|| rasterize(black_box(&view), &mut wide, window))
    });

    group.bench_function("box_mean_r2", |b| {
        let view = stencil::box_mean(EdgeExtendView::new(&img, ClampEdge), 2);
        b.iter(|| rasterize(black_box(&view), &mut wide, window))
    });

    group.bench_function("resample_bilinear", |b| {
        let view = transform_view(
            EdgeExtendView::new(&img, ClampEdge),
            AffineTransform::scale(1.5, 1.5),
            Interpolation::Bilinear,
            1024,
            1024,
        );
        b.iter(|| rasterview_core::try_rasterize(black_box(&view), &mut dst, window))
    });

    group.finish();
}

/// Sequential versus banded fills of a stencil chain.
fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");

    let img = source(2048);
    let window = img.bounds();
    let mut dst: Image<f64> = Image::new(2048, 2048, 1);
    let view = stencil::box_mean(EdgeExtendView::new(&img, ClampEdge), 3);
    group.throughput(Throughput::Elements(window.area()));

    for tile_rows in [4u32, 16, 64].iter() {
        let opts = RasterOptions::default().with_tile_rows(*tile_rows);
        group.bench_with_input(BenchmarkId::new("banded", tile_rows), &opts, |b, opts| {
            b.iter(|| parallel::rasterize(black_box(&view), &mut dst, window, opts))
        });
    }

    let seq = RasterOptions::sequential();
    group.bench_function("sequential", |b| {
        b.iter(|| parallel::rasterize(black_box(&view), &mut dst, window, &seq))
    });

    group.finish();
}

criterion_group!(benches, bench_copy, bench_views, bench_parallel);
criterion_main!(benches);
