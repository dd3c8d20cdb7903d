//! Benchmarks for colorization and PNG encoding.
//!
//! Run with: cargo bench --package raster-colorizer --bench colorize_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use raster_colorizer::{colorize, png, Color, ColorizeOptions, PaletteTable, SampleArray};

/// Generate a temperature-like grid (Kelvin) with a sprinkling of nodata.
fn generate_temperature_grid(width: usize, height: usize) -> SampleArray<f32> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0.0f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let lat_factor = (y as f32 / height as f32 - 0.5) * 60.0;
            let lon_factor = ((x as f32 / width as f32) * std::f32::consts::PI * 4.0).sin() * 5.0;
            let noise = rng.gen_range(-3.0..3.0);

            data[y * width + x] = if rng.gen_ratio(1, 50) {
                -9999.0
            } else {
                273.15 + lat_factor + lon_factor + noise
            };
        }
    }
    SampleArray::new(data, width, height).expect("grid dimensions match")
}

fn bench_palette() -> PaletteTable {
    let spectrum = (0..=255u8).map(|i| Color::new(i, 128, 255 - i, 255)).collect();
    PaletteTable::with_nodata(spectrum, Color::transparent()).expect("257 entries")
}

fn bench_colorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorize");
    let palette = bench_palette();

    for size in [256usize, 512, 1024] {
        let samples = generate_temperature_grid(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        let auto = ColorizeOptions::default().with_nodata(-9999.0);
        group.bench_with_input(BenchmarkId::new("auto_range", size), &samples, |b, samples| {
            b.iter(|| colorize(black_box(samples), &palette, &auto))
        });

        let fixed = auto.with_range(233.15, 313.15);
        group.bench_with_input(BenchmarkId::new("fixed_range", size), &samples, |b, samples| {
            b.iter(|| colorize(black_box(samples), &palette, &fixed))
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encode");
    let palette = bench_palette();

    for size in [256usize, 512] {
        let samples = generate_temperature_grid(size, size);
        let options = ColorizeOptions::default()
            .with_range(233.15, 313.15)
            .with_nodata(-9999.0);
        let image = colorize(&samples, &palette, &options).expect("colorize");

        group.throughput(Throughput::Bytes(image.as_bytes().len() as u64));
        group.bench_with_input(BenchmarkId::new("tile", size), &image, |b, image| {
            b.iter(|| png::encode_png(black_box(image)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_colorize, bench_encode);
criterion_main!(benches);
