use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use image::{DynamicImage, RgbaImage};
use sprite_grid_core::prelude::*;

fn generate_sizes(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("tex_{}.png", i), w, h)
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_only");
    let cfg = SheetConfig::builder().padding(2).max_dimension(16384).build();
    for count in [50, 200, 1000] {
        let sizes = generate_sizes(count, 8, 64);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sizes, |b, sizes| {
            b.iter(|| black_box(pack_layout(sizes.clone(), &cfg).expect("layout")));
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let cfg = SheetConfig::builder().padding(2).build();
    for count in [16, 64, 256] {
        let sizes = generate_sizes(count, 8, 32);
        let records: Vec<ImageRecord> = sizes
            .iter()
            .map(|(k, w, h)| ImageRecord::new(k.clone(), DynamicImage::ImageRgba8(RgbaImage::new(*w, *h))))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| black_box(pack_sheet(records.clone(), &cfg).expect("pack").canvas));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_compose);
criterion_main!(benches);
