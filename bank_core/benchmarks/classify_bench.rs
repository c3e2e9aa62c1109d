use bank_core::{
    detect_bedrock_banks, find_bank_index, BankDetectionConfig, ClassifierParams, Point2, Polyline,
    SampleRecord,
};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const POINT_SPACING: f64 = 15.0;

/// Valley cross-sections along a straight river on y = 0.
fn valley_records(transects: usize, half_width: usize, seed: u64) -> Vec<SampleRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(transects * (2 * half_width + 1));
    for t in 0..transects {
        let x = t as f64 * 75.0;
        let bank_step = rng.gen_range(2..half_width.max(3));
        for i in 0..=(2 * half_width) {
            let steps_out = (i as i64 - half_width as i64).unsigned_abs() as usize;
            let base = if steps_out >= bank_step { 108.0 } else { 100.0 };
            records.push(SampleRecord {
                position: Point2::new(x, (i as f64 - half_width as f64) * POINT_SPACING),
                elevation: Some(base + rng.gen_range(-0.4f64..0.4)),
                distance: i as f64 * POINT_SPACING,
                transect_id: Some(t as i64),
                ..Default::default()
            });
        }
    }
    records
}

fn bench_side_scan(c: &mut Criterion) {
    let params = ClassifierParams::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let flat: Vec<f64> = (0..256).map(|_| 100.0 + rng.gen_range(-0.5f64..0.5)).collect();

    c.bench_function("side_scan_flat_256", |b| {
        b.iter(|| find_bank_index(&flat, 100.0, &params));
    });
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("bank_detection");
    let config = BankDetectionConfig::default();
    let river = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(75_000.0, 0.0)]);

    for transects in [100usize, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("valley", transects),
            &transects,
            |b, &transects| {
                b.iter_batched(
                    || valley_records(transects, 13, 42),
                    |records| detect_bedrock_banks(&records, Some(&river), &config),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(classify_benches, bench_side_scan, bench_detection);
criterion_main!(classify_benches);
