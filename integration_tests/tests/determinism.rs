mod common;

use bank_core::{detect_bedrock_banks, BankDetection, BankDetectionConfig, BankPoint};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn run(records: &[bank_core::SampleRecord]) -> BankDetection {
    let river = common::straight_river(10_000.0);
    detect_bedrock_banks(records, Some(&river), &BankDetectionConfig::default())
        .expect("default config is valid")
}

fn sorted(points: &[BankPoint]) -> Vec<BankPoint> {
    let mut points = points.to_vec();
    points.sort_by(|a, b| {
        a.transect
            .cmp(&b.transect)
            .then_with(|| a.side.cmp(&b.side))
    });
    points
}

#[test]
fn repeated_runs_match() {
    common::init_tracing();
    let records = common::seeded_valley(119_304_647, 64, 10);

    let first = run(&records);
    let second = run(&records);

    assert_eq!(first, second);
    assert!(first.metrics.banks_found() > 0);
}

#[test]
fn input_order_does_not_change_detected_banks() {
    let records = common::seeded_valley(42, 48, 9);
    let mut shuffled = records.clone();
    shuffled.shuffle(&mut ChaCha8Rng::seed_from_u64(7));

    let ordered = run(&records);
    let reordered = run(&shuffled);

    assert_eq!(ordered.metrics, reordered.metrics);
    assert_eq!(
        sorted(ordered.assembly.points()),
        sorted(reordered.assembly.points())
    );
    assert_eq!(ordered.assembly.paths(), reordered.assembly.paths());
}

#[test]
fn detected_banks_sit_on_valley_walls() {
    let records = common::seeded_valley(5, 32, 10);
    let detection = run(&records);

    assert!(detection.assembly.len() <= 2 * 32);
    for point in detection.assembly.points() {
        assert!(
            point.height_above_anchor > 9.0,
            "bank at {:?} only {} m above the channel",
            point.position,
            point.height_above_anchor
        );
        assert!(point.position.y != 0.0);
        assert!((point.distance_along - point.position.x).abs() < 1e-9);
    }
}
