#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use anyhow::Context;
use bank_core::{Point2, Polyline, SampleRecord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

static INIT: Once = Once::new();

pub const POINT_SPACING: f64 = 15.0;

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[derive(Debug, Deserialize)]
pub struct TransectFixture {
    pub centerline: Vec<Polyline>,
    pub records: Vec<SampleRecord>,
}

pub fn load_transect_fixture(name: &str) -> anyhow::Result<TransectFixture> {
    let path = fixture_path(name);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    let fixture = serde_json::from_str(&contents)
        .with_context(|| format!("parsing fixture {}", path.display()))?;
    Ok(fixture)
}

/// Straight river along y = 0 from x = 0 to `length`.
pub fn straight_river(length: f64) -> Polyline {
    Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(length, 0.0)])
}

/// Noisy valley cross-sections on a straight river along y = 0.
///
/// Each transect has `2 * half_width + 1` samples; the floor sits near 100 m
/// and the valley walls jump to about 110 m a random number of steps out.
pub fn seeded_valley(seed: u64, transects: usize, half_width: usize) -> Vec<SampleRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut records = Vec::new();
    for t in 0..transects {
        let x = 37.5 + t as f64 * 75.0;
        let left_wall = rng.gen_range(2..=half_width - 2);
        let right_wall = rng.gen_range(2..=half_width - 2);
        for i in 0..=(2 * half_width) {
            let signed = i as i64 - half_width as i64;
            let wall = if signed < 0 { left_wall } else { right_wall };
            let floor = 100.0 + rng.gen_range(-0.3f64..0.3);
            let elevation = if signed.unsigned_abs() as usize >= wall {
                floor + 10.0
            } else {
                floor
            };
            let elevation = if rng.gen_bool(0.02) && signed != 0 {
                -9999.0
            } else {
                elevation
            };
            records.push(SampleRecord {
                position: Point2::new(x, signed as f64 * POINT_SPACING),
                elevation: Some(elevation),
                distance: i as f64 * POINT_SPACING,
                transect_id: Some(t as i64),
                ..Default::default()
            });
        }
    }
    records
}
