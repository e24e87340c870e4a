#![allow(dead_code)]

use lanelet2xodr::geometry::Point;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_LENGTH: f64 = 1e-6;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Coordinates in a bounded local frame, rounded to millimetres.
pub fn arb_coord() -> impl Strategy<Value = f64> {
    (-100_000i64..=100_000).prop_map(|mm| mm as f64 / 1000.0)
}

pub fn arb_point() -> impl Strategy<Value = Point> {
    (arb_coord(), arb_coord()).prop_map(|(x, y)| Point::new(x, y))
}

pub fn arb_polyline(max_len: usize) -> impl Strategy<Value = Vec<Point>> {
    proptest::collection::vec(arb_point(), 0..=max_len)
}

/// Shared x samples (steps of at least 2 cm), a base y, and a separation.
pub fn arb_parallel_pair(max_len: usize) -> impl Strategy<Value = (Vec<f64>, f64, f64)> {
    (
        proptest::collection::vec(2u32..=5_000, 1..max_len),
        arb_coord(),
        1u32..=10_000,
    )
        .prop_map(|(steps, y0, sep_mm)| {
            let mut xs = vec![0.0];
            for step in steps {
                let last = *xs.last().unwrap();
                xs.push(last + step as f64 / 100.0);
            }
            (xs, y0, sep_mm as f64 / 1000.0)
        })
}
