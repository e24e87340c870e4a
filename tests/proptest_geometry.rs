use lanelet2xodr::geometry::{
    centerline, derive_geometry, mean_width, resample_by_arc_length, Point, MIN_SEGMENT_LENGTH,
};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn record_lengths_sum_to_total(points in proptest_helpers::arb_polyline(40)) {
        let (records, total) = derive_geometry(&points);
        let sum: f64 = records.iter().map(|r| r.length).sum();
        prop_assert!((sum - total).abs() < proptest_helpers::EPS_LENGTH);
    }

    #[test]
    fn offsets_are_cumulative_and_segments_long_enough(points in proptest_helpers::arb_polyline(40)) {
        let (records, _) = derive_geometry(&points);
        let mut expected_s = 0.0;
        for record in &records {
            prop_assert!(record.length > MIN_SEGMENT_LENGTH);
            prop_assert!((record.s - expected_s).abs() < proptest_helpers::EPS_LENGTH);
            prop_assert!(record.hdg.abs() <= std::f64::consts::PI);
            expected_s += record.length;
        }
        prop_assert!(records.len() <= points.len().saturating_sub(1));
    }

    #[test]
    fn records_chain_end_to_start(points in proptest_helpers::arb_polyline(40)) {
        let (records, _) = derive_geometry(&points);
        for pair in records.windows(2) {
            let end = pair[0].end();
            prop_assert!((end.x - pair[1].start.x).abs() < 1e-6);
            prop_assert!((end.y - pair[1].start.y).abs() < 1e-6);
        }
        if let Some(first) = records.first() {
            prop_assert_eq!(first.start, points[0]);
        }
    }

    #[test]
    fn constant_separation_width_is_exact((xs, y0, sep) in proptest_helpers::arb_parallel_pair(30)) {
        let left: Vec<Point> = xs.iter().map(|&x| Point::new(x, y0)).collect();
        let right: Vec<Point> = xs.iter().map(|&x| Point::new(x, y0 + sep)).collect();
        let width = mean_width(&left, &right);
        prop_assert!((width - (y0 + sep - y0)).abs() < 1e-9);

        let center = centerline(&left, &right);
        prop_assert_eq!(center.len(), xs.len());
        let (_, total) = derive_geometry(&center);
        prop_assert!((total - xs[xs.len() - 1]).abs() < 1e-6);
    }

    #[test]
    fn resample_hits_requested_count(points in proptest_helpers::arb_polyline(20), count in 2usize..50) {
        let resampled = resample_by_arc_length(&points, count);
        let total: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
        if points.len() >= 2 && total > 0.0 {
            prop_assert_eq!(resampled.len(), count);
            prop_assert_eq!(resampled[0], points[0]);
            let last = resampled[count - 1];
            let expected = points[points.len() - 1];
            prop_assert!((last.x - expected.x).abs() < 1e-6);
            prop_assert!((last.y - expected.y).abs() < 1e-6);
        } else {
            prop_assert_eq!(resampled, points);
        }
    }
}
