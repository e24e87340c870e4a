//! Piecewise-linear road geometry derived from boundary polylines.
//!
//! Everything here is a pure function over point slices. The road builder
//! in [`crate::conversion`] composes them: boundaries become a centerline,
//! the centerline becomes OpenDRIVE `line` geometry records, and the
//! boundary separation becomes a constant lane width.

mod point;

pub use point::Point;

use serde::Serialize;

/// Segments at or below this length produce no geometry record.
pub const MIN_SEGMENT_LENGTH: f64 = 0.01;

/// Lane width used when there are no aligned boundary samples.
pub const DEFAULT_LANE_WIDTH: f64 = 3.5;

/// One straight `line` segment of a road's plan view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeometryRecord {
    /// Arc-length offset of the segment start along the road.
    pub s: f64,
    /// Segment start.
    pub start: Point,
    /// Heading in radians, counter-clockwise from the +x axis.
    pub hdg: f64,
    pub length: f64,
}

impl GeometryRecord {
    /// Point reached at the end of the segment.
    pub fn end(&self) -> Point {
        Point::new(
            self.start.x + self.length * self.hdg.cos(),
            self.start.y + self.length * self.hdg.sin(),
        )
    }
}

/// Turn consecutive points into line records.
///
/// Returns the records and the accumulated length. A step no longer than
/// [`MIN_SEGMENT_LENGTH`] produces no record and does not advance the
/// offset; the next record starts from the last emitted anchor, so dropped
/// micro-steps leave no gap in the plan view.
///
/// Steps are measured from the anchor, not from the previous point. A run
/// of consecutive micro-steps therefore still yields records once the
/// distance from the anchor exceeds the threshold: ten points spaced 0.006
/// apart give four records of 0.012, where a plain pairwise walk would give
/// none and lose the whole run.
pub fn derive_geometry(points: &[Point]) -> (Vec<GeometryRecord>, f64) {
    let mut records = Vec::with_capacity(points.len().saturating_sub(1));
    let mut s_offset = 0.0;

    let Some((&first, rest)) = points.split_first() else {
        return (records, s_offset);
    };

    let mut anchor = first;
    for &next in rest {
        let dx = next.x - anchor.x;
        let dy = next.y - anchor.y;
        let length = (dx * dx + dy * dy).sqrt();

        if length > MIN_SEGMENT_LENGTH {
            records.push(GeometryRecord {
                s: s_offset,
                start: anchor,
                hdg: dy.atan2(dx),
                length,
            });
            s_offset += length;
            anchor = next;
        }
    }

    (records, s_offset)
}

/// Midpoints of index-aligned boundary samples, truncated to the shorter side.
///
/// No matching is done between the two sides: `left[i]` is paired with
/// `right[i]` regardless of direction or sampling density.
pub fn centerline(left: &[Point], right: &[Point]) -> Vec<Point> {
    left.iter()
        .zip(right)
        .map(|(l, r)| l.midpoint(r))
        .collect()
}

/// Mean distance between index-aligned boundary samples.
///
/// Falls back to [`DEFAULT_LANE_WIDTH`] when either side is empty.
pub fn mean_width(left: &[Point], right: &[Point]) -> f64 {
    let samples = left.len().min(right.len());
    if samples == 0 {
        return DEFAULT_LANE_WIDTH;
    }

    let total: f64 = left.iter().zip(right).map(|(l, r)| l.distance(r)).sum();
    total / samples as f64
}

/// Resample a polyline to `count` points evenly spaced by arc length.
///
/// The first and last input points are preserved. Inputs with fewer than two
/// points, a requested count below two, or zero total length are returned
/// unchanged.
pub fn resample_by_arc_length(points: &[Point], count: usize) -> Vec<Point> {
    if points.len() < 2 || count < 2 {
        return points.to_vec();
    }

    let mut cumulative = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    cumulative.push(acc);
    for pair in points.windows(2) {
        acc += pair[0].distance(&pair[1]);
        cumulative.push(acc);
    }

    let total = acc;
    if total <= 0.0 {
        return points.to_vec();
    }

    let mut resampled = Vec::with_capacity(count);
    let mut segment = 0;
    for k in 0..count {
        let target = total * k as f64 / (count - 1) as f64;
        while segment + 2 < points.len() && cumulative[segment + 1] < target {
            segment += 1;
        }

        let span = cumulative[segment + 1] - cumulative[segment];
        let t = if span > 0.0 {
            ((target - cumulative[segment]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        resampled.push(points[segment].lerp(&points[segment + 1], t));
    }

    resampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn derive_empty_and_single_point() {
        assert_eq!(derive_geometry(&[]), (vec![], 0.0));
        assert_eq!(derive_geometry(&pts(&[(4.0, 2.0)])), (vec![], 0.0));
    }

    #[test]
    fn derive_single_segment() {
        let (records, total) = derive_geometry(&pts(&[(0.0, 0.0), (3.0, 4.0)]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].s, 0.0);
        assert_eq!(records[0].start, Point::new(0.0, 0.0));
        assert_eq!(records[0].length, 5.0);
        assert_eq!(records[0].hdg, 4.0_f64.atan2(3.0));
        assert_eq!(total, 5.0);
    }

    #[test]
    fn derive_skips_micro_segment_without_advancing_offset() {
        let (records, total) = derive_geometry(&pts(&[(0.0, 0.0), (0.0, 0.005), (0.0, 10.0)]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].s, 0.0);
        assert_eq!(records[0].start, Point::new(0.0, 0.0));
        assert_eq!(records[0].hdg, std::f64::consts::FRAC_PI_2);
        assert_eq!(records[0].length, 10.0);
        assert_eq!(total, 10.0);
    }

    #[test]
    fn derive_accumulates_offsets() {
        let (records, total) =
            derive_geometry(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (10.0, 5.0)]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].s, 10.0);
        assert_eq!(records[1].hdg, std::f64::consts::FRAC_PI_2);
        assert_eq!(total, 15.0);
    }

    #[test]
    fn derive_merges_runs_of_micro_steps() {
        let (records, total) =
            derive_geometry(&pts(&[(0.0, 0.0), (0.006, 0.0), (0.012, 0.0), (5.0, 0.0)]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start, Point::new(0.0, 0.0));
        assert!((records[0].length - 0.012).abs() < 1e-12);
        assert_eq!(records[1].start, Point::new(0.012, 0.0));
        assert!((records[0].length + records[1].length - total).abs() < 1e-12);
        assert!((total - 5.0).abs() < 1e-12);
    }

    #[test]
    fn derive_measures_micro_steps_from_anchor() {
        let points: Vec<Point> = (0..10).map(|i| Point::new(i as f64 * 0.006, 0.0)).collect();
        let (records, total) = derive_geometry(&points);
        assert_eq!(records.len(), 4);
        for (record, window) in records.iter().zip(records.iter().skip(1)) {
            let end = record.end();
            assert!((end.x - window.start.x).abs() < 1e-12);
        }
        assert!(records.iter().all(|r| r.length > MIN_SEGMENT_LENGTH));
        assert!((total - 0.048).abs() < 1e-12);
    }

    #[test]
    fn record_end_follows_heading() {
        let (records, _) = derive_geometry(&pts(&[(1.0, 1.0), (4.0, 5.0)]));
        let end = records[0].end();
        assert!((end.x - 4.0).abs() < 1e-12);
        assert!((end.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn centerline_truncates_to_shorter_side() {
        let left = pts(&[(0.0, 2.0), (5.0, 2.0), (10.0, 2.0)]);
        let right = pts(&[(0.0, 0.0), (5.0, 0.0)]);
        assert_eq!(
            centerline(&left, &right),
            pts(&[(0.0, 1.0), (5.0, 1.0)])
        );
    }

    #[test]
    fn mean_width_of_constant_separation() {
        let left = pts(&[(0.0, 0.0), (4.0, 0.0), (9.0, 0.0)]);
        let right = pts(&[(0.0, 3.5), (4.0, 3.5), (9.0, 3.5)]);
        assert_eq!(mean_width(&left, &right), 3.5);
    }

    #[test]
    fn mean_width_defaults_when_empty() {
        assert_eq!(mean_width(&[], &pts(&[(0.0, 0.0)])), DEFAULT_LANE_WIDTH);
    }

    #[test]
    fn resample_preserves_endpoints_and_spacing() {
        let line = pts(&[(0.0, 0.0), (2.0, 0.0), (10.0, 0.0)]);
        let resampled = resample_by_arc_length(&line, 6);
        assert_eq!(resampled.len(), 6);
        assert_eq!(resampled[0], Point::new(0.0, 0.0));
        assert_eq!(resampled[5], Point::new(10.0, 0.0));
        for (k, point) in resampled.iter().enumerate() {
            assert!((point.x - 2.0 * k as f64).abs() < 1e-9);
            assert_eq!(point.y, 0.0);
        }
    }

    #[test]
    fn resample_leaves_degenerate_input_alone() {
        let single = pts(&[(1.0, 1.0)]);
        assert_eq!(resample_by_arc_length(&single, 5), single);

        let collapsed = pts(&[(1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(resample_by_arc_length(&collapsed, 5), collapsed);
    }
}
