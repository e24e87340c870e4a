//! Lanelet2 map inspection.
//!
//! Summarizes a parsed map without writing anything: element counts, the
//! lanelet `subtype` distribution, and how each lanelet's boundaries would
//! fare in conversion.

mod report;

pub use report::{BoundaryStats, InspectReport, SubtypeCount, SubtypesSection, SummarySection};

use std::collections::HashMap;

use crate::conversion::{build_road, ConvertOptions};
use crate::lanelet::{LaneletMap, LaneletRelation};
use crate::opendrive::RoadId;

const UNTAGGED_SUBTYPE: &str = "<none>";

/// Options for map inspection.
#[derive(Clone, Debug)]
pub struct InspectOptions {
    /// Number of subtypes listed before the rest are summed as "other".
    pub top_subtypes: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { top_subtypes: 10 }
    }
}

/// Inspect a map and produce a report.
pub fn inspect_map(map: &LaneletMap, opts: &InspectOptions) -> InspectReport {
    InspectReport {
        summary: compute_summary(map),
        subtypes: compute_subtypes(map, opts.top_subtypes),
        boundaries: compute_boundary_stats(map),
    }
}

fn compute_summary(map: &LaneletMap) -> SummarySection {
    SummarySection {
        nodes: map.stats.nodes_seen,
        nodes_with_coords: map.nodes.len(),
        ways: map.ways.len(),
        relations: map.stats.relations_seen,
        lanelets: map.lanelets.len(),
        duplicate_tag_keys: map.stats.duplicate_tag_keys,
    }
}

fn compute_subtypes(map: &LaneletMap, top_n: usize) -> SubtypesSection {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for lanelet in &map.lanelets {
        let subtype = lanelet
            .tags
            .get("subtype")
            .map(String::as_str)
            .unwrap_or(UNTAGGED_SUBTYPE);
        *counts.entry(subtype).or_insert(0) += 1;
    }

    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let other_count = sorted.iter().skip(top_n).map(|(_, count)| count).sum();
    let entries = sorted
        .into_iter()
        .take(top_n)
        .map(|(subtype, count)| SubtypeCount {
            subtype: subtype.to_string(),
            count,
        })
        .collect();

    SubtypesSection {
        top_n,
        entries,
        other_count,
    }
}

fn compute_boundary_stats(map: &LaneletMap) -> BoundaryStats {
    let mut stats = BoundaryStats::default();
    let opts = ConvertOptions::default();

    for lanelet in &map.lanelets {
        for role in ["left", "right"] {
            let resolved = lanelet
                .boundary_way(role)
                .and_then(|id| map.way(id))
                .map(|way| map.resolve_way(way).len());
            if let Some(points) = resolved {
                stats.min_boundary_points =
                    Some(stats.min_boundary_points.map_or(points, |m| m.min(points)));
                stats.max_boundary_points =
                    Some(stats.max_boundary_points.map_or(points, |m| m.max(points)));
            }
        }

        match build_road(map, lanelet, RoadId::new(0), &opts) {
            Ok(_) => {
                stats.convertible += 1;
                if boundary_point_counts_differ(map, lanelet) {
                    stats.mismatched_point_counts += 1;
                }
            }
            Err(reason) => *stats.skipped.entry(reason).or_default() += 1,
        }
    }

    stats
}

fn boundary_point_counts_differ(map: &LaneletMap, lanelet: &LaneletRelation) -> bool {
    let count = |role: &str| {
        lanelet
            .boundary_way(role)
            .and_then(|id| map.way(id))
            .map(|way| map.resolve_way(way).len())
    };
    count("left") != count("right")
}
