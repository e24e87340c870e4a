//! Road building: Lanelet2 lanelets to OpenDRIVE roads.
//!
//! Each lanelet relation is handled independently and in document order.
//! A lanelet becomes a road when both boundary ways exist and resolve to at
//! least two points each; anything else is counted in the
//! [`ConversionReport`] and does not consume a road id.

pub mod report;

pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
    SkipReason,
};

use std::path::Path;

use log::{debug, info};

use crate::error::ConvertError;
use crate::geometry::{centerline, derive_geometry, mean_width, resample_by_arc_length};
use crate::lanelet::io_osm_xml::{from_lanelet_osm_str, read_lanelet_osm};
use crate::lanelet::{LaneletMap, LaneletRelation};
use crate::opendrive::io_xodr::{to_xodr_string, write_xodr};
use crate::opendrive::{BoundingBox, OpenDrive, Road, RoadId};

const LEFT_ROLE: &str = "left";
const RIGHT_ROLE: &str = "right";

/// Options for road building.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Resample both boundaries by arc length to a common point count before
    /// pairing them.
    pub resample: bool,
    /// Compute header extents from the emitted geometry instead of zeros.
    pub compute_bounds: bool,
}

/// Build an OpenDRIVE document from a parsed map.
pub fn build_opendrive(map: &LaneletMap, opts: &ConvertOptions) -> (OpenDrive, ConversionReport) {
    let mut report = ConversionReport {
        counts: ConversionCounts {
            nodes: map.nodes.len(),
            ways: map.ways.len(),
            lanelets: map.lanelets.len(),
            roads: 0,
        },
        read: map.stats.clone(),
        ..Default::default()
    };

    let mut document = OpenDrive::default();
    let mut next_id = RoadId::new(0);

    for relation in &map.lanelets {
        match build_road(map, relation, next_id, opts) {
            Ok(road) => {
                document.roads.push(road);
                next_id = next_id.next();
            }
            Err(reason) => {
                debug!(
                    relation = relation.label(),
                    reason = reason.description();
                    "Skipping lanelet"
                );
                report.skip(reason);
            }
        }
    }

    report.counts.roads = document.roads.len();

    if opts.compute_bounds {
        document.header.bounds = BoundingBox::of_roads(&document.roads);
    }

    add_policy_notes(map, opts, &mut report);

    (document, report)
}

/// Build one road from a lanelet, or report why it cannot be built.
///
/// `id` is only meaningful on success; the caller decides whether it is
/// consumed.
pub fn build_road(
    map: &LaneletMap,
    relation: &LaneletRelation,
    id: RoadId,
    opts: &ConvertOptions,
) -> Result<Road, SkipReason> {
    let left_id = relation
        .boundary_way(LEFT_ROLE)
        .ok_or(SkipReason::MissingLeftMember)?;
    let right_id = relation
        .boundary_way(RIGHT_ROLE)
        .ok_or(SkipReason::MissingRightMember)?;

    let left_way = map.way(left_id).ok_or(SkipReason::UnknownLeftWay)?;
    let right_way = map.way(right_id).ok_or(SkipReason::UnknownRightWay)?;

    let mut left = map.resolve_way(left_way);
    let mut right = map.resolve_way(right_way);
    if left.len() < 2 {
        return Err(SkipReason::LeftBoundaryTooShort);
    }
    if right.len() < 2 {
        return Err(SkipReason::RightBoundaryTooShort);
    }

    if opts.resample {
        let count = left.len().max(right.len());
        left = resample_by_arc_length(&left, count);
        right = resample_by_arc_length(&right, count);
    }

    let center = centerline(&left, &right);
    if center.len() < 2 {
        return Err(SkipReason::CenterlineTooShort);
    }

    let (geometries, length) = derive_geometry(&center);
    if geometries.is_empty() {
        return Err(SkipReason::DegenerateCenterline);
    }

    Ok(Road {
        id,
        length,
        geometries,
        lane_width: mean_width(&left, &right),
    })
}

/// Convert Lanelet2 XML text to OpenDRIVE XML text.
pub fn convert_str(
    xml: &str,
    opts: &ConvertOptions,
) -> Result<(String, ConversionReport), ConvertError> {
    let map = from_lanelet_osm_str(xml)?;
    let (document, report) = build_opendrive(&map, opts);
    Ok((to_xodr_string(&document), report))
}

/// Fuzz-only entrypoint: parse raw bytes and run the full conversion with
/// every option enabled.
#[cfg(feature = "fuzzing")]
pub fn fuzz_convert_slice(bytes: &[u8]) -> Result<(), ConvertError> {
    let map = crate::lanelet::io_osm_xml::from_lanelet_osm_slice(bytes)?;
    let opts = ConvertOptions {
        resample: true,
        compute_bounds: true,
    };
    let (document, _) = build_opendrive(&map, &opts);
    let _ = to_xodr_string(&document);
    Ok(())
}

/// Read `input`, build roads, and write the result to `output`.
///
/// Nothing is written when the input cannot be parsed.
pub fn convert_file(
    input: &Path,
    output: &Path,
    opts: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    let map = read_lanelet_osm(input)?;
    let (document, mut report) = build_opendrive(&map, opts);
    write_xodr(output, &document)?;

    report.input = input.display().to_string();
    report.output = output.display().to_string();

    info!(
        roads = report.roads(),
        skipped = report.skipped_count();
        "Conversion finished"
    );
    Ok(report)
}

fn add_policy_notes(map: &LaneletMap, opts: &ConvertOptions, report: &mut ConversionReport) {
    if map.stats.duplicate_tag_keys > 0 {
        report.add(ConversionIssue::warning(
            ConversionIssueCode::DuplicateTagKeys,
            format!(
                "{} duplicate tag key(s) overwritten by a later value",
                map.stats.duplicate_tag_keys
            ),
        ));
    }

    if map.stats.nodes_without_coords > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::NodesWithoutCoordinates,
            format!(
                "{} node(s) without local_x/local_y were dropped",
                map.stats.nodes_without_coords
            ),
        ));
    }

    if map.stats.non_lanelet_relations > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::NonLaneletRelationsIgnored,
            format!(
                "{} non-lanelet relation(s) were ignored",
                map.stats.non_lanelet_relations
            ),
        ));
    }

    if report.roads() == 0 {
        return;
    }

    if opts.resample {
        report.add(ConversionIssue::info(
            ConversionIssueCode::ResampledBoundaries,
            "boundaries were resampled by arc length before computing centerlines",
        ));
    } else {
        report.add(ConversionIssue::info(
            ConversionIssueCode::IndexAlignedBoundaries,
            "centerlines pair boundary points by index; boundaries must share direction and density",
        ));
    }

    if !opts.compute_bounds {
        report.add(ConversionIssue::info(
            ConversionIssueCode::PlaceholderBoundingBox,
            "header bounding box written as zero",
        ));
    }

    report.add(ConversionIssue::info(
        ConversionIssueCode::SingleRightLane,
        "each road carries one right driving lane with constant width",
    ));
}
