//! Inspect report types and terminal formatting.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::conversion::SkipReason;

/// The result of inspecting a Lanelet2 map.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    pub summary: SummarySection,
    pub subtypes: SubtypesSection,
    pub boundaries: BoundaryStats,
}

/// Element counts for the map.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    /// `node` elements in the document.
    pub nodes: usize,
    /// Nodes with usable `local_x`/`local_y`.
    pub nodes_with_coords: usize,
    pub ways: usize,
    /// `relation` elements in the document.
    pub relations: usize,
    /// Relations tagged `type=lanelet`.
    pub lanelets: usize,
    /// Tag entries overwritten by a later duplicate key.
    pub duplicate_tag_keys: usize,
}

/// Lanelet `subtype` tag distribution.
#[derive(Clone, Debug, Serialize)]
pub struct SubtypesSection {
    pub top_n: usize,
    /// Entries sorted by count descending, then name ascending.
    pub entries: Vec<SubtypeCount>,
    /// Lanelets whose subtype is not among the top entries.
    pub other_count: usize,
}

/// One subtype value with its lanelet count.
#[derive(Clone, Debug, Serialize)]
pub struct SubtypeCount {
    pub subtype: String,
    pub count: usize,
}

/// How lanelet boundaries would fare in conversion.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BoundaryStats {
    /// Lanelets that would become roads.
    pub convertible: usize,
    /// Convertible lanelets whose boundaries resolve to different point
    /// counts, so index pairing truncates the longer side.
    pub mismatched_point_counts: usize,
    /// Lanelets that would be skipped, by reason.
    pub skipped: BTreeMap<SkipReason, usize>,
    /// Fewest resolved points on any boundary way.
    pub min_boundary_points: Option<usize>,
    /// Most resolved points on any boundary way.
    pub max_boundary_points: Option<usize>,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_summary(f)?;
        writeln!(f)?;
        self.fmt_subtypes(f)?;
        writeln!(f)?;
        self.fmt_boundaries(f)?;
        Ok(())
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "┌─ Summary")?;
        writeln!(
            f,
            "│   Nodes:         {:>8}  ({} with local coordinates)",
            s.nodes, s.nodes_with_coords
        )?;
        writeln!(f, "│   Ways:          {:>8}", s.ways)?;
        writeln!(f, "│   Relations:     {:>8}", s.relations)?;
        writeln!(f, "│   Lanelets:      {:>8}", s.lanelets)?;
        if s.duplicate_tag_keys > 0 {
            writeln!(f, "│   Duplicate tag keys: {}", s.duplicate_tag_keys)?;
        }
        writeln!(f, "└─")?;
        Ok(())
    }

    fn fmt_subtypes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.subtypes;

        writeln!(f, "┌─ Lanelet subtypes (top {})", s.top_n)?;
        if s.entries.is_empty() {
            writeln!(f, "│   (no lanelets)")?;
        }
        for entry in &s.entries {
            writeln!(f, "│   {:<24} {:>8}", entry.subtype, entry.count)?;
        }
        if s.other_count > 0 {
            writeln!(f, "│   {:<24} {:>8}", "(other)", s.other_count)?;
        }
        writeln!(f, "└─")?;
        Ok(())
    }

    fn fmt_boundaries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.boundaries;

        writeln!(f, "┌─ Boundaries")?;
        writeln!(f, "│   Convertible lanelets:   {:>8}", b.convertible)?;
        if b.mismatched_point_counts > 0 {
            writeln!(
                f,
                "│   Uneven point counts:    {:>8}",
                b.mismatched_point_counts
            )?;
        }
        if let (Some(min), Some(max)) = (b.min_boundary_points, b.max_boundary_points) {
            writeln!(f, "│   Points per boundary:    {} .. {}", min, max)?;
        }
        for (reason, count) in &b.skipped {
            writeln!(f, "│   Skipped, {}: {}", reason.description(), count)?;
        }
        writeln!(f, "└─")?;
        Ok(())
    }
}
