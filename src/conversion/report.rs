//! Conversion report types for tracking skipped lanelets and policy notes.
//!
//! Every lanelet relation either becomes a road or is counted under exactly
//! one [`SkipReason`], so `roads + skipped == lanelets` always holds.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::lanelet::ReadStats;

/// A report generated during conversion.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Input path, or empty for in-memory conversions.
    pub input: String,
    /// Output path, or empty for in-memory conversions.
    pub output: String,
    pub counts: ConversionCounts,
    /// Counters from the map reader.
    pub read: ReadStats,
    /// Lanelets that produced no road, by reason.
    pub skipped: BTreeMap<SkipReason, usize>,
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    /// Add an issue to the report.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Count one skipped lanelet.
    pub fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Number of roads written.
    pub fn roads(&self) -> usize {
        self.counts.roads
    }

    /// Total lanelets that produced no road.
    pub fn skipped_count(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    /// Count of info-level issues.
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} lanelet(s) into {} road(s)",
            self.counts.lanelets, self.counts.roads
        )?;
        if !self.input.is_empty() {
            writeln!(f, "  input: {}", self.input)?;
        }
        if !self.output.is_empty() {
            writeln!(f, "  output: {}", self.output)?;
        }
        writeln!(
            f,
            "  {} nodes, {} ways, {} lanelets",
            self.counts.nodes, self.counts.ways, self.counts.lanelets
        )?;

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped ({}):", self.skipped_count())?;
            for (reason, count) in &self.skipped {
                writeln!(f, "  - {}: {}", reason.description(), count)?;
            }
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of map elements and emitted roads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    /// Nodes with usable coordinates.
    pub nodes: usize,
    pub ways: usize,
    pub lanelets: usize,
    pub roads: usize,
}

/// Why a lanelet relation produced no road.
///
/// Variants are declared in the order the checks run; the first failing
/// check is the one recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No `left` way member.
    MissingLeftMember,
    /// No `right` way member.
    MissingRightMember,
    /// The `left` member references a way not in the document.
    UnknownLeftWay,
    /// The `right` member references a way not in the document.
    UnknownRightWay,
    /// The left boundary resolves to fewer than two points.
    LeftBoundaryTooShort,
    /// The right boundary resolves to fewer than two points.
    RightBoundaryTooShort,
    /// The centerline has fewer than two points.
    CenterlineTooShort,
    /// Every centerline step is too short to become a geometry record.
    DegenerateCenterline,
}

impl SkipReason {
    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::MissingLeftMember => "missing left way member",
            SkipReason::MissingRightMember => "missing right way member",
            SkipReason::UnknownLeftWay => "left way not found",
            SkipReason::UnknownRightWay => "right way not found",
            SkipReason::LeftBoundaryTooShort => "left boundary has fewer than 2 resolved points",
            SkipReason::RightBoundaryTooShort => "right boundary has fewer than 2 resolved points",
            SkipReason::CenterlineTooShort => "centerline has fewer than 2 points",
            SkipReason::DegenerateCenterline => "centerline collapses to a single point",
        }
    }
}

/// A single issue discovered during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    /// Create a warning-level issue (input data quality).
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level issue (policy note).
    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    Warning,
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON schema and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    // Input data quality (Warning level)
    /// Tags with repeated keys were overwritten by the last value.
    DuplicateTagKeys,

    // Reader policy (Info level)
    /// Nodes without usable local coordinates were dropped.
    NodesWithoutCoordinates,
    /// Relations other than `type=lanelet` were ignored.
    NonLaneletRelationsIgnored,

    // Builder policy (Info level)
    /// Boundaries were paired index by index.
    IndexAlignedBoundaries,
    /// Boundaries were resampled by arc length before pairing.
    ResampledBoundaries,
    /// Header bounds were written as zero.
    PlaceholderBoundingBox,
    /// Only a right driving lane is emitted per road.
    SingleRightLane,
}
