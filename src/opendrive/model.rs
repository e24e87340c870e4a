//! OpenDRIVE document types produced by the road builder.

use std::fmt;

use serde::Serialize;

use crate::geometry::GeometryRecord;

pub const REV_MAJOR: u32 = 1;
pub const REV_MINOR: u32 = 4;
pub const HEADER_NAME: &str = "Lanelet2 Converted Map";
pub const HEADER_VERSION: &str = "1.0";
pub const HEADER_DATE: &str = "2024-01-01T00:00:00";

/// Width of the solid road mark on the driving lane.
pub const ROAD_MARK_WIDTH: f64 = 0.12;

/// Identifier of an emitted road. Assigned from 0 in emission order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RoadId(pub u64);

impl RoadId {
    /// Creates a new RoadId.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    #[inline]
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoadId({})", self.0)
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Header extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Extents of every geometry record's start and end point.
    ///
    /// Returns `None` when no road has geometry.
    pub fn of_roads(roads: &[Road]) -> Option<Self> {
        let mut points = roads
            .iter()
            .flat_map(|road| road.geometries.iter())
            .flat_map(|record| [record.start, record.end()]);

        let first = points.next()?;
        let init = BoundingBox {
            north: first.y,
            south: first.y,
            east: first.x,
            west: first.x,
        };

        Some(points.fold(init, |bounds, point| BoundingBox {
            north: bounds.north.max(point.y),
            south: bounds.south.min(point.y),
            east: bounds.east.max(point.x),
            west: bounds.west.min(point.x),
        }))
    }
}

/// The `header` element.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Header {
    pub rev_major: u32,
    pub rev_minor: u32,
    pub name: String,
    pub version: String,
    pub date: String,
    /// `None` writes the all-zero placeholder extents.
    pub bounds: Option<BoundingBox>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            rev_major: REV_MAJOR,
            rev_minor: REV_MINOR,
            name: HEADER_NAME.to_string(),
            version: HEADER_VERSION.to_string(),
            date: HEADER_DATE.to_string(),
            bounds: None,
        }
    }
}

/// One road: a centerline plan view with a single right driving lane.
///
/// The center lane (id 0) and the lane layout are fixed; only the width of
/// the right lane (id -1) varies per road.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Road {
    pub id: RoadId,
    /// Sum of the geometry record lengths.
    pub length: f64,
    pub geometries: Vec<GeometryRecord>,
    /// Constant width of the right driving lane.
    pub lane_width: f64,
}

impl Road {
    pub fn name(&self) -> String {
        format!("Road_{}", self.id)
    }
}

/// A complete OpenDRIVE document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OpenDrive {
    pub header: Header,
    pub roads: Vec<Road>,
}
