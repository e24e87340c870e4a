//! OpenDRIVE output model and writer.
//!
//! The model covers only what the converter emits: a fixed header, and
//! roads made of straight `line` geometry with one center lane and one right
//! driving lane in a single lane section.

pub mod io_xodr;
mod model;

pub use model::{
    BoundingBox, Header, OpenDrive, Road, RoadId, HEADER_DATE, HEADER_NAME, HEADER_VERSION,
    REV_MAJOR, REV_MINOR, ROAD_MARK_WIDTH,
};
