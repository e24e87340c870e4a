//! Lanelet2 map model and reader.
//!
//! A Lanelet2 map is OSM XML where nodes carry local planar coordinates in
//! `local_x`/`local_y` tags and each lane is a relation tagged
//! `type=lanelet` whose `left` and `right` way members are its boundaries.
//!
//! # Example
//!
//! ```
//! use lanelet2xodr::lanelet::io_osm_xml::from_lanelet_osm_str;
//!
//! let map = from_lanelet_osm_str(r#"<osm>
//!   <node id="1"><tag k="local_x" v="0"/><tag k="local_y" v="0"/></node>
//!   <relation id="9"><tag k="type" v="lanelet"/></relation>
//! </osm>"#).unwrap();
//!
//! assert_eq!(map.nodes.len(), 1);
//! assert_eq!(map.lanelets.len(), 1);
//! ```

pub mod io_osm_xml;
mod model;

pub use model::{LaneletMap, LaneletRelation, Member, ReadStats, Tags, Way};
