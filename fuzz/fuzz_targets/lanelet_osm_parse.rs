//! Fuzz target for Lanelet2 OSM XML parsing.
//!
//! Feeds arbitrary byte sequences to the OSM reader, checking for panics,
//! crashes, or hangs.

#![no_main]

use lanelet2xodr::lanelet::io_osm_xml::from_lanelet_osm_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_lanelet_osm_slice(data);
});
