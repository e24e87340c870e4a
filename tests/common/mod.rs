#![allow(dead_code)]

use std::fmt::Write as _;

/// A Lanelet2 document with one lanelet built from the given boundaries.
///
/// Left nodes get ids from 1, right nodes from 10001; the ways are `100`
/// (left) and `101` (right) and the lanelet is `200`.
pub fn lanelet_osm(left: &[(f64, f64)], right: &[(f64, f64)]) -> String {
    lanelets_osm(&[(left.to_vec(), right.to_vec())])
}

/// A Lanelet2 document with one lanelet per boundary pair, in order.
pub fn lanelets_osm(pairs: &[(Vec<(f64, f64)>, Vec<(f64, f64)>)]) -> String {
    let mut xml = String::new();
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>").unwrap();
    writeln!(xml, "<osm version=\"0.6\" generator=\"lanelet2\">").unwrap();

    let mut relations = String::new();
    for (idx, (left, right)) in pairs.iter().enumerate() {
        let base = idx * 100_000;
        let left_way = write_way(&mut xml, base + 100, base + 1, left);
        let right_way = write_way(&mut xml, base + 101, base + 10_001, right);
        writeln!(relations, "  <relation id=\"{}\">", base + 200).unwrap();
        writeln!(
            relations,
            "    <member type=\"way\" ref=\"{left_way}\" role=\"left\"/>"
        )
        .unwrap();
        writeln!(
            relations,
            "    <member type=\"way\" ref=\"{right_way}\" role=\"right\"/>"
        )
        .unwrap();
        writeln!(relations, "    <tag k=\"type\" v=\"lanelet\"/>").unwrap();
        writeln!(relations, "  </relation>").unwrap();
    }

    xml.push_str(&relations);
    writeln!(xml, "</osm>").unwrap();
    xml
}

fn write_way(xml: &mut String, way_id: usize, first_node: usize, points: &[(f64, f64)]) -> usize {
    for (offset, (x, y)) in points.iter().enumerate() {
        writeln!(xml, "  <node id=\"{}\">", first_node + offset).unwrap();
        writeln!(xml, "    <tag k=\"local_x\" v=\"{x:?}\"/>").unwrap();
        writeln!(xml, "    <tag k=\"local_y\" v=\"{y:?}\"/>").unwrap();
        writeln!(xml, "  </node>").unwrap();
    }

    writeln!(xml, "  <way id=\"{way_id}\">").unwrap();
    for offset in 0..points.len() {
        writeln!(xml, "    <nd ref=\"{}\"/>", first_node + offset).unwrap();
    }
    writeln!(xml, "  </way>").unwrap();
    way_id
}
