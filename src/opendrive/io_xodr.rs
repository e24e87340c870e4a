//! OpenDRIVE (`.xodr`) writer.
//!
//! Output is indented with two spaces and starts with a UTF-8 XML
//! declaration. Every road gets the same lane layout: a center lane and one
//! right driving lane with a constant width polynomial.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::info;

use super::model::{Header, OpenDrive, Road, ROAD_MARK_WIDTH};
use crate::error::ConvertError;

/// Write an OpenDRIVE document to `path`.
pub fn write_xodr(path: &Path, document: &OpenDrive) -> Result<(), ConvertError> {
    let xml = to_xodr_string(document);
    fs::write(path, xml).map_err(|source| ConvertError::XodrWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let path_label = path.display().to_string();
    info!(path = path_label.as_str(), roads = document.roads.len(); "Wrote OpenDRIVE");
    Ok(())
}

/// Serialize an OpenDRIVE document to a string.
pub fn to_xodr_string(document: &OpenDrive) -> String {
    let mut xml = String::new();

    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").expect("write to string");
    writeln!(xml, "<OpenDRIVE>").expect("write to string");
    write_header(&mut xml, &document.header);
    for road in &document.roads {
        write_road(&mut xml, road);
    }
    writeln!(xml, "</OpenDRIVE>").expect("write to string");

    xml
}

fn write_header(xml: &mut String, header: &Header) {
    let (north, south, east, west) = match &header.bounds {
        Some(bounds) => (
            format_decimal(bounds.north),
            format_decimal(bounds.south),
            format_decimal(bounds.east),
            format_decimal(bounds.west),
        ),
        None => ("0".into(), "0".into(), "0".into(), "0".into()),
    };

    writeln!(
        xml,
        "  <header revMajor=\"{}\" revMinor=\"{}\" name=\"{}\" version=\"{}\" date=\"{}\" north=\"{}\" south=\"{}\" east=\"{}\" west=\"{}\" />",
        header.rev_major,
        header.rev_minor,
        xml_escape(&header.name),
        xml_escape(&header.version),
        xml_escape(&header.date),
        north,
        south,
        east,
        west
    )
    .expect("write to string");
}

fn write_road(xml: &mut String, road: &Road) {
    writeln!(
        xml,
        "  <road name=\"{}\" id=\"{}\" junction=\"-1\" length=\"{}\">",
        xml_escape(&road.name()),
        road.id,
        format_decimal(road.length)
    )
    .expect("write to string");

    writeln!(xml, "    <planView>").expect("write to string");
    for record in &road.geometries {
        writeln!(
            xml,
            "      <geometry s=\"{}\" x=\"{}\" y=\"{}\" hdg=\"{}\" length=\"{}\">",
            format_decimal(record.s),
            format_decimal(record.start.x),
            format_decimal(record.start.y),
            format_decimal(record.hdg),
            format_decimal(record.length)
        )
        .expect("write to string");
        writeln!(xml, "        <line />").expect("write to string");
        writeln!(xml, "      </geometry>").expect("write to string");
    }
    writeln!(xml, "    </planView>").expect("write to string");

    writeln!(xml, "    <elevationProfile>").expect("write to string");
    writeln!(
        xml,
        "      <elevation s=\"0\" a=\"0\" b=\"0\" c=\"0\" d=\"0\" />"
    )
    .expect("write to string");
    writeln!(xml, "    </elevationProfile>").expect("write to string");

    writeln!(xml, "    <lanes>").expect("write to string");
    writeln!(xml, "      <laneSection s=\"0\">").expect("write to string");
    writeln!(xml, "        <center>").expect("write to string");
    writeln!(xml, "          <lane id=\"0\" type=\"none\" />").expect("write to string");
    writeln!(xml, "        </center>").expect("write to string");
    writeln!(xml, "        <right>").expect("write to string");
    writeln!(
        xml,
        "          <lane id=\"-1\" type=\"driving\" level=\"false\">"
    )
    .expect("write to string");
    writeln!(
        xml,
        "            <width sOffset=\"0\" a=\"{}\" b=\"0\" c=\"0\" d=\"0\" />",
        format_decimal(road.lane_width)
    )
    .expect("write to string");
    writeln!(
        xml,
        "            <roadMark sOffset=\"0\" type=\"solid\" weight=\"standard\" color=\"white\" width=\"{}\" />",
        ROAD_MARK_WIDTH
    )
    .expect("write to string");
    writeln!(xml, "          </lane>").expect("write to string");
    writeln!(xml, "        </right>").expect("write to string");
    writeln!(xml, "      </laneSection>").expect("write to string");
    writeln!(xml, "    </lanes>").expect("write to string");
    writeln!(xml, "  </road>").expect("write to string");
}

/// Shortest round-trip decimal, with `.0` appended to integral values.
fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
