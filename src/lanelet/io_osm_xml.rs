//! Lanelet2 OSM XML reader.
//!
//! Only direct children of the document root are considered. Nodes need
//! finite `local_x`/`local_y` tags to enter the node table; every way is
//! kept; only relations tagged `type=lanelet` are kept.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use roxmltree::Node;

use super::model::{LaneletMap, LaneletRelation, Member, ReadStats, Tags, Way};
use crate::error::ConvertError;
use crate::geometry::Point;

const LOCAL_X_KEY: &str = "local_x";
const LOCAL_Y_KEY: &str = "local_y";
const LANELET_TYPE: &str = "lanelet";

/// Read a Lanelet2 `.osm` file into lookup tables.
pub fn read_lanelet_osm(path: &Path) -> Result<LaneletMap, ConvertError> {
    let bytes = fs::read(path).map_err(ConvertError::Io)?;
    let xml = std::str::from_utf8(&bytes).map_err(|source| ConvertError::OsmXmlParse {
        path: path.to_path_buf(),
        message: format!("input is not valid UTF-8: {source}"),
    })?;

    let map = parse_lanelet_osm_str(xml, path)?;
    let path_label = path.display().to_string();
    info!(
        path = path_label.as_str(),
        nodes = map.nodes.len(),
        ways = map.ways.len(),
        lanelets = map.lanelets.len();
        "Read Lanelet2 map"
    );
    Ok(map)
}

/// Parse Lanelet2 OSM XML from a UTF-8 string.
pub fn from_lanelet_osm_str(xml: &str) -> Result<LaneletMap, ConvertError> {
    parse_lanelet_osm_str(xml, Path::new("<memory>"))
}

/// Parse Lanelet2 OSM XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_lanelet_osm_slice(bytes: &[u8]) -> Result<LaneletMap, ConvertError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| ConvertError::OsmXmlParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_lanelet_osm_str(xml)
}

fn parse_lanelet_osm_str(xml: &str, path: &Path) -> Result<LaneletMap, ConvertError> {
    // Exported maps may carry a `<!DOCTYPE osm>` line.
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(xml, options).map_err(|source| {
        ConvertError::OsmXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    })?;

    let mut map = LaneletMap::default();

    for element in document.root_element().children().filter(Node::is_element) {
        match element.tag_name().name() {
            "node" => read_node(element, &mut map),
            "way" => read_way(element, &mut map),
            "relation" => read_relation(element, &mut map),
            _ => {}
        }
    }

    if map.stats.duplicate_tag_keys > 0 {
        warn!(
            duplicates = map.stats.duplicate_tag_keys;
            "Duplicate tag keys overwritten by later values"
        );
    }

    Ok(map)
}

fn read_node(element: Node<'_, '_>, map: &mut LaneletMap) {
    map.stats.nodes_seen += 1;

    let tags = collect_tags(element, &mut map.stats);
    match local_coordinate(&tags) {
        Some(point) => {
            map.nodes.insert(attr_or_empty(element, "id"), point);
        }
        None => map.stats.nodes_without_coords += 1,
    }
}

fn read_way(element: Node<'_, '_>, map: &mut LaneletMap) {
    let node_refs = element
        .children()
        .filter(|child| child.is_element() && child.tag_name().name() == "nd")
        .filter_map(|nd| nd.attribute("ref"))
        .map(ToOwned::to_owned)
        .collect();

    let way = Way {
        node_refs,
        tags: collect_tags(element, &mut map.stats),
    };
    map.ways.insert(attr_or_empty(element, "id"), way);
}

fn read_relation(element: Node<'_, '_>, map: &mut LaneletMap) {
    map.stats.relations_seen += 1;

    let tags = collect_tags(element, &mut map.stats);
    if tags.get("type").map(String::as_str) != Some(LANELET_TYPE) {
        map.stats.non_lanelet_relations += 1;
        return;
    }

    let members = element
        .children()
        .filter(|child| child.is_element() && child.tag_name().name() == "member")
        .map(|member| {
            Member::new(
                attr_or_empty(member, "type"),
                attr_or_empty(member, "ref"),
                attr_or_empty(member, "role"),
            )
        })
        .collect();

    map.lanelets.push(LaneletRelation {
        id: element.attribute("id").map(ToOwned::to_owned),
        members,
        tags,
    });
}

/// Flatten `tag` children into a map; a `tag` without `k` or `v` is ignored.
fn collect_tags(element: Node<'_, '_>, stats: &mut ReadStats) -> Tags {
    let mut tags = Tags::new();
    for tag in element
        .children()
        .filter(|child| child.is_element() && child.tag_name().name() == "tag")
    {
        let (Some(key), Some(value)) = (tag.attribute("k"), tag.attribute("v")) else {
            continue;
        };
        if tags.insert(key.to_string(), value.to_string()).is_some() {
            stats.duplicate_tag_keys += 1;
        }
    }
    tags
}

fn local_coordinate(tags: &Tags) -> Option<Point> {
    let x = parse_coordinate(tags.get(LOCAL_X_KEY)?)?;
    let y = parse_coordinate(tags.get(LOCAL_Y_KEY)?)?;
    Some(Point::new(x, y)).filter(Point::is_finite)
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn attr_or_empty(element: Node<'_, '_>, name: &str) -> String {
    element.attribute(name).unwrap_or_default().to_string()
}
