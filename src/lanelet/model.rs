//! In-memory lookup tables for a parsed Lanelet2 map.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::geometry::Point;

/// Tag key/value pairs. On duplicate keys the last occurrence wins.
pub type Tags = BTreeMap<String, String>;

/// An ordered polyline of node references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Way {
    /// Node ids in document order. Duplicates and dangling refs are kept.
    pub node_refs: Vec<String>,
    pub tags: Tags,
}

impl Way {
    pub fn new(node_refs: Vec<String>) -> Self {
        Self {
            node_refs,
            tags: Tags::new(),
        }
    }
}

/// A `member` entry of a relation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Member {
    /// Referenced element kind (`node`, `way`, `relation`).
    pub member_type: String,
    /// Referenced element id.
    pub reference: String,
    pub role: String,
}

impl Member {
    pub fn new(
        member_type: impl Into<String>,
        reference: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            member_type: member_type.into(),
            reference: reference.into(),
            role: role.into(),
        }
    }
}

/// A relation tagged `type=lanelet`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaneletRelation {
    /// Relation id as written in the document, kept for diagnostics.
    pub id: Option<String>,
    pub members: Vec<Member>,
    pub tags: Tags,
}

impl LaneletRelation {
    /// Way id referenced under `role`, or `None` if there is no such member.
    ///
    /// Members are scanned in order and a later match replaces an earlier
    /// one. Empty references count as missing.
    pub fn boundary_way(&self, role: &str) -> Option<&str> {
        self.members
            .iter()
            .rev()
            .find(|member| member.role == role && member.member_type == "way")
            .map(|member| member.reference.as_str())
            .filter(|reference| !reference.is_empty())
    }

    /// Display label: the relation id, or `"<no id>"`.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }
}

/// Counters collected while reading a map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReadStats {
    /// `node` elements encountered.
    pub nodes_seen: usize,
    /// Nodes dropped for a missing or unparseable `local_x`/`local_y`.
    pub nodes_without_coords: usize,
    /// `relation` elements encountered.
    pub relations_seen: usize,
    /// Relations dropped because they are not `type=lanelet`.
    pub non_lanelet_relations: usize,
    /// Tag entries overwritten by a later tag with the same key.
    pub duplicate_tag_keys: usize,
}

/// The three lookup structures built from a Lanelet2 document.
#[derive(Clone, Debug, Default)]
pub struct LaneletMap {
    /// Node id to planar coordinate. Only nodes with both coordinates.
    pub nodes: HashMap<String, Point>,
    pub ways: HashMap<String, Way>,
    /// Lanelet relations in document order.
    pub lanelets: Vec<LaneletRelation>,
    pub stats: ReadStats,
}

impl LaneletMap {
    /// Look up a way by id.
    pub fn way(&self, id: &str) -> Option<&Way> {
        self.ways.get(id)
    }

    /// Resolve a way to coordinates, dropping node ids not in the node table.
    pub fn resolve_way(&self, way: &Way) -> Vec<Point> {
        way.node_refs
            .iter()
            .filter_map(|node_id| self.nodes.get(node_id).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_way_last_match_wins() {
        let relation = LaneletRelation {
            id: Some("7".to_string()),
            members: vec![
                Member::new("way", "1", "left"),
                Member::new("node", "9", "right"),
                Member::new("way", "2", "left"),
                Member::new("way", "3", "right"),
            ],
            tags: Tags::new(),
        };
        assert_eq!(relation.boundary_way("left"), Some("2"));
        assert_eq!(relation.boundary_way("right"), Some("3"));
        assert_eq!(relation.boundary_way("centerline"), None);
    }

    #[test]
    fn boundary_way_ignores_non_way_members_and_empty_refs() {
        let relation = LaneletRelation {
            id: None,
            members: vec![
                Member::new("relation", "4", "left"),
                Member::new("way", "", "right"),
            ],
            tags: Tags::new(),
        };
        assert_eq!(relation.boundary_way("left"), None);
        assert_eq!(relation.boundary_way("right"), None);
        assert_eq!(relation.label(), "<no id>");
    }

    #[test]
    fn resolve_way_drops_dangling_refs() {
        let mut map = LaneletMap::default();
        map.nodes.insert("a".to_string(), Point::new(0.0, 0.0));
        map.nodes.insert("b".to_string(), Point::new(1.0, 0.0));

        let way = Way::new(vec![
            "a".to_string(),
            "missing".to_string(),
            "b".to_string(),
            "a".to_string(),
        ]);
        assert_eq!(
            map.resolve_way(&way),
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 0.0)
            ]
        );
    }
}
