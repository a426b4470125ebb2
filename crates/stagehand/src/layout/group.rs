//! Component grouping and the shared placement context.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};

use stagehand_core::{
    geometry::Size,
    identifier::Id,
    model::Diagram,
    options::Grouping,
    shape::ShapeKind,
};

use super::flow::Flow;
use crate::structure::ConnectionGraph;

/// A component as seen by a placement engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Member {
    /// Position of the component in the diagram's component list.
    pub index: usize,
    pub id: Id,
    /// Size in flow space.
    pub size: Size,
}

/// Components placed together, optionally framed by a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub zone: Option<Id>,
    pub members: Vec<Member>,
}

impl Group {
    fn new(zone: Option<Id>) -> Self {
        Self {
            zone,
            members: Vec::new(),
        }
    }

    /// Largest flow-space extent among the members, per axis.
    pub fn max_size(&self) -> Size {
        self.members
            .iter()
            .fold(Size::default(), |acc, member| acc.max(member.size))
    }
}

/// Splits the diagram's components into placement groups.
///
/// - [`Grouping::Zone`]: one group per zone in zone order, followed by a group
///   of unzoned components (including those pointing at an unknown zone).
///   Zones without members get no group.
/// - [`Grouping::Shape`]: one group per shape kind, in order of first appearance.
/// - [`Grouping::None`]: a single group.
pub fn group_components(diagram: &Diagram, grouping: Grouping, flow: Flow) -> Vec<Group> {
    let members = diagram
        .components
        .iter()
        .enumerate()
        .map(|(index, component)| Member {
            index,
            id: component.id,
            size: flow.size(component.size()),
        });

    let groups = match grouping {
        Grouping::None => {
            let mut group = Group::new(None);
            group.members.extend(members);
            vec![group]
        }
        Grouping::Shape => {
            let mut by_kind: IndexMap<ShapeKind, Group> = IndexMap::new();
            for member in members {
                let kind = diagram.components[member.index].shape;
                by_kind
                    .entry(kind)
                    .or_insert_with(|| Group::new(None))
                    .members
                    .push(member);
            }
            by_kind.into_values().collect()
        }
        Grouping::Zone => {
            let mut zoned: Vec<Group> = diagram
                .zones
                .iter()
                .map(|zone| Group::new(Some(zone.id)))
                .collect();
            let mut unzoned = Group::new(None);

            for member in members {
                let zone = diagram.components[member.index].zone;
                let target = match zone {
                    Some(zone) => zoned.iter_mut().find(|group| group.zone == Some(zone)),
                    None => None,
                };
                match target {
                    Some(group) => group.members.push(member),
                    None => {
                        if let Some(zone) = zone {
                            warn!(
                                component = member.id.to_string(),
                                zone = zone.to_string();
                                "Component references an unknown zone"
                            );
                        }
                        unzoned.members.push(member);
                    }
                }
            }

            zoned.push(unzoned);
            zoned
        }
    };

    let groups: Vec<Group> = groups
        .into_iter()
        .filter(|group| !group.members.is_empty())
        .collect();
    debug!(grouping:?, groups = groups.len(); "Components grouped");
    groups
}

/// Read-only inputs shared by every placement engine.
#[derive(Debug)]
pub struct Scene<'a> {
    graph: &'a ConnectionGraph,
    rank: HashMap<Id, usize>,
    zone_padding: f32,
}

impl<'a> Scene<'a> {
    /// Creates a scene; `path` must already be free of duplicates and unknown ids.
    pub fn new(graph: &'a ConnectionGraph, path: &[Id], zone_padding: f32) -> Self {
        let rank = path
            .iter()
            .enumerate()
            .map(|(rank, id)| (*id, rank))
            .collect();
        Self {
            graph,
            rank,
            zone_padding,
        }
    }

    pub fn graph(&self) -> &ConnectionGraph {
        self.graph
    }

    /// Position of `id` on the primary path.
    pub fn rank(&self, id: Id) -> Option<usize> {
        self.rank.get(&id).copied()
    }

    /// Inner padding of zone frames.
    pub fn zone_padding(&self) -> f32 {
        self.zone_padding
    }

    /// Members sorted by primary path rank; members off the path follow in
    /// authoring order.
    pub fn by_rank<'m>(&self, members: &'m [Member]) -> Vec<&'m Member> {
        let mut sorted: Vec<&Member> = members.iter().collect();
        sorted.sort_by_key(|member| self.rank(member.id).unwrap_or(usize::MAX));
        sorted
    }

    /// The member with the lowest primary path rank, if any is on the path.
    pub fn first_on_path<'m>(&self, members: &'m [Member]) -> Option<&'m Member> {
        members
            .iter()
            .filter_map(|member| self.rank(member.id).map(|rank| (rank, member)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, member)| member)
    }
}

#[cfg(test)]
mod tests {
    use stagehand_core::model::{Component, Zone};

    use super::*;

    fn ids(group: &Group) -> Vec<String> {
        group.members.iter().map(|m| m.id.to_string()).collect()
    }

    fn sample() -> Diagram {
        Diagram {
            zones: vec![Zone::new("back"), Zone::new("empty"), Zone::new("front")],
            components: vec![
                Component::new("web", ShapeKind::Person).with_zone("front"),
                Component::new("api", ShapeKind::Box).with_zone("back"),
                Component::new("db", ShapeKind::Database).with_zone("back"),
                Component::new("loose", ShapeKind::Box),
                Component::new("lost", ShapeKind::Box).with_zone("nowhere"),
            ],
            ..Diagram::default()
        }
    }

    #[test]
    fn test_zone_grouping_follows_zone_order() {
        let groups = group_components(&sample(), Grouping::Zone, Flow::new(Default::default()));

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].zone, Some(Id::new("back")));
        assert_eq!(ids(&groups[0]), vec!["api", "db"]);
        assert_eq!(groups[1].zone, Some(Id::new("front")));
        assert_eq!(groups[2].zone, None);
        assert_eq!(ids(&groups[2]), vec!["loose", "lost"]);
    }

    #[test]
    fn test_shape_grouping_by_first_appearance() {
        let groups = group_components(&sample(), Grouping::Shape, Flow::new(Default::default()));

        assert_eq!(groups.len(), 3);
        assert_eq!(ids(&groups[0]), vec!["web"]);
        assert_eq!(ids(&groups[1]), vec!["api", "loose", "lost"]);
        assert_eq!(ids(&groups[2]), vec!["db"]);
    }

    #[test]
    fn test_no_grouping_and_flow_sizes() {
        let flow = Flow::new(stagehand_core::options::Direction::TopToBottom);
        let groups = group_components(&sample(), Grouping::None, flow);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 5);
        assert_eq!(groups[0].members[1].size, Size::new(60.0, 120.0));
        assert_eq!(groups[0].max_size(), Size::new(80.0, 120.0));
    }

    #[test]
    fn test_scene_rank_helpers() {
        let diagram = sample();
        let graph = ConnectionGraph::new(&diagram);
        let path = [Id::new("db"), Id::new("web")];
        let scene = Scene::new(&graph, &path, 30.0);

        let groups = group_components(&diagram, Grouping::None, Flow::new(Default::default()));
        let members = &groups[0].members;
        let ordered: Vec<String> = scene
            .by_rank(members)
            .iter()
            .map(|m| m.id.to_string())
            .collect();

        assert_eq!(ordered, vec!["db", "web", "api", "loose", "lost"]);
        assert_eq!(scene.first_on_path(members).map(|m| m.id), Some(Id::new("db")));
        assert_eq!(scene.rank(Id::new("api")), None);
    }
}
