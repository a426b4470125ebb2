//! Connection endpoint resolution.
//!
//! Turns id-based connections into literal coordinate pairs for renderers.
//! Each endpoint is an element (component or zone) or an explicit point; the
//! dominant axis between the two endpoint centers decides which sides the
//! connector leaves and enters through.

use std::collections::HashMap;

use log::warn;
use serde::Serialize;

use stagehand_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    model::{Connection, Diagram, Endpoint},
};

/// Side of a bounding box a connector attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Midpoint of this side of `bounds`.
    pub fn anchor_point(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Self::Top => Point::new(center.x(), bounds.min_y()),
            Self::Right => Point::new(bounds.max_x(), center.y()),
            Self::Bottom => Point::new(center.x(), bounds.max_y()),
            Self::Left => Point::new(bounds.min_x(), center.y()),
        }
    }
}

/// Picks the exit side of `from` and the entry side of `to`.
///
/// The axis with the larger absolute center-to-center delta is dominant; ties
/// go to the horizontal axis. The source leaves through the side facing the
/// target and the target is entered from the opposite side.
///
/// # Examples
///
/// ```
/// # use stagehand::connection::{Side, choose_anchor_sides};
/// # use stagehand::geometry::{Bounds, Point, Size};
/// let a = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
/// let b = Bounds::new_from_center(Point::new(0.0, 100.0), Size::new(10.0, 10.0));
/// assert_eq!(choose_anchor_sides(a, b), (Side::Bottom, Side::Top));
/// ```
pub fn choose_anchor_sides(from: Bounds, to: Bounds) -> (Side, Side) {
    let delta = to.center().sub_point(from.center());

    if delta.x().abs() >= delta.y().abs() {
        if delta.x() >= 0.0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        }
    } else if delta.y() >= 0.0 {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Top, Side::Bottom)
    }
}

/// Bounds of every addressable element of a diagram.
///
/// Components shadow zones of the same id; zones without a complete geometry
/// are not addressable.
#[derive(Debug, Default)]
pub struct GeometryLookup {
    bounds: HashMap<Id, Bounds>,
}

impl GeometryLookup {
    pub fn new(diagram: &Diagram) -> Self {
        let mut bounds = HashMap::new();
        for zone in &diagram.zones {
            if let Some(zone_bounds) = zone.bounds() {
                bounds.insert(zone.id, zone_bounds);
            }
        }
        for component in diagram.components.iter().rev() {
            bounds.insert(component.id, component.bounds());
        }
        Self { bounds }
    }

    pub fn get(&self, id: Id) -> Option<Bounds> {
        self.bounds.get(&id).copied()
    }
}

/// A connection reduced to two literal points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConnection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub from: Point,
    pub to: Point,
    pub from_side: Side,
    pub to_side: Side,
}

/// Resolves one connection against `lookup`.
///
/// An unknown id collapses onto the center of the other endpoint (or the
/// origin when neither resolves) and is reported with a warning.
pub fn resolve_connection(connection: &Connection, lookup: &GeometryLookup) -> ResolvedConnection {
    let from = endpoint_bounds(connection.from, lookup);
    let to = endpoint_bounds(connection.to, lookup);

    let (from, to) = match (from, to) {
        (Some(from), Some(to)) => (from, to),
        (Some(from), None) => (from, Bounds::degenerate(from.center())),
        (None, Some(to)) => (Bounds::degenerate(to.center()), to),
        (None, None) => (Bounds::default(), Bounds::default()),
    };

    let (from_side, to_side) = choose_anchor_sides(from, to);

    ResolvedConnection {
        id: connection.id,
        from: from_side.anchor_point(from),
        to: to_side.anchor_point(to),
        from_side,
        to_side,
    }
}

/// Resolves every connection of `diagram`, in order.
pub fn resolve_connections(diagram: &Diagram) -> Vec<ResolvedConnection> {
    let lookup = GeometryLookup::new(diagram);
    diagram
        .connections
        .iter()
        .map(|connection| resolve_connection(connection, &lookup))
        .collect()
}

fn endpoint_bounds(endpoint: Endpoint, lookup: &GeometryLookup) -> Option<Bounds> {
    match endpoint {
        Endpoint::Point(point) => Some(Bounds::degenerate(point)),
        Endpoint::Element(id) => {
            let bounds = lookup.get(id);
            if bounds.is_none() {
                warn!(id = id.to_string(); "Connection endpoint not found, using the other end");
            }
            bounds
        }
    }
}

#[cfg(test)]
mod tests {
    use stagehand_core::{
        geometry::Size,
        model::{Component, Zone},
        shape::ShapeKind,
    };

    use super::*;

    fn centered_box(id: &str, center: Point) -> Component {
        let mut component = Component::new(id, ShapeKind::Box);
        component.place_at_center(center);
        component
    }

    #[test]
    fn test_horizontal_boxes_resolve_to_facing_edges() {
        let diagram = Diagram {
            components: vec![
                centered_box("a", Point::new(100.0, 100.0)),
                centered_box("b", Point::new(300.0, 100.0)),
            ],
            connections: vec![Connection::between("a", "b")],
            ..Diagram::default()
        };

        let resolved = resolve_connections(&diagram);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].from, Point::new(160.0, 100.0));
        assert_eq!(resolved[0].to, Point::new(240.0, 100.0));
        assert_eq!(resolved[0].from_side, Side::Right);
        assert_eq!(resolved[0].to_side, Side::Left);
    }

    #[test]
    fn test_sides_follow_dominant_axis() {
        let origin = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(20.0, 20.0));
        let at = |x, y| Bounds::new_from_center(Point::new(x, y), Size::new(20.0, 20.0));

        assert_eq!(choose_anchor_sides(origin, at(100.0, 30.0)), (Side::Right, Side::Left));
        assert_eq!(choose_anchor_sides(origin, at(-100.0, 30.0)), (Side::Left, Side::Right));
        assert_eq!(choose_anchor_sides(origin, at(30.0, 100.0)), (Side::Bottom, Side::Top));
        assert_eq!(choose_anchor_sides(origin, at(30.0, -100.0)), (Side::Top, Side::Bottom));
        assert_eq!(choose_anchor_sides(origin, at(50.0, 50.0)), (Side::Right, Side::Left));
    }

    #[test]
    fn test_point_and_zone_endpoints() {
        let mut zone = Zone::new("lane");
        zone.set_bounds(Bounds::new_from_top_left(
            Point::new(0.0, 0.0),
            Size::new(100.0, 50.0),
        ));
        let diagram = Diagram {
            zones: vec![zone],
            connections: vec![Connection {
                id: Some(Id::new("c1")),
                from: Endpoint::Point(Point::new(300.0, 25.0)),
                to: Endpoint::Element(Id::new("lane")),
                extra: Default::default(),
            }],
            ..Diagram::default()
        };

        let resolved = resolve_connections(&diagram);
        assert_eq!(resolved[0].id, Some(Id::new("c1")));
        assert_eq!(resolved[0].from, Point::new(300.0, 25.0));
        assert_eq!(resolved[0].to, Point::new(100.0, 25.0));
    }

    #[test]
    fn test_missing_id_falls_back_to_other_center() {
        let diagram = Diagram {
            components: vec![centered_box("a", Point::new(100.0, 100.0))],
            connections: vec![
                Connection::between("a", "ghost"),
                Connection::between("ghost", "phantom"),
            ],
            ..Diagram::default()
        };

        let resolved = resolve_connections(&diagram);
        assert_eq!(resolved[0].from, Point::new(160.0, 100.0));
        assert_eq!(resolved[0].to, Point::new(100.0, 100.0));
        assert_eq!(resolved[1].from, Point::default());
        assert_eq!(resolved[1].to, Point::default());
    }
}
