//! The diagram description consumed and produced by the layout engine.
//!
//! A [`Diagram`] holds [`Zone`]s, [`Component`]s and [`Connection`]s plus an
//! optional [`LayoutOptions`] object. Layout returns the same structure with
//! positions overwritten and the stage size filled in. Fields this crate does
//! not interpret (labels, styling, animation cues) are carried through in each
//! element's `extra` map untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    options::LayoutOptions,
    shape::{Anchor, ShapeKind},
};

/// A complete diagram description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Diagram {
    pub zones: Vec<Zone>,
    pub components: Vec<Component>,
    pub connections: Vec<Connection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_score: Option<LayoutScore>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Diagram {
    /// Finds the first component with the given id.
    pub fn component(&self, id: Id) -> Option<&Component> {
        self.components.iter().find(|component| component.id == id)
    }

    /// Finds the zone with the given id.
    pub fn zone(&self, id: Id) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }
}

/// A scalar or a `[width, height]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Scalar(f32),
    Pair([f32; 2]),
}

/// Position written in the shape-kind's own vocabulary.
///
/// Corner-anchored kinds are drawn from `x`/`y`, center-anchored kinds from
/// `cx`/`cy`; renderers read whichever pair is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeCoords {
    Center { cx: f32, cy: f32 },
    Corner { x: f32, y: f32 },
}

impl ShapeCoords {
    pub fn new(anchor: Anchor, position: Point) -> Self {
        match anchor {
            Anchor::Center => Self::Center {
                cx: position.x(),
                cy: position.y(),
            },
            Anchor::TopLeft => Self::Corner {
                x: position.x(),
                y: position.y(),
            },
        }
    }
}

/// A shape on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: Id,
    #[serde(default)]
    pub shape: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form role keyword (`frontend`, `database`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default, alias = "zoneId", skip_serializing_if = "Option::is_none")]
    pub zone: Option<Id>,
    /// Anchor position; its meaning depends on [`ShapeKind::anchor`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<ShapeCoords>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Component {
    /// Creates a component of the given kind with no explicit size or position.
    pub fn new(id: &str, shape: ShapeKind) -> Self {
        Self {
            id: Id::new(id),
            shape,
            label: None,
            role: None,
            width: None,
            height: None,
            size: None,
            radius: None,
            zone: None,
            position: None,
            coords: None,
            extra: Map::new(),
        }
    }

    pub fn with_zone(mut self, zone: &str) -> Self {
        self.zone = Some(Id::new(zone));
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Resolves the component's width and height.
    ///
    /// Resolution order: explicit `width`/`height` (a missing one taken from the
    /// kind's default), a `[width, height]` size pair, a scalar `size`
    /// interpreted per kind, a `radius`, and finally the kind's default size.
    /// Non-positive or non-finite values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stagehand_core::{geometry::Size, model::{Component, SizeValue}, shape::ShapeKind};
    /// let mut circle = Component::new("c", ShapeKind::Circle);
    /// assert_eq!(circle.size(), Size::new(80.0, 80.0));
    ///
    /// circle.size = Some(SizeValue::Scalar(25.0));
    /// assert_eq!(circle.size(), Size::new(50.0, 50.0));
    /// ```
    pub fn size(&self) -> Size {
        let spec = self.shape.spec();
        let default = spec.default_size();

        let width = self.width.filter(|v| is_usable(*v));
        let height = self.height.filter(|v| is_usable(*v));
        if width.is_some() || height.is_some() {
            return Size::new(
                width.unwrap_or(default.width()),
                height.unwrap_or(default.height()),
            );
        }

        match self.size {
            Some(SizeValue::Pair([w, h])) if is_usable(w) && is_usable(h) => {
                return Size::new(w, h);
            }
            Some(SizeValue::Scalar(value)) if is_usable(value) => {
                return spec.scalar().to_size(value);
            }
            _ => {}
        }

        match self.radius.filter(|v| is_usable(*v)) {
            Some(radius) => Size::square(radius * 2.0),
            None => default,
        }
    }

    /// Bounding box derived from the stored anchor position.
    ///
    /// A component without a position is treated as anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        let anchor = self.position.unwrap_or_default();
        self.shape.anchor().bounds(anchor, self.size())
    }

    /// Geometric center of the bounding box.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Converts a center point into this component's anchor coordinates.
    pub fn center_to_anchor(&self, center: Point) -> Point {
        self.shape.anchor().from_center(center, self.size())
    }

    /// Converts anchor coordinates into this component's center point.
    pub fn anchor_to_center(&self, anchor: Point) -> Point {
        self.shape.anchor().to_center(anchor, self.size())
    }

    /// Moves the component so that its box is centered on `center`.
    ///
    /// Writes both the anchor `position` and the kind-specific `coords`.
    pub fn place_at_center(&mut self, center: Point) {
        let anchor = self.center_to_anchor(center);
        self.position = Some(anchor);
        self.coords = Some(ShapeCoords::new(self.shape.anchor(), anchor));
    }
}

fn is_usable(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// A rectangular grouping region. Always anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Zone {
    pub fn new(id: &str) -> Self {
        Self {
            id: Id::new(id),
            label: None,
            position: None,
            width: None,
            height: None,
            color: None,
            extra: Map::new(),
        }
    }

    /// Bounds of the zone, if it has a complete geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        let position = self.position?;
        let size = Size::new(self.width?, self.height?);
        Some(Bounds::new_from_top_left(position, size))
    }

    /// Overwrites the zone geometry.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.position = Some(bounds.min_point());
        self.width = Some(bounds.width());
        self.height = Some(bounds.height());
    }
}

/// One end of a connection: an element id or a literal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Element(Id),
    Point(Point),
}

impl Endpoint {
    /// Element id, if this endpoint refers to one.
    pub fn element(self) -> Option<Id> {
        match self {
            Self::Element(id) => Some(id),
            Self::Point(_) => None,
        }
    }
}

/// A directed edge between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub from: Endpoint,
    pub to: Endpoint,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Connection {
    /// Creates a connection between two element ids.
    pub fn between(from: &str, to: &str) -> Self {
        Self {
            id: None,
            from: Endpoint::Element(Id::new(from)),
            to: Endpoint::Element(Id::new(to)),
            extra: Map::new(),
        }
    }
}

/// Quality of a layout: lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutScore {
    pub overlaps: usize,
    pub crossings: usize,
    pub total: usize,
}

impl LayoutScore {
    /// Builds a score; overlaps weigh three times as much as crossings.
    pub fn new(overlaps: usize, crossings: usize) -> Self {
        Self {
            overlaps,
            crossings,
            total: overlaps * 3 + crossings,
        }
    }
}
