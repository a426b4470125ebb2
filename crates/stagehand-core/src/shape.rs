//! The closed table of shape kinds.
//!
//! Every shape kind carries a fixed [`Anchor`]: the stored position of a
//! component denotes either the geometric center of its box or its top-left
//! corner. Layout works exclusively in center coordinates; the conversion
//! between the two lives here and nowhere else.

use std::{fmt, str::FromStr};

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::geometry::{Bounds, Point, Size};

/// What a stored position refers to for a given shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Position is the geometric center of the bounding box.
    Center,
    /// Position is the top-left corner of the bounding box.
    TopLeft,
}

impl Anchor {
    /// Converts an anchor position into the center of a box of the given size.
    pub fn to_center(self, anchor: Point, size: Size) -> Point {
        match self {
            Self::Center => anchor,
            Self::TopLeft => Point::new(
                anchor.x() + size.width() / 2.0,
                anchor.y() + size.height() / 2.0,
            ),
        }
    }

    /// Converts a box center into the anchor position for this anchor kind.
    pub fn from_center(self, center: Point, size: Size) -> Point {
        match self {
            Self::Center => center,
            Self::TopLeft => Point::new(
                center.x() - size.width() / 2.0,
                center.y() - size.height() / 2.0,
            ),
        }
    }

    /// Builds the bounding box of a shape stored at `anchor`.
    pub fn bounds(self, anchor: Point, size: Size) -> Bounds {
        match self {
            Self::Center => Bounds::new_from_center(anchor, size),
            Self::TopLeft => Bounds::new_from_top_left(anchor, size),
        }
    }
}

/// How a single scalar `size` value is turned into width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSize {
    /// The scalar is a radius; the box is twice as wide and tall.
    Radius,
    /// The scalar is the side of a square box.
    Side,
}

impl ScalarSize {
    pub fn to_size(self, value: f32) -> Size {
        match self {
            Self::Radius => Size::square(value * 2.0),
            Self::Side => Size::square(value),
        }
    }
}

/// Fixed per-kind record: anchor semantics, default size and scalar sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSpec {
    anchor: Anchor,
    default_size: Size,
    scalar: ScalarSize,
}

impl ShapeSpec {
    const fn new(anchor: Anchor, width: f32, height: f32, scalar: ScalarSize) -> Self {
        Self {
            anchor,
            default_size: Size::new(width, height),
            scalar,
        }
    }

    pub fn anchor(self) -> Anchor {
        self.anchor
    }

    pub fn default_size(self) -> Size {
        self.default_size
    }

    pub fn scalar(self) -> ScalarSize {
        self.scalar
    }
}

/// Error returned when a shape kind name is not part of the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape kind `{0}`")]
pub struct UnknownShapeKind(pub String);

/// The enumerated set of shapes a component can take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    #[default]
    Box,
    Circle,
    Diamond,
    Hex,
    Cylinder,
    Cloud,
    Server,
    Database,
    Person,
    Gear,
    Container,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 11] = [
        Self::Box,
        Self::Circle,
        Self::Diamond,
        Self::Hex,
        Self::Cylinder,
        Self::Cloud,
        Self::Server,
        Self::Database,
        Self::Person,
        Self::Gear,
        Self::Container,
    ];

    /// Returns the fixed record for this kind.
    pub const fn spec(self) -> ShapeSpec {
        use Anchor::{Center, TopLeft};
        use ScalarSize::{Radius, Side};

        match self {
            Self::Box => ShapeSpec::new(TopLeft, 120.0, 60.0, Side),
            Self::Circle => ShapeSpec::new(Center, 80.0, 80.0, Radius),
            Self::Diamond => ShapeSpec::new(Center, 100.0, 100.0, Side),
            Self::Hex => ShapeSpec::new(Center, 100.0, 88.0, Radius),
            Self::Cylinder => ShapeSpec::new(TopLeft, 80.0, 100.0, Side),
            Self::Cloud => ShapeSpec::new(Center, 140.0, 90.0, Side),
            Self::Server => ShapeSpec::new(TopLeft, 60.0, 80.0, Side),
            Self::Database => ShapeSpec::new(TopLeft, 70.0, 80.0, Side),
            Self::Person => ShapeSpec::new(Center, 50.0, 80.0, Side),
            Self::Gear => ShapeSpec::new(Center, 72.0, 72.0, Radius),
            Self::Container => ShapeSpec::new(TopLeft, 240.0, 160.0, Side),
        }
    }

    pub fn anchor(self) -> Anchor {
        self.spec().anchor()
    }

    pub fn default_size(self) -> Size {
        self.spec().default_size()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Hex => "hex",
            Self::Cylinder => "cylinder",
            Self::Cloud => "cloud",
            Self::Server => "server",
            Self::Database => "database",
            Self::Person => "person",
            Self::Gear => "gear",
            Self::Container => "container",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "box" | "rect" | "rectangle" => Ok(Self::Box),
            "circle" => Ok(Self::Circle),
            "diamond" | "decision" => Ok(Self::Diamond),
            "hex" | "hexagon" => Ok(Self::Hex),
            "cylinder" => Ok(Self::Cylinder),
            "cloud" => Ok(Self::Cloud),
            "server" | "server-icon" => Ok(Self::Server),
            "database" | "database-icon" | "db" => Ok(Self::Database),
            "person" | "person-icon" | "user" => Ok(Self::Person),
            "gear" => Ok(Self::Gear),
            "container" => Ok(Self::Container),
            other => Err(UnknownShapeKind(other.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShapeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Unknown kinds degrade to [`ShapeKind::Box`] instead of rejecting the diagram.
impl<'de> Deserialize<'de> for ShapeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_else(|err: UnknownShapeKind| {
            warn!(shape = err.0; "Unknown shape kind, falling back to box");
            Self::Box
        }))
    }
}
