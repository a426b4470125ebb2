//! Layout options as they appear in a diagram description.
//!
//! A diagram may carry a `layout` object next to its zones, components and
//! connections. Every field in it is optional: whatever is left out falls back
//! to the application defaults when the engine resolves its configuration.

use std::{fmt, str::FromStr};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Named placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Sequential flow with branch rows above and below the main line.
    Pipeline,
    /// One central node with the rest arranged on a circle around it.
    Hub,
    /// A single source fanned out to a column of targets.
    Fanout,
    /// A single file of strictly layered components.
    Tiered,
    /// One lane per zone, columns aligned by primary path rank.
    Swimlane,
    /// Near-square grid in authoring order.
    Grid,
}

impl Profile {
    /// Parses a profile name, degrading gracefully.
    ///
    /// Returns `None` for `auto` (and the empty string), asking the caller to
    /// infer a profile. Unknown names fall back to [`Profile::Pipeline`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use stagehand_core::options::Profile;
    /// assert_eq!(Profile::parse_lenient("hub"), Some(Profile::Hub));
    /// assert_eq!(Profile::parse_lenient("auto"), None);
    /// assert_eq!(Profile::parse_lenient("zigzag"), Some(Profile::Pipeline));
    /// ```
    pub fn parse_lenient(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("auto") {
            return None;
        }

        Some(name.parse().unwrap_or_else(|_| {
            warn!(profile = name; "Unknown layout profile, using pipeline");
            Self::Pipeline
        }))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::Hub => "hub",
            Self::Fanout => "fanout",
            Self::Tiered => "tiered",
            Self::Swimlane => "swimlane",
            Self::Grid => "grid",
        }
    }
}

impl FromStr for Profile {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pipeline" => Ok(Self::Pipeline),
            "hub" => Ok(Self::Hub),
            "fanout" => Ok(Self::Fanout),
            "tiered" => Ok(Self::Tiered),
            "swimlane" => Ok(Self::Swimlane),
            "grid" => Ok(Self::Grid),
            _ => Err("Unsupported layout profile"),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the primary (flow) axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "left-to-right", alias = "ltr", alias = "LR", alias = "horizontal")]
    LeftToRight,
    #[serde(rename = "top-to-bottom", alias = "ttb", alias = "TB", alias = "vertical")]
    TopToBottom,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom)
    }
}

/// How components are grouped before placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// One group per zone, plus one for unzoned components.
    #[default]
    Zone,
    /// One group per shape kind.
    #[serde(alias = "shapekind", alias = "kind")]
    Shape,
    /// Everything in a single group.
    None,
}

/// Whether the engine runs at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Components already carry their positions.
    #[default]
    Manual,
    /// Positions are computed by the layout engine.
    #[serde(alias = "automatic")]
    Auto,
}

/// Named preset choosing a profile and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Workflow,
    Architecture,
    HubAndSpoke,
    Broadcast,
    Lanes,
}

impl Template {
    /// Profile and direction implied by this preset.
    pub fn preset(self) -> (Profile, Direction) {
        match self {
            Self::Workflow => (Profile::Pipeline, Direction::LeftToRight),
            Self::Architecture => (Profile::Tiered, Direction::TopToBottom),
            Self::HubAndSpoke => (Profile::Hub, Direction::LeftToRight),
            Self::Broadcast => (Profile::Fanout, Direction::LeftToRight),
            Self::Lanes => (Profile::Swimlane, Direction::LeftToRight),
        }
    }
}

impl FromStr for Template {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workflow" => Ok(Self::Workflow),
            "architecture" => Ok(Self::Architecture),
            "hub-and-spoke" | "hub_and_spoke" => Ok(Self::HubAndSpoke),
            "broadcast" => Ok(Self::Broadcast),
            "lanes" => Ok(Self::Lanes),
            _ => Err("Unsupported layout template"),
        }
    }
}

/// The `layout` object of a diagram description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<LayoutMode>,
    /// Raw profile name; parsed with [`Profile::parse_lenient`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<HintOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair: Option<RepairOptions>,
}

/// Placement hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HintOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_path: Option<Vec<Id>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Grouping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
}

/// Spacing overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_padding: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_column_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_row_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_component_gap: Option<f32>,
}

/// Repair loop overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepairOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_factor: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_overlaps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_crossings: Option<usize>,
}
