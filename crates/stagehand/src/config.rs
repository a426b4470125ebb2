//! Configuration types for Stagehand layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is a valid
//! configuration. A diagram's own `layout` object is applied on top with
//! [`LayoutConfig::with_options`].
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Profile, direction, hints, spacing and repair policy.
//! - [`Spacing`] - Gaps, padding and the target canvas.
//! - [`RepairPolicy`] - When and how the repair loop retries.
//!
//! # Example
//!
//! ```
//! # use stagehand::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [layout]
//!     profile = "hub"
//!
//!     [layout.spacing]
//!     column_gap = 100.0
//! "#).unwrap();
//! assert_eq!(config.layout().spacing().column_gap, 100.0);
//! ```

use log::warn;
use serde::{Deserialize, Deserializer};

use stagehand_core::{
    identifier::Id,
    model::LayoutScore,
    options::{Direction, Grouping, LayoutMode, LayoutOptions, Profile, Template},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Everything the engine needs to place one diagram.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub mode: LayoutMode,
    /// `None` asks the scene graph analyzer to pick a profile.
    #[serde(deserialize_with = "deserialize_profile")]
    pub profile: Option<Profile>,
    #[serde(deserialize_with = "deserialize_template")]
    pub template: Option<Template>,
    pub direction: Direction,
    pub hints: Hints,
    pub spacing: Spacing,
    pub repair: RepairPolicy,
}

impl LayoutConfig {
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// Applies a diagram's authored layout options on top of this configuration.
    ///
    /// Fields absent from `options` keep their configured value. A template only
    /// decides the profile (and the direction, unless one is given explicitly)
    /// when no profile is named.
    pub fn with_options(&self, options: &LayoutOptions) -> Self {
        let mut config = self.clone();

        if let Some(mode) = options.mode {
            config.mode = mode;
        }
        if let Some(direction) = options.direction {
            config.direction = direction;
        }
        if let Some(name) = &options.template {
            match name.parse::<Template>() {
                Ok(template) => config.template = Some(template),
                Err(_) => warn!(template = name; "Unknown layout template ignored"),
            }
        }
        if let Some(name) = &options.profile {
            config.profile = Profile::parse_lenient(name);
        }
        if let (None, Some(template)) = (config.profile, config.template) {
            let (profile, direction) = template.preset();
            config.profile = Some(profile);
            if options.direction.is_none() {
                config.direction = direction;
            }
        }

        if let Some(hints) = &options.hints {
            if let Some(path) = &hints.primary_path {
                config.hints.primary_path = path.clone();
            }
            if let Some(grouping) = hints.grouping {
                config.hints.grouping = grouping;
            }
            if let Some(compact) = hints.compact {
                config.hints.compact = compact;
            }
        }

        if let Some(spacing) = &options.spacing {
            let target = &mut config.spacing;
            // Gaps must stay positive so repair growth can widen them.
            let gaps = [
                (&mut target.column_gap, spacing.column_gap),
                (&mut target.row_gap, spacing.row_gap),
                (&mut target.component_gap, spacing.component_gap),
                (&mut target.zone_gap, spacing.zone_gap),
            ];
            for (field, value) in gaps {
                if let Some(value) = value.filter(|v| v.is_finite() && *v > 0.0) {
                    *field = value;
                }
            }
            let extents = [
                (&mut target.zone_padding, spacing.zone_padding),
                (&mut target.padding, spacing.padding),
                (&mut target.canvas_width, spacing.canvas_width),
                (&mut target.canvas_height, spacing.canvas_height),
                (&mut target.min_column_gap, spacing.min_column_gap),
                (&mut target.min_row_gap, spacing.min_row_gap),
                (&mut target.min_component_gap, spacing.min_component_gap),
            ];
            for (field, value) in extents {
                if let Some(value) = value.filter(|v| v.is_finite() && *v >= 0.0) {
                    *field = value;
                }
            }
        }

        if let Some(repair) = &options.repair {
            if let Some(max_passes) = repair.max_passes {
                config.repair.max_passes = max_passes;
                config.repair.max_passes = config.repair.effective_passes();
            }
            if let Some(growth_factor) = repair.growth_factor {
                config.repair.growth_factor = growth_factor;
            }
            if let Some(max_overlaps) = repair.max_overlaps {
                config.repair.max_overlaps = max_overlaps;
            }
            if let Some(max_crossings) = repair.max_crossings {
                config.repair.max_crossings = max_crossings;
            }
        }

        config
    }
}

fn deserialize_profile<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Profile>, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(Profile::parse_lenient))
}

fn deserialize_template<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Template>, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|name| match name.parse() {
        Ok(template) => Some(template),
        Err(_) => {
            warn!(template = name; "Unknown layout template ignored");
            None
        }
    }))
}

fn deserialize_max_passes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let policy = RepairPolicy {
        max_passes: usize::deserialize(deserializer)?,
        ..RepairPolicy::default()
    };
    Ok(policy.effective_passes())
}

/// Placement hints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Hints {
    /// Ordered ids of the dominant flow. Derived from topology when empty.
    pub primary_path: Vec<Id>,
    pub grouping: Grouping,
    /// Scale gaps down to fit the target canvas.
    pub compact: bool,
}

impl Default for Hints {
    fn default() -> Self {
        Self {
            primary_path: Vec::new(),
            grouping: Grouping::Zone,
            compact: true,
        }
    }
}

/// Gaps, padding and the target canvas.
///
/// "Column" gaps separate cells along the primary (flow) axis and "row" gaps
/// separate cells across it, whatever the direction. A gap set to zero in a
/// configuration file stays zero during repair; diagram overrides must be
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub column_gap: f32,
    pub row_gap: f32,
    pub component_gap: f32,
    /// Distance between consecutive zones or groups.
    pub zone_gap: f32,
    /// Inner padding between a zone's frame and its content.
    pub zone_padding: f32,
    /// Outer padding around the whole stage.
    pub padding: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub min_column_gap: f32,
    pub min_row_gap: f32,
    pub min_component_gap: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            column_gap: 80.0,
            row_gap: 60.0,
            component_gap: 40.0,
            zone_gap: 60.0,
            zone_padding: 30.0,
            padding: 60.0,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            min_column_gap: 24.0,
            min_row_gap: 20.0,
            min_component_gap: 16.0,
        }
    }
}

impl Spacing {
    /// The configured gaps, before compaction or repair growth.
    pub fn gaps(&self) -> Gaps {
        Gaps {
            column: self.column_gap,
            row: self.row_gap,
            component: self.component_gap,
            zone: self.zone_gap,
        }
    }
}

/// The gap values one layout attempt places with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaps {
    pub column: f32,
    pub row: f32,
    pub component: f32,
    pub zone: f32,
}

impl Gaps {
    /// Largest gap the repair loop will place with. Beyond this, component
    /// sizes are lost in `f32` precision next to the coordinates.
    pub const MAX_GAP: f32 = 1.0e6;

    /// Returns true when every gap is finite and at most [`Self::MAX_GAP`].
    pub fn is_usable(&self) -> bool {
        [self.column, self.row, self.component, self.zone]
            .iter()
            .all(|gap| gap.is_finite() && *gap <= Self::MAX_GAP)
    }

    /// Multiplies every gap by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            column: self.column * factor,
            row: self.row * factor,
            component: self.component * factor,
            zone: self.zone * factor,
        }
    }
}

/// When the repair loop retries and how much it relaxes spacing.
///
/// A layout needs repair when it has more than `max_overlaps` overlaps or more
/// than `max_crossings` crossings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepairPolicy {
    /// Repair passes after the first attempt, at most [`Self::MAX_PASSES`].
    #[serde(deserialize_with = "deserialize_max_passes")]
    pub max_passes: usize,
    pub growth_factor: f32,
    pub max_overlaps: usize,
    pub max_crossings: usize,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self {
            max_passes: 2,
            growth_factor: 1.35,
            max_overlaps: 0,
            max_crossings: 2,
        }
    }
}

impl RepairPolicy {
    /// Upper bound on repair passes after the initial attempt.
    pub const MAX_PASSES: usize = 16;

    /// Returns true when `score` is worse than this policy tolerates.
    pub fn needs_repair(&self, score: LayoutScore) -> bool {
        score.overlaps > self.max_overlaps || score.crossings > self.max_crossings
    }

    /// Growth factor to use; values that would not grow the gaps fall back to the default.
    pub fn effective_growth(&self) -> f32 {
        if self.growth_factor.is_finite() && self.growth_factor > 1.0 {
            self.growth_factor
        } else {
            let fallback = Self::default().growth_factor;
            warn!(
                growth_factor = self.growth_factor,
                fallback;
                "Repair growth factor must exceed 1.0"
            );
            fallback
        }
    }

    /// Number of repair passes to run, capped at [`Self::MAX_PASSES`].
    pub fn effective_passes(&self) -> usize {
        if self.max_passes > Self::MAX_PASSES {
            warn!(
                max_passes = self.max_passes,
                cap = Self::MAX_PASSES;
                "Repair pass count capped"
            );
            Self::MAX_PASSES
        } else {
            self.max_passes
        }
    }
}
