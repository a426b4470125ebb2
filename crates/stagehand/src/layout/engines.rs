//! Placement engine factory module
//!
//! Every [`Profile`] has an engine that turns grouped components into
//! flow-space centers. Engines place one group at a time inside a local frame
//! whose origin is the group's top-left corner; the default
//! [`ProfileEngine::arrange`] then lines the groups up along the primary axis.
//!
//! The module uses a builder that creates engines on demand and caches them,
//! so the repair loop reuses one engine across passes.

mod fanout;
mod grid;
mod hub;
mod pipeline;
mod swimlane;
mod tiered;

use std::collections::HashMap;

use log::trace;

use stagehand_core::{
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
    options::Profile,
};

use super::group::{Group, Scene};
use crate::config::Gaps;

/// Centers of one group's members in the group's local frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// `(component index, center)` pairs.
    pub centers: Vec<(usize, Point)>,
    /// Size of the local frame, margins included.
    pub extent: Size,
}

/// Flow-space result of placing every group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    /// `(component index, center)` pairs.
    pub centers: Vec<(usize, Point)>,
    /// Frames of the zones that received members.
    pub zones: Vec<(Id, Bounds)>,
    /// Size of the whole arrangement.
    pub extent: Size,
}

/// Trait implemented by every placement profile.
pub trait ProfileEngine {
    /// Places the members of a single group.
    fn place_group(&self, group: &Group, scene: &Scene<'_>, gaps: Gaps) -> Placement;

    /// Places every group.
    ///
    /// Groups follow one another along the primary axis, separated by the zone
    /// gap. Zone groups are padded by the scene's zone padding and report their
    /// frame.
    fn arrange(&self, groups: &[Group], scene: &Scene<'_>, gaps: Gaps) -> Arrangement {
        let mut arrangement = Arrangement::default();
        let mut cursor = 0.0_f32;
        let mut secondary = 0.0_f32;

        for group in groups {
            let placement = self.place_group(group, scene, gaps);
            let pad = if group.zone.is_some() {
                scene.zone_padding()
            } else {
                0.0
            };

            let origin = Point::new(cursor + pad, pad);
            arrangement.centers.extend(
                placement
                    .centers
                    .into_iter()
                    .map(|(index, center)| (index, center.add_point(origin))),
            );

            let frame = Bounds::new_from_top_left(
                Point::new(cursor, 0.0),
                placement.extent.add_padding(Insets::uniform(pad)),
            );
            if let Some(zone) = group.zone {
                arrangement.zones.push((zone, frame));
            }

            cursor = frame.max_x() + gaps.zone;
            secondary = secondary.max(frame.max_y());
        }

        let primary = if groups.is_empty() {
            0.0
        } else {
            cursor - gaps.zone
        };
        arrangement.extent = Size::new(primary, secondary);
        trace!(arrangement:?; "Groups arranged");
        arrangement
    }
}

/// Uniform cells sized to the largest member of a group.
///
/// A cell is the largest extent plus a full gap on each side, so neighbouring
/// members are always at least two gaps apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cells {
    primary: f32,
    secondary: f32,
}

impl Cells {
    pub(crate) fn new(max_size: Size, gaps: Gaps) -> Self {
        Self {
            primary: max_size.width() + 2.0 * gaps.column,
            secondary: max_size.height() + 2.0 * gaps.row,
        }
    }

    pub(crate) fn center(self, column: usize, row: usize) -> Point {
        Point::new(
            column as f32 * self.primary + self.primary / 2.0,
            row as f32 * self.secondary + self.secondary / 2.0,
        )
    }

    pub(crate) fn extent(self, columns: usize, rows: usize) -> Size {
        Size::new(
            columns as f32 * self.primary,
            rows as f32 * self.secondary,
        )
    }
}

/// Row offset of the `n`-th item in a zig-zag sequence: `+1, -1, +2, -2, ...`.
pub(crate) fn zigzag(n: usize) -> i64 {
    let level = (n / 2 + 1) as i64;
    if n % 2 == 0 { level } else { -level }
}

/// Lays out cells given as `(component index, column, signed row)` triples,
/// shifting rows so the smallest becomes zero.
pub(crate) fn place_cells(cells: Cells, slots: &[(usize, usize, i64)]) -> Placement {
    if slots.is_empty() {
        return Placement::default();
    }

    let min_row = slots.iter().map(|(_, _, row)| *row).min().unwrap_or(0);
    let max_row = slots.iter().map(|(_, _, row)| *row).max().unwrap_or(0);
    let columns = slots.iter().map(|(_, column, _)| column + 1).max().unwrap_or(0);
    let rows = (max_row - min_row + 1) as usize;

    Placement {
        centers: slots
            .iter()
            .map(|(index, column, row)| (*index, cells.center(*column, (row - min_row) as usize)))
            .collect(),
        extent: cells.extent(columns, rows),
    }
}

/// Builder for creating and caching placement engines.
pub struct EngineBuilder {
    engines: HashMap<Profile, Box<dyn ProfileEngine>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }

    /// Get the engine for `profile`, creating it on first use.
    pub fn engine(&mut self, profile: Profile) -> &dyn ProfileEngine {
        &**self
            .engines
            .entry(profile)
            .or_insert_with(|| {
                let engine: Box<dyn ProfileEngine> = match profile {
                    Profile::Pipeline => Box::new(pipeline::Engine::new()),
                    Profile::Tiered => Box::new(tiered::Engine::new()),
                    Profile::Hub => Box::new(hub::Engine::new()),
                    Profile::Fanout => Box::new(fanout::Engine::new()),
                    Profile::Swimlane => Box::new(swimlane::Engine::new()),
                    Profile::Grid => Box::new(grid::Engine::new()),
                };
                engine
            })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
