//! Swimlane placement engine
//!
//! Each zone becomes a lane stacked across the flow. Columns are shared by all
//! lanes: a member's column is its primary path rank (compressed to the ranks
//! actually present), so members at the same rank line up across lanes.
//! Members off the path follow the lane's last path column in authoring order.

use log::{debug, warn};

use stagehand_core::geometry::{Bounds, Point, Size};

use crate::{
    config::Gaps,
    layout::{
        engines::{Arrangement, Cells, Placement, ProfileEngine, grid, place_cells},
        group::{Group, Scene},
    },
};

#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Distinct primary path ranks of the given groups, ascending.
    fn ranks(groups: &[Group], scene: &Scene<'_>) -> Vec<usize> {
        let mut ranks: Vec<usize> = groups
            .iter()
            .flat_map(|group| &group.members)
            .filter_map(|member| scene.rank(member.id))
            .collect();
        ranks.sort_unstable();
        ranks.dedup();
        ranks
    }

    /// `(component index, column)` for every member of one lane.
    fn lane_columns(group: &Group, scene: &Scene<'_>, ranks: &[usize]) -> Vec<(usize, usize)> {
        let column_of = |rank: usize| ranks.partition_point(|r| *r < rank);

        let mut columns: Vec<(usize, usize)> = Vec::with_capacity(group.members.len());
        let mut next = 0;
        for member in &group.members {
            if let Some(rank) = scene.rank(member.id) {
                let column = column_of(rank);
                next = next.max(column + 1);
                columns.push((member.index, column));
            }
        }
        for member in &group.members {
            if scene.rank(member.id).is_none() {
                columns.push((member.index, next));
                next += 1;
            }
        }
        columns
    }
}

impl ProfileEngine for Engine {
    fn place_group(&self, group: &Group, scene: &Scene<'_>, gaps: Gaps) -> Placement {
        let ranks = Self::ranks(std::slice::from_ref(group), scene);
        let slots: Vec<(usize, usize, i64)> = Self::lane_columns(group, scene, &ranks)
            .into_iter()
            .map(|(index, column)| (index, column, 0))
            .collect();
        place_cells(Cells::new(group.max_size(), gaps), &slots)
    }

    fn arrange(&self, groups: &[Group], scene: &Scene<'_>, gaps: Gaps) -> Arrangement {
        if groups.iter().all(|group| group.zone.is_none()) {
            warn!("Swimlane layout needs zones, falling back to grid");
            return grid::Engine::new().arrange(groups, scene, gaps);
        }

        let max_size = groups
            .iter()
            .map(Group::max_size)
            .fold(Size::default(), Size::max);
        let cells = Cells::new(max_size, gaps);
        let ranks = Self::ranks(groups, scene);

        let lanes: Vec<Vec<(usize, usize)>> = groups
            .iter()
            .map(|group| Self::lane_columns(group, scene, &ranks))
            .collect();
        let columns = lanes
            .iter()
            .flat_map(|lane| lane.iter().map(|(_, column)| column + 1))
            .max()
            .unwrap_or(1);
        let content = cells.extent(columns, 1);
        let pad = scene.zone_padding();

        let mut arrangement = Arrangement::default();
        let mut cursor = 0.0_f32;
        for (group, lane) in groups.iter().zip(&lanes) {
            let origin = Point::new(pad, cursor + pad);
            arrangement.centers.extend(
                lane.iter()
                    .map(|(index, column)| (*index, cells.center(*column, 0).add_point(origin))),
            );

            let frame = Bounds::new_from_top_left(
                Point::new(0.0, cursor),
                Size::new(content.width() + 2.0 * pad, content.height() + 2.0 * pad),
            );
            if let Some(zone) = group.zone {
                arrangement.zones.push((zone, frame));
            }
            cursor = frame.max_y() + gaps.zone;
        }

        arrangement.extent = Size::new(
            content.width() + 2.0 * pad,
            (cursor - gaps.zone).max(0.0),
        );
        debug!(lanes = groups.len(), columns; "Swimlanes arranged");
        arrangement
    }
}
