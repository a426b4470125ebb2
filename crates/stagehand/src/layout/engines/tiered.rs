//! Tiered placement engine
//!
//! A single file along the primary axis, one member per cell, in primary
//! path order. Branch structure is ignored.

use crate::{
    config::Gaps,
    layout::{
        engines::{Cells, Placement, ProfileEngine, place_cells},
        group::{Group, Scene},
    },
};

#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileEngine for Engine {
    fn place_group(&self, group: &Group, scene: &Scene<'_>, gaps: Gaps) -> Placement {
        let slots: Vec<(usize, usize, i64)> = scene
            .by_rank(&group.members)
            .into_iter()
            .enumerate()
            .map(|(column, member)| (member.index, column, 0))
            .collect();

        place_cells(Cells::new(group.max_size(), gaps), &slots)
    }
}
