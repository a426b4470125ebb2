//! Grid placement engine
//!
//! Packs members into a near-square grid, `ceil(sqrt(n))` columns wide,
//! filled row by row in authoring order.

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

    fn columns(count: usize) -> usize {
        ((count as f64).sqrt().ceil() as usize).max(1)
    }
}

impl ProfileEngine for Engine {
    fn place_group(&self, group: &Group, _scene: &Scene<'_>, gaps: Gaps) -> Placement {
        let columns = Self::columns(group.members.len());
        let slots: Vec<(usize, usize, i64)> = group
            .members
            .iter()
            .enumerate()
            .map(|(n, member)| (member.index, n % columns, (n / columns) as i64))
            .collect();

        place_cells(Cells::new(group.max_size(), gaps), &slots)
    }
}
