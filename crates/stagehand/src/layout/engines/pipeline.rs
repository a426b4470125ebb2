//! Pipeline placement engine
//!
//! Lays the primary path out along the primary axis, one column per member.
//! Members off the path become branches in their parent's column, fanned out
//! in a zig-zag (`+1, -1, +2, -2, ...`) across the flow. Off-path members
//! without a parent on the path extend the main line in authoring order.

use std::collections::{HashMap, HashSet};

use log::debug;

use stagehand_core::identifier::Id;

use crate::{
    config::Gaps,
    layout::{
        engines::{Cells, Placement, ProfileEngine, place_cells, zigzag},
        group::{Group, Member, Scene},
    },
};

/// Sequential placement with branch rows.
#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileEngine for Engine {
    fn place_group(&self, group: &Group, scene: &Scene<'_>, gaps: Gaps) -> Placement {
        let on_path: Vec<&Member> = scene
            .by_rank(&group.members)
            .into_iter()
            .filter(|member| scene.rank(member.id).is_some())
            .collect();
        let path_ids: HashSet<Id> = on_path.iter().map(|member| member.id).collect();

        let mut main: Vec<&Member> = on_path.clone();
        let mut branches: Vec<(&Member, Id)> = Vec::new();
        for member in group
            .members
            .iter()
            .filter(|member| !path_ids.contains(&member.id))
        {
            match scene
                .graph()
                .first_parent(member.id, |parent| path_ids.contains(&parent))
            {
                Some(parent) => branches.push((member, parent)),
                None => main.push(member),
            }
        }

        let mut column_of: HashMap<Id, usize> = HashMap::new();
        let mut slots: Vec<(usize, usize, i64)> = Vec::with_capacity(group.members.len());
        for (column, member) in main.iter().enumerate() {
            column_of.entry(member.id).or_insert(column);
            slots.push((member.index, column, 0));
        }

        let mut fanned: HashMap<Id, usize> = HashMap::new();
        for (member, parent) in branches {
            let column = column_of.get(&parent).copied().unwrap_or(0);
            let nth = fanned.entry(parent).or_insert(0);
            slots.push((member.index, column, zigzag(*nth)));
            *nth += 1;
        }

        debug!(
            main = main.len(),
            branches = slots.len() - main.len();
            "Pipeline group placed"
        );

        place_cells(Cells::new(group.max_size(), gaps), &slots)
    }
}
