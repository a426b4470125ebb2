//! Fanout placement engine
//!
//! The source sits in the first column; every other member shares the second
//! column, stacked across the flow in a zig-zag around the source's row so the
//! targets stay centered on it.

use log::debug;

use crate::{
    config::Gaps,
    layout::{
        engines::{Cells, Placement, ProfileEngine, place_cells, zigzag},
        group::{Group, Member, Scene},
    },
};

#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// First member on the primary path, else the one with the most outgoing connections.
    fn select_source<'m>(group: &'m Group, scene: &Scene<'_>) -> Option<&'m Member> {
        scene.first_on_path(&group.members).or_else(|| {
            group.members.iter().fold(None, |best: Option<&Member>, member| match best {
                Some(best)
                    if scene.graph().out_degree(best.id)
                        >= scene.graph().out_degree(member.id) =>
                {
                    Some(best)
                }
                _ => Some(member),
            })
        })
    }
}

impl ProfileEngine for Engine {
    fn place_group(&self, group: &Group, scene: &Scene<'_>, gaps: Gaps) -> Placement {
        let Some(source) = Self::select_source(group, scene) else {
            return Placement::default();
        };

        let mut slots: Vec<(usize, usize, i64)> = vec![(source.index, 0, 0)];
        let targets = group
            .members
            .iter()
            .filter(|member| member.index != source.index);
        for (n, target) in targets.enumerate() {
            let row = if n == 0 { 0 } else { zigzag(n - 1) };
            slots.push((target.index, 1, row));
        }

        debug!(
            source = source.id.to_string(),
            targets = slots.len() - 1;
            "Fanout group placed"
        );

        place_cells(Cells::new(group.max_size(), gaps), &slots)
    }
}

#[cfg(test)]
mod tests {
    use stagehand_core::identifier::Id;

    use super::*;
    use crate::{
        layout::engines::test_support::{boxes, center_of, gaps, single_group},
        structure::ConnectionGraph,
    };

    #[test]
    fn test_source_by_out_degree() {
        let diagram = boxes(&["a", "s", "b"], &[("s", "a"), ("s", "b"), ("a", "b")]);
        let graph = ConnectionGraph::new(&diagram);
        let scene = Scene::new(&graph, &[], 30.0);

        let source = Engine::select_source(&single_group(&diagram), &scene).map(|m| m.id);
        assert_eq!(source, Some(Id::new("s")));
    }

    #[test]
    fn test_targets_centered_on_source() {
        let diagram = boxes(
            &["s", "a", "b", "c", "d"],
            &[("s", "a"), ("s", "b"), ("s", "c"), ("s", "d")],
        );
        let graph = ConnectionGraph::new(&diagram);
        let path = [Id::new("s")];
        let scene = Scene::new(&graph, &path, 30.0);

        let placement = Engine::new().place_group(&single_group(&diagram), &scene, gaps());
        let source = center_of(&placement, 0);
        let targets: Vec<_> = (1..5).map(|index| center_of(&placement, index)).collect();

        assert!(targets.iter().all(|t| t.x() > source.x()));
        assert!(targets.windows(2).all(|pair| pair[0].x() == pair[1].x()));
        // Rows 0, +1, -1, +2 around the source.
        assert_eq!(targets[0].y(), source.y());
        assert_eq!(targets[1].y() - source.y(), source.y() - targets[2].y());
        assert!(targets[3].y() > targets[1].y());
    }
}
