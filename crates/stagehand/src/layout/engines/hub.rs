//! Hub placement engine
//!
//! Puts one hub member at the center of the group and the remaining members
//! ("spokes") on a circle around it, evenly spaced starting along the primary
//! axis. The radius is large enough that the spokes clear the hub and, for two
//! or more spokes, each other.

use std::f32::consts::PI;

use log::debug;

use stagehand_core::geometry::{Point, Size};

use crate::{
    config::Gaps,
    layout::{
        engines::{Placement, ProfileEngine},
        group::{Group, Member, Scene},
    },
};

#[derive(Debug, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// First member on the primary path, else the one with the most connections.
    fn select_hub<'m>(group: &'m Group, scene: &Scene<'_>) -> Option<&'m Member> {
        scene.first_on_path(&group.members).or_else(|| {
            group.members.iter().fold(None, |best: Option<&Member>, member| match best {
                Some(best)
                    if scene.graph().degree(best.id) >= scene.graph().degree(member.id) =>
                {
                    Some(best)
                }
                _ => Some(member),
            })
        })
    }

    /// Circle radius for `spokes` members whose largest diagonal is `diagonal`.
    fn radius(hub: Size, spokes: usize, diagonal: f32, gap: f32) -> f32 {
        if spokes == 0 {
            return 0.0;
        }
        let clearance = hub.diagonal() / 2.0 + diagonal / 2.0 + gap;
        if spokes < 2 {
            return clearance;
        }
        let circumference = (diagonal + gap) / (2.0 * (PI / spokes as f32).sin());
        clearance.max(circumference)
    }
}

impl ProfileEngine for Engine {
    fn place_group(&self, group: &Group, scene: &Scene<'_>, gaps: Gaps) -> Placement {
        let Some(hub) = Self::select_hub(group, scene) else {
            return Placement::default();
        };

        let spokes: Vec<&Member> = group
            .members
            .iter()
            .filter(|member| member.index != hub.index)
            .collect();
        let diagonal = spokes
            .iter()
            .map(|member| member.size.diagonal())
            .fold(0.0_f32, f32::max);
        let radius = Self::radius(hub.size, spokes.len(), diagonal, gaps.component);

        let reach = if spokes.is_empty() {
            0.0
        } else {
            radius + diagonal / 2.0
        };
        let half_primary = reach.max(hub.size.width() / 2.0) + gaps.column;
        let half_secondary = reach.max(hub.size.height() / 2.0) + gaps.row;
        let center = Point::new(half_primary, half_secondary);

        debug!(
            hub = hub.id.to_string(),
            spokes = spokes.len(),
            radius;
            "Hub group placed"
        );

        let step = 2.0 * PI / spokes.len().max(1) as f32;
        let mut centers = Vec::with_capacity(group.members.len());
        centers.push((hub.index, center));
        centers.extend(spokes.iter().enumerate().map(|(k, member)| {
            let angle = step * k as f32;
            let offset = Point::new(radius * angle.cos(), radius * angle.sin());
            (member.index, center.add_point(offset))
        }));

        Placement {
            centers,
            extent: Size::new(2.0 * half_primary, 2.0 * half_secondary),
        }
    }
}
