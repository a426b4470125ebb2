//! Stage arrangement.
//!
//! Maps a flow-space [`Arrangement`] onto stage coordinates, writes component
//! positions and zone frames back into the diagram and computes the stage
//! size.

use log::debug;

use stagehand_core::{
    geometry::{Bounds, Point, Size},
    model::Diagram,
};

use super::{engines::Arrangement, flow::Flow};

/// Writes `arrangement` into `diagram` and returns the stage size.
///
/// Everything is offset by `padding`; if some geometry would still come closer
/// than `padding` to the origin, the whole placement is shifted further. The
/// stage extends `padding` past the furthest placed geometry.
pub fn apply(diagram: &mut Diagram, arrangement: &Arrangement, flow: Flow, padding: f32) -> Size {
    let centers: Vec<(usize, Point)> = arrangement
        .centers
        .iter()
        .filter(|(index, _)| *index < diagram.components.len())
        .map(|(index, center)| (*index, flow.point(*center)))
        .collect();
    let zones: Vec<(usize, Bounds)> = arrangement
        .zones
        .iter()
        .filter_map(|(id, frame)| {
            let position = diagram.zones.iter().position(|zone| zone.id == *id)?;
            Some((position, flow.bounds(*frame)))
        })
        .collect();

    let content = centers
        .iter()
        .map(|(index, center)| {
            Bounds::new_from_center(*center, diagram.components[*index].size())
        })
        .chain(zones.iter().map(|(_, frame)| *frame))
        .reduce(|acc, bounds| acc.merge(&bounds));
    let Some(content) = content else {
        return Size::new(2.0 * padding, 2.0 * padding);
    };

    let offset = Point::new(
        padding + (-content.min_x()).max(0.0),
        padding + (-content.min_y()).max(0.0),
    );

    for (index, center) in centers {
        diagram.components[index].place_at_center(center.add_point(offset));
    }
    for (position, frame) in zones {
        diagram.zones[position].set_bounds(frame.translate(offset));
    }

    let placed = content.translate(offset);
    let stage = Size::new(placed.max_x() + padding, placed.max_y() + padding);
    diagram.stage_width = Some(stage.width());
    diagram.stage_height = Some(stage.height());

    debug!(width = stage.width(), height = stage.height(); "Stage computed");
    stage
}

/// Stage size for a diagram whose components already carry positions.
///
/// Positions are left untouched; the stage covers the origin and every
/// component and zone, plus `padding`.
pub fn measure(diagram: &Diagram, padding: f32) -> Size {
    let content = diagram
        .components
        .iter()
        .map(|component| component.bounds())
        .chain(diagram.zones.iter().filter_map(|zone| zone.bounds()))
        .reduce(|acc, bounds| acc.merge(&bounds));

    match content {
        Some(content) => Size::new(
            content.max_x().max(0.0) + padding,
            content.max_y().max(0.0) + padding,
        ),
        None => Size::new(2.0 * padding, 2.0 * padding),
    }
}
