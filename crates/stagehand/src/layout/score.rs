//! Layout quality scoring.

use log::trace;

use stagehand_core::{
    geometry::Segment,
    identifier::Id,
    model::{Diagram, LayoutScore},
};

use crate::connection::resolve_connections;

/// Scores the current geometry of `diagram`.
///
/// Overlaps count component pairs whose bounding boxes intersect (touching
/// edges do not count). Crossings count pairs of resolved connection segments
/// that intersect strictly inside both; pairs sharing an endpoint element are
/// never compared.
pub fn score_diagram(diagram: &Diagram) -> LayoutScore {
    let bounds: Vec<_> = diagram
        .components
        .iter()
        .map(|component| component.bounds())
        .collect();
    let overlaps = bounds
        .iter()
        .enumerate()
        .map(|(i, a)| bounds[i + 1..].iter().filter(|b| a.intersects(b)).count())
        .sum();

    let segments: Vec<(Segment, [Option<Id>; 2])> = resolve_connections(diagram)
        .into_iter()
        .zip(&diagram.connections)
        .map(|(resolved, connection)| {
            (
                Segment::new(resolved.from, resolved.to),
                [connection.from.element(), connection.to.element()],
            )
        })
        .collect();
    let crossings = segments
        .iter()
        .enumerate()
        .map(|(i, (a, a_ends))| {
            segments[i + 1..]
                .iter()
                .filter(|(_, b_ends)| !shares_endpoint(a_ends, b_ends))
                .filter(|(b, _)| a.crosses(b))
                .count()
        })
        .sum();

    let score = LayoutScore::new(overlaps, crossings);
    trace!(overlaps, crossings, total = score.total; "Layout scored");
    score
}

fn shares_endpoint(a: &[Option<Id>; 2], b: &[Option<Id>; 2]) -> bool {
    a.iter()
        .flatten()
        .any(|id| b.iter().flatten().any(|other| other == id))
}
