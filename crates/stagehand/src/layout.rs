//! Automatic layout.
//!
//! [`run`] is the full pipeline: choose a profile, settle the primary path,
//! group components, place them with the profile's engine, compact gaps to
//! the target canvas, score the result and retry with wider gaps while the
//! score is worse than the repair policy allows.
//!
//! Engines work in flow space (primary axis along `x`) and in center coordinates; the
//! conversion to anchor coordinates happens once, when the placement is
//! written back into the diagram.

mod compact;
mod engines;
mod flow;
mod group;
mod score;
mod stage;

use std::collections::HashSet;

use log::{debug, info, warn};

use stagehand_core::{
    geometry::Size,
    identifier::Id,
    model::{Diagram, LayoutScore},
    options::{Grouping, Profile},
};

use crate::{
    analyze::{derive_primary_path, infer_profile},
    config::{Gaps, LayoutConfig},
    structure::ConnectionGraph,
};

pub use compact::compact_gaps;
pub use score::score_diagram;
pub use stage::measure as measure_stage;

use engines::EngineBuilder;
use flow::Flow;
use group::{Scene, group_components};

/// Gaps and score of one layout attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    /// Zero for the first attempt, then one per repair pass.
    pub pass: usize,
    pub gaps: Gaps,
    pub score: LayoutScore,
}

/// Result of a layout run.
#[derive(Debug, Clone)]
pub struct LayoutOutcome {
    /// The best attempt, with positions, zone frames, stage size and score filled in.
    pub diagram: Diagram,
    /// Profile that placed the diagram; `None` when nothing was placed.
    pub profile: Option<Profile>,
    pub score: LayoutScore,
    pub passes: Vec<PassReport>,
}

impl LayoutOutcome {
    fn unchanged(diagram: &Diagram) -> Self {
        Self {
            diagram: diagram.clone(),
            profile: None,
            score: diagram.layout_score.unwrap_or_default(),
            passes: Vec::new(),
        }
    }

    /// Stage size of the laid-out diagram.
    pub fn stage(&self) -> Size {
        Size::new(
            self.diagram.stage_width.unwrap_or_default(),
            self.diagram.stage_height.unwrap_or_default(),
        )
    }
}

/// Lays out `diagram` with `config`.
///
/// The input is never modified. An empty component list yields the input
/// unchanged. The loop makes at most `max_passes + 1` attempts, with
/// `max_passes` capped at [`RepairPolicy::MAX_PASSES`]. Attempt `k` uses the
/// configured gaps grown by `growth_factor^k`, and only the first attempt is
/// compacted. The loop stops early once the grown gaps leave the usable range.
/// The attempt with the lowest total score wins, the earliest one on ties.
///
/// [`RepairPolicy::MAX_PASSES`]: crate::config::RepairPolicy::MAX_PASSES
pub fn run(diagram: &Diagram, config: &LayoutConfig) -> LayoutOutcome {
    if diagram.components.is_empty() {
        info!("Diagram has no components, nothing to lay out");
        return LayoutOutcome::unchanged(diagram);
    }

    let graph = ConnectionGraph::new(diagram);
    let profile = config
        .profile
        .or_else(|| config.template.map(|template| template.preset().0))
        .unwrap_or_else(|| infer_profile(diagram, &graph));
    let path = primary_path(&config.hints.primary_path, &graph);
    let grouping = if profile == Profile::Swimlane {
        Grouping::Zone
    } else {
        config.hints.grouping
    };

    info!(
        profile = profile.as_str(),
        components = diagram.components.len(),
        connections = diagram.connections.len(),
        path_length = path.len();
        "Starting layout"
    );

    let flow = Flow::new(config.direction);
    let groups = group_components(diagram, grouping, flow);
    let scene = Scene::new(&graph, &path, config.spacing.zone_padding);

    let mut builder = EngineBuilder::new();
    let engine = builder.engine(profile);

    let spacing = &config.spacing;
    let repair = &config.repair;
    let growth = repair.effective_growth();
    let base = spacing.gaps();

    let max_passes = repair.effective_passes();

    let mut passes: Vec<PassReport> = Vec::with_capacity(max_passes + 1);
    let mut best: Option<(Diagram, LayoutScore)> = None;

    let mut factor = 1.0_f32;
    for pass in 0..=max_passes {
        if pass > 0 {
            factor *= growth;
        }
        let mut gaps = base.scale(factor);
        if !gaps.is_usable() {
            warn!(pass; "Repair gaps out of range, stopping");
            break;
        }
        let mut arrangement = engine.arrange(&groups, &scene, gaps);

        if pass == 0 && config.hints.compact {
            let compacted = compact_gaps(
                spacing,
                gaps,
                arrangement.extent.width(),
                arrangement.extent.height(),
                flow.is_vertical(),
            );
            if compacted != gaps {
                gaps = compacted;
                arrangement = engine.arrange(&groups, &scene, gaps);
            }
        }

        let mut candidate = diagram.clone();
        stage::apply(&mut candidate, &arrangement, flow, spacing.padding);
        let score = score_diagram(&candidate);
        debug!(
            pass,
            column_gap = gaps.column,
            overlaps = score.overlaps,
            crossings = score.crossings;
            "Layout pass scored"
        );
        passes.push(PassReport { pass, gaps, score });

        if best.as_ref().is_none_or(|(_, best)| score.total < best.total) {
            best = Some((candidate, score));
        }
        if !repair.needs_repair(score) {
            break;
        }
    }

    let Some((mut diagram, score)) = best else {
        return LayoutOutcome::unchanged(diagram);
    };
    diagram.layout_score = Some(score);

    if repair.needs_repair(score) {
        warn!(
            overlaps = score.overlaps,
            crossings = score.crossings,
            passes = passes.len();
            "Layout quality still below threshold after repair"
        );
    }
    info!(total = score.total, passes = passes.len(); "Layout finished");

    LayoutOutcome {
        diagram,
        profile: Some(profile),
        score,
        passes,
    }
}

/// Uses the hinted path when it names known components, otherwise derives one.
///
/// Unknown and repeated ids are dropped from the hint.
fn primary_path(hint: &[Id], graph: &ConnectionGraph) -> Vec<Id> {
    let mut seen = HashSet::new();
    let mut path = Vec::with_capacity(hint.len());
    for id in hint {
        if !graph.contains(*id) {
            warn!(id = id.to_string(); "Primary path names an unknown component, ignored");
        } else if seen.insert(*id) {
            path.push(*id);
        }
    }

    if path.is_empty() {
        derive_primary_path(graph)
    } else {
        path
    }
}
