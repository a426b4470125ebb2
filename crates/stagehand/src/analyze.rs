//! Scene graph analysis.
//!
//! Infers a placement [`Profile`] and a primary path from the diagram's
//! topology when the author supplies neither.

use std::collections::HashSet;

use log::{debug, warn};
use petgraph::{
    algo::toposort,
    graph::NodeIndex,
    visit::{DfsEvent, depth_first_search},
};

use stagehand_core::{identifier::Id, model::Diagram, options::Profile};

use crate::structure::ConnectionGraph;

/// Share of all edges a single node must touch to be treated as a hub.
const HUB_EDGE_SHARE: f32 = 0.6;
const HUB_MIN_DEGREE: usize = 3;

/// Architectural tier a component belongs to, judged by keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tier {
    Client,
    Service,
    Data,
}

impl Tier {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "client" | "frontend" | "ui" | "web" | "browser" | "mobile" | "user" => {
                Some(Self::Client)
            }
            "api" | "service" | "backend" | "server" | "gateway" | "worker" => Some(Self::Service),
            "db" | "database" | "data" | "storage" | "cache" | "queue" | "store" => {
                Some(Self::Data)
            }
            _ => None,
        }
    }
}

/// Picks a profile from the shape of the diagram.
///
/// Rules, first match wins:
/// 1. Two or more zones and every component in a known zone: swimlane.
/// 2. A node of degree three or more touching at least 60% of all edges:
///    fanout when nothing points into it, hub otherwise.
/// 3. Role, id or label keywords spanning the client, service and data tiers: tiered.
/// 4. Otherwise pipeline.
pub fn infer_profile(diagram: &Diagram, graph: &ConnectionGraph) -> Profile {
    let profile = infer(diagram, graph);
    debug!(profile = profile.as_str(); "Inferred layout profile");
    profile
}

fn infer(diagram: &Diagram, graph: &ConnectionGraph) -> Profile {
    let all_zoned = !diagram.components.is_empty()
        && diagram.components.iter().all(|component| {
            component
                .zone
                .is_some_and(|zone| diagram.zone(zone).is_some())
        });
    if diagram.zones.len() >= 2 && all_zoned {
        return Profile::Swimlane;
    }

    let edges = graph.edge_count();
    if edges > 0 {
        let hub = graph.node_ids().fold(None, |best: Option<(Id, usize)>, id| {
            let degree = graph.degree(id);
            match best {
                Some((_, best_degree)) if best_degree >= degree => best,
                _ => Some((id, degree)),
            }
        });
        if let Some((hub, degree)) = hub {
            if degree >= HUB_MIN_DEGREE && degree as f32 >= HUB_EDGE_SHARE * edges as f32 {
                return if graph.in_degree(hub) == 0 {
                    Profile::Fanout
                } else {
                    Profile::Hub
                };
            }
        }
    }

    let tiers: HashSet<Tier> = diagram
        .components
        .iter()
        .flat_map(|component| {
            let id = component.id.to_string();
            let text = [component.role.as_deref(), Some(id.as_str()), component.label.as_deref()]
                .into_iter()
                .flatten()
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>()
                .join(" ");
            text.split(|c: char| !c.is_ascii_alphanumeric())
                .filter_map(Tier::from_word)
                .collect::<Vec<_>>()
        })
        .collect();
    if tiers.len() >= 3 {
        return Profile::Tiered;
    }

    Profile::Pipeline
}

/// Derives the dominant flow through the graph.
///
/// Back edges found by a depth-first search (started from the roots, then from
/// any node left unvisited) are dropped to break cycles. The result is the
/// longest chain in the remaining DAG; ties prefer the earlier component both
/// for the starting node and for each successor.
pub fn derive_primary_path(graph: &ConnectionGraph) -> Vec<Id> {
    let inner = graph.inner();
    if inner.node_count() == 0 {
        return Vec::new();
    }

    let roots: HashSet<Id> = graph.roots().collect();
    let starts = inner
        .node_indices()
        .filter(|idx| roots.contains(&inner[*idx]))
        .chain(inner.node_indices());

    let mut back_edges = HashSet::new();
    depth_first_search(inner, starts, |event| {
        if let DfsEvent::BackEdge(source, target) = event {
            back_edges.insert((source, target));
        }
    });
    debug!(back_edges = back_edges.len(); "Cycle-breaking edges found");

    let dag = inner.filter_map(
        |_, id| Some(*id),
        |edge, weight| {
            let endpoints = inner.edge_endpoints(edge)?;
            (!back_edges.contains(&endpoints)).then_some(*weight)
        },
    );

    let order = toposort(&dag, None).unwrap_or_else(|cycle| {
        warn!(node = dag[cycle.node_id()].to_string(); "Cycle left after removing back edges");
        dag.node_indices().collect()
    });

    let mut chain_len = vec![1_usize; dag.node_count()];
    let mut next: Vec<Option<NodeIndex>> = vec![None; dag.node_count()];
    for &node in order.iter().rev() {
        let best = dag
            .neighbors(node)
            .filter(|succ| *succ != node)
            .max_by(|a, b| {
                chain_len[a.index()]
                    .cmp(&chain_len[b.index()])
                    .then_with(|| b.index().cmp(&a.index()))
            });
        if let Some(succ) = best {
            chain_len[node.index()] = chain_len[succ.index()] + 1;
            next[node.index()] = Some(succ);
        }
    }

    let Some(start) = dag.node_indices().max_by(|a, b| {
        chain_len[a.index()]
            .cmp(&chain_len[b.index()])
            .then_with(|| b.index().cmp(&a.index()))
    }) else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(chain_len[start.index()]);
    let mut visited = HashSet::new();
    let mut current = Some(start);
    while let Some(node) = current {
        if !visited.insert(node) {
            break;
        }
        path.push(dag[node]);
        current = next[node.index()];
    }

    debug!(length = path.len(); "Derived primary path");
    path
}
