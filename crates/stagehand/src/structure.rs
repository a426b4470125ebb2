//! Connection topology over the component set.
//!
//! [`ConnectionGraph`] is a directed graph with one node per component (in
//! authoring order) and one edge per connection whose endpoints are both
//! components. Edge weights are the index of the originating connection, so
//! "first connection" questions are answered by the lowest weight.

use std::collections::HashMap;

use log::{debug, trace, warn};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use stagehand_core::{identifier::Id, model::Diagram};

/// Directed component graph built from a diagram's connections.
#[derive(Debug, Clone)]
pub struct ConnectionGraph {
    graph: DiGraph<Id, usize>,
    indices: HashMap<Id, NodeIndex>,
}

impl ConnectionGraph {
    /// Builds the graph for `diagram`.
    ///
    /// Duplicate component ids keep their first occurrence. Connections that
    /// touch a zone, a literal point or an unknown id do not become edges.
    pub fn new(diagram: &Diagram) -> Self {
        let mut graph = DiGraph::new();
        let mut indices = HashMap::new();

        for component in &diagram.components {
            if indices.contains_key(&component.id) {
                warn!(id = component.id.to_string(); "Duplicate component id, keeping the first");
                continue;
            }
            let idx = graph.add_node(component.id);
            indices.insert(component.id, idx);
        }

        for (position, connection) in diagram.connections.iter().enumerate() {
            let (Some(from), Some(to)) = (connection.from.element(), connection.to.element())
            else {
                debug!(connection = position; "Connection with a literal point skipped in topology");
                continue;
            };

            match (indices.get(&from), indices.get(&to)) {
                (Some(&source), Some(&target)) => {
                    graph.add_edge(source, target, position);
                }
                _ => {
                    let unknown = [from, to]
                        .into_iter()
                        .filter(|id| !indices.contains_key(id))
                        .filter(|id| diagram.zone(*id).is_none())
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>();
                    if unknown.is_empty() {
                        debug!(connection = position; "Zone connection skipped in topology");
                    } else {
                        warn!(
                            connection = position,
                            ids:? = unknown;
                            "Connection references unknown ids, skipped in topology"
                        );
                    }
                }
            }
        }

        trace!(nodes = graph.node_count(), edges = graph.edge_count(); "Connection graph built");

        Self { graph, indices }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if `id` names a component in the graph.
    pub fn contains(&self, id: Id) -> bool {
        self.indices.contains_key(&id)
    }

    /// Component ids in authoring order.
    pub fn node_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx])
    }

    /// `(from, to)` pairs in connection order.
    pub fn edges(&self) -> impl Iterator<Item = (Id, Id)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()]))
    }

    pub fn in_degree(&self, id: Id) -> usize {
        self.count_edges(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: Id) -> usize {
        self.count_edges(id, Direction::Outgoing)
    }

    /// Number of edges touching `id` in either direction.
    pub fn degree(&self, id: Id) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    /// Components without incoming edges, in authoring order.
    pub fn roots(&self) -> impl Iterator<Item = Id> + '_ {
        self.node_ids().filter(|id| self.in_degree(*id) == 0)
    }

    /// Finds the source of the earliest connection into `id` whose source
    /// satisfies `is_candidate`.
    pub fn first_parent(&self, id: Id, is_candidate: impl Fn(Id) -> bool) -> Option<Id> {
        let idx = self.indices.get(&id)?;
        self.graph
            .edges_directed(*idx, Direction::Incoming)
            .filter(|edge| edge.source() != *idx)
            .map(|edge| (*edge.weight(), self.graph[edge.source()]))
            .filter(|(_, source)| is_candidate(*source))
            .min_by_key(|(position, _)| *position)
            .map(|(_, source)| source)
    }

    pub(crate) fn inner(&self) -> &DiGraph<Id, usize> {
        &self.graph
    }

    fn count_edges(&self, id: Id, direction: Direction) -> usize {
        self.indices
            .get(&id)
            .map_or(0, |idx| self.graph.edges_directed(*idx, direction).count())
    }
}
