use crate::lineage::domain::GraphData;
use serde::Serialize;
use std::collections::BTreeSet;

/// Summary statistics of a built graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub max_generation: i32,
    pub min_generation: i32,
    pub generation_count: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &GraphData) -> Self {
        let generations: BTreeSet<i32> = graph.nodes().iter().map(|n| n.generation).collect();

        Self {
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
            max_generation: generations.iter().copied().max().unwrap_or(0).max(0),
            min_generation: generations.iter().copied().min().unwrap_or(0).min(0),
            generation_count: generations.len(),
        }
    }
}

/// How far a bounded build fell short of the data source's full lineage
///
/// Hitting a limit is a successful outcome; this only lets callers tell the
/// user the graph was truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncationReport {
    pub node_limit_reached: bool,
    pub unexplored_relationships: u64,
    pub discarded_edges: usize,
}

impl TruncationReport {
    /// Compares relationship counts reported for each returned node with the
    /// edges the graph actually holds for it.
    pub fn evaluate(graph: &GraphData, max_nodes: usize, discarded_edges: usize) -> Self {
        let unexplored_relationships = graph
            .nodes()
            .iter()
            .map(|n| n.total_relationships().saturating_sub(graph.degree(&n.id) as u64))
            .sum();

        Self {
            node_limit_reached: graph.node_count() >= max_nodes,
            unexplored_relationships,
            discarded_edges,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.node_limit_reached || self.unexplored_relationships > 0 || self.discarded_edges > 0
    }
}
