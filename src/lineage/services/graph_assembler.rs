use crate::lineage::domain::{AssetEdge, AssetNode, GraphData, IpId};
use std::collections::HashSet;

/// Outcome of assembling a graph, with the number of edges that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyReport {
    pub graph: GraphData,
    pub discarded_edges: usize,
}

/// GraphAssembler service for producing a structurally consistent graph
///
/// The traversal records edges towards neighbors it never added under the
/// node-count limit. Assembly drops those, so every emitted edge has both
/// endpoints among the emitted nodes.
pub struct GraphAssembler;

impl GraphAssembler {
    pub fn assemble(nodes: Vec<AssetNode>, edges: Vec<AssetEdge>) -> AssemblyReport {
        let members: HashSet<IpId> = nodes.iter().map(|n| n.id.clone()).collect();
        let total = edges.len();

        let kept: Vec<AssetEdge> = edges
            .into_iter()
            .filter(|edge| {
                let keep = members.contains(&edge.source) && members.contains(&edge.target);
                if !keep {
                    tracing::warn!(
                        source = %edge.source,
                        target = %edge.target,
                        "Skipping edge: endpoint not in graph"
                    );
                }
                keep
            })
            .collect();

        let discarded_edges = total - kept.len();
        AssemblyReport {
            graph: GraphData::new(nodes, kept),
            discarded_edges,
        }
    }
}
