use super::{AssetEdge, AssetNode, IpId};
use serde::{Deserialize, Serialize};

/// GraphData aggregate: the structurally consistent result of one build
///
/// Produced by `GraphAssembler`, so every edge's endpoints are among `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    nodes: Vec<AssetNode>,
    edges: Vec<AssetEdge>,
}

impl GraphData {
    pub fn new(nodes: Vec<AssetNode>, edges: Vec<AssetEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[AssetNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[AssetEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &IpId) -> Option<&AssetNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// The generation-0 node, which is always the first node of a build
    pub fn root(&self) -> Option<&AssetNode> {
        self.nodes.iter().find(|n| n.is_root())
    }

    pub fn nodes_at_generation(&self, generation: i32) -> impl Iterator<Item = &AssetNode> {
        self.nodes.iter().filter(move |n| n.generation == generation)
    }

    /// Edges incident to `id` within this graph
    pub fn degree(&self, id: &IpId) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    pub fn into_parts(self) -> (Vec<AssetNode>, Vec<AssetEdge>) {
        (self.nodes, self.edges)
    }
}
