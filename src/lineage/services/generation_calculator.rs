use crate::lineage::domain::{AssetEdge, AssetNode, EdgeType, IpId};
use std::collections::{HashMap, HashSet, VecDeque};

/// GenerationCalculator service for deriving generations from edges alone
///
/// Unlike the traversal, which assigns generations relative to the build
/// root, this treats every node without an incoming derivative edge as an
/// origin (generation 0) and walks derivative edges breadth-first. The first
/// visit fixes a node's generation.
pub struct GenerationCalculator;

impl GenerationCalculator {
    pub fn calculate(nodes: &[AssetNode], edges: &[AssetEdge]) -> HashMap<IpId, i32> {
        let derivative_edges: Vec<&AssetEdge> = edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Derivative)
            .collect();

        let has_parent: HashSet<&IpId> = derivative_edges.iter().map(|e| &e.target).collect();

        let mut children: HashMap<&IpId, Vec<&IpId>> = HashMap::new();
        for edge in &derivative_edges {
            children.entry(&edge.source).or_default().push(&edge.target);
        }

        let mut generations = HashMap::new();
        let mut visited: HashSet<&IpId> = HashSet::new();
        let mut queue: VecDeque<(&IpId, i32)> = nodes
            .iter()
            .filter(|n| !has_parent.contains(&n.id))
            .map(|n| (&n.id, 0))
            .collect();

        while let Some((id, generation)) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            generations.insert(id.clone(), generation);

            if let Some(targets) = children.get(id) {
                for target in targets {
                    if !visited.contains(target) {
                        queue.push_back((target, generation + 1));
                    }
                }
            }
        }

        generations
    }
}
