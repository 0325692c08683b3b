use crate::lineage::domain::{GraphData, IpId};
use std::collections::{HashMap, VecDeque};

/// RemixPathFinder service for tracing lineage between two assets
pub struct RemixPathFinder;

impl RemixPathFinder {
    /// Shortest directed path from `from` to `to` following `source -> target`
    /// edges, endpoints included. `None` when either id is absent from the
    /// graph or `to` is unreachable.
    pub fn find(graph: &GraphData, from: &IpId, to: &IpId) -> Option<Vec<IpId>> {
        graph.node(from)?;
        graph.node(to)?;

        if from == to {
            return Some(vec![from.clone()]);
        }

        let mut adjacency: HashMap<&IpId, Vec<&IpId>> = HashMap::new();
        for edge in graph.edges() {
            adjacency.entry(&edge.source).or_default().push(&edge.target);
        }

        let mut came_from: HashMap<&IpId, &IpId> = HashMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for &next in adjacency.get(current).into_iter().flatten() {
                if next == from || came_from.contains_key(next) {
                    continue;
                }
                came_from.insert(next, current);

                if next == to {
                    return Some(Self::reconstruct(&came_from, from, to));
                }
                queue.push_back(next);
            }
        }

        None
    }

    fn reconstruct(came_from: &HashMap<&IpId, &IpId>, from: &IpId, to: &IpId) -> Vec<IpId> {
        let mut path = vec![to.clone()];
        let mut current = to;
        while current != from {
            match came_from.get(current) {
                Some(&previous) => {
                    path.push(previous.clone());
                    current = previous;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}
