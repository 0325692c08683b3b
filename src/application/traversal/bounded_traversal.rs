use super::EdgeCache;
use crate::lineage::domain::{
    AssetEdge, AssetNode, EdgeDirection, EdgeRecord, EdgeType, GraphData, IpId,
};
use crate::lineage::policies::{FetchLimits, TraversalLimits};
use crate::lineage::services::GraphAssembler;
use crate::ports::outbound::{AssetRepository, EdgeRepository, ProgressReporter};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;

/// BoundedTraversal - depth- and size-limited expansion from a root asset
///
/// Owns every piece of mutable state of one build (node list, edge list,
/// visited set, edge cache). Construct a fresh value per build; it is not
/// meant to be reused.
///
/// Expansion is depth-first: an asset's ancestor page is processed (recursing
/// into each parent) before its descendant page. Within a page, edges are
/// taken in the order the data source returns them, so earlier relationships
/// win the node budget.
pub struct BoundedTraversal<'a, A, E>
where
    A: AssetRepository + ?Sized,
    E: EdgeRepository + ?Sized,
{
    assets: &'a A,
    edges: EdgeCache<'a, E>,
    progress: Option<&'a dyn ProgressReporter>,
    limits: TraversalLimits,
    fetch_limits: FetchLimits,
    nodes: Vec<AssetNode>,
    recorded_edges: Vec<AssetEdge>,
    edge_keys: HashSet<(IpId, IpId, EdgeType)>,
    visited: HashSet<IpId>,
}

impl<'a, A, E> BoundedTraversal<'a, A, E>
where
    A: AssetRepository + ?Sized,
    E: EdgeRepository + ?Sized,
{
    pub fn new(assets: &'a A, edges: &'a E, limits: TraversalLimits) -> Self {
        Self {
            assets,
            edges: EdgeCache::new(edges),
            progress: None,
            limits,
            fetch_limits: FetchLimits::default(),
            nodes: Vec::new(),
            recorded_edges: Vec::new(),
            edge_keys: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    pub fn with_fetch_limits(mut self, fetch_limits: FetchLimits) -> Self {
        self.fetch_limits = fetch_limits;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Expands the graph from `root`. Completes when the reachable subgraph
    /// within the limits has been explored; may be cancelled by dropping the
    /// returned future, in which case the state gathered so far is kept.
    pub async fn run(&mut self, root: &IpId) {
        self.expand(root.clone(), 0, 0).await;
        tracing::debug!(
            %root,
            nodes = self.nodes.len(),
            edges = self.recorded_edges.len(),
            remote_edge_calls = self.edges.remote_calls(),
            "traversal finished"
        );
    }

    pub fn nodes(&self) -> &[AssetNode] {
        &self.nodes
    }

    /// Edges recorded so far, including those towards nodes that were never added
    pub fn recorded_edges(&self) -> &[AssetEdge] {
        &self.recorded_edges
    }

    /// Edge lookups that reached the repository (cache misses)
    pub fn remote_edge_calls(&self) -> usize {
        self.edges.remote_calls()
    }

    pub fn into_parts(self) -> (Vec<AssetNode>, Vec<AssetEdge>) {
        (self.nodes, self.recorded_edges)
    }

    fn node_limit_reached(&self) -> bool {
        self.nodes.len() >= self.limits.max_nodes()
    }

    fn expand(&mut self, id: IpId, depth: u32, generation: i32) -> BoxFuture<'_, ()> {
        async move {
            if self.visited.contains(&id)
                || depth > self.limits.max_depth()
                || self.node_limit_reached()
            {
                return;
            }
            self.visited.insert(id.clone());

            let record = match self.assets.get_asset(&id).await {
                Ok(Some(record)) => record,
                Ok(None) => {
                    tracing::debug!(%id, "asset not found; branch is empty");
                    return;
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "Asset lookup failed; branch is empty");
                    return;
                }
            };

            self.nodes.push(AssetNode::from_record(record, generation));
            if let Some(progress) = self.progress {
                progress.report_progress(
                    self.nodes.len(),
                    self.limits.max_nodes(),
                    Some(id.short().as_str()),
                );
            }

            if self.node_limit_reached() {
                return;
            }

            for direction in EdgeDirection::ALL {
                self.expand_direction(&id, direction, depth, generation).await;
            }
        }
        .boxed()
    }

    async fn expand_direction(
        &mut self,
        id: &IpId,
        direction: EdgeDirection,
        depth: u32,
        generation: i32,
    ) {
        let page = self
            .edges
            .get(id, direction, self.fetch_limits.page_size(depth))
            .await;

        for EdgeRecord {
            counterpart,
            provenance,
        } in page
        {
            if self.node_limit_reached() {
                break;
            }

            let (source, target) = direction.orient(id, &counterpart);
            self.record_edge(AssetEdge::derivative(
                source.clone(),
                target.clone(),
                provenance,
            ));

            if depth < self.limits.max_depth() {
                self.expand(
                    counterpart,
                    depth + 1,
                    generation + direction.generation_delta(),
                )
                .await;
            }
        }
    }

    fn record_edge(&mut self, edge: AssetEdge) {
        if self.edge_keys.insert(edge.key()) {
            self.recorded_edges.push(edge);
        }
    }
}

/// Builds the bounded graph around `root` with default fetch limits.
///
/// Returns an empty graph when the root cannot be resolved; lookup failures
/// below the root only prune their own branch.
pub async fn build_graph<A, E>(
    assets: &A,
    edges: &E,
    root: &IpId,
    limits: TraversalLimits,
) -> GraphData
where
    A: AssetRepository + ?Sized,
    E: EdgeRepository + ?Sized,
{
    let mut traversal = BoundedTraversal::new(assets, edges, limits);
    traversal.run(root).await;
    let (nodes, edges) = traversal.into_parts();
    GraphAssembler::assemble(nodes, edges).graph
}
