use crate::application::dto::{BuildStatus, GraphRequest, GraphResponse};
use crate::application::traversal::BoundedTraversal;
use crate::lineage::domain::{AssetEdge, AssetNode, BuildMetadata, GraphData, IpId};
use crate::lineage::policies::LARGE_GRAPH_THRESHOLD;
use crate::lineage::services::{GraphAssembler, GraphStats, RemixPathFinder, TruncationReport};
use crate::ports::outbound::{AssetRepository, EdgeRepository, ProgressReporter};
use crate::shared::error::GraphError;
use crate::shared::Result;

/// Nodes, recorded edges and status of one traversal run
type TraversalOutcome = (Vec<AssetNode>, Vec<AssetEdge>, BuildStatus);

/// BuildGraphUseCase - Core use case for building a relationship graph
///
/// This use case orchestrates one bounded build using generic dependency
/// injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `AR` - AssetRepository implementation
/// * `ER` - EdgeRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildGraphUseCase<AR, ER, PR> {
    asset_repository: AR,
    edge_repository: ER,
    progress_reporter: PR,
}

impl<AR, ER, PR> BuildGraphUseCase<AR, ER, PR>
where
    AR: AssetRepository,
    ER: EdgeRepository,
    PR: ProgressReporter,
{
    /// Creates a new BuildGraphUseCase with injected dependencies
    pub fn new(asset_repository: AR, edge_repository: ER, progress_reporter: PR) -> Self {
        Self {
            asset_repository,
            edge_repository,
            progress_reporter,
        }
    }

    /// Executes the graph build use case
    ///
    /// # Arguments
    /// * `request` - Root id, limits and wall-clock budget of the build
    ///
    /// # Returns
    /// GraphResponse with the assembled graph, build status and statistics.
    /// Running out of time or hitting a limit still yields a response; only a
    /// build that collected nothing fails.
    pub async fn execute(&self, request: GraphRequest) -> Result<GraphResponse> {
        // Step 1: Validate request
        Self::validate(&request)?;

        // Step 2: Traverse under the wall-clock budget
        let (nodes, edges, status) = self.traverse(&request).await;

        // Step 3: Fail only when not even the root was collected
        if nodes.is_empty() {
            return Err(Self::empty_build_error(&request, status).into());
        }

        // Step 4: Assemble and describe the graph
        let report = GraphAssembler::assemble(nodes, edges);
        let response = self.build_response(&request, report.graph, report.discarded_edges, status);

        self.report_outcome(&response);
        Ok(response)
    }

    fn validate(request: &GraphRequest) -> Result<()> {
        if request.timeout.is_zero() {
            return Err(GraphError::Validation {
                message: "Timeout must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Runs the traversal; on timeout the in-flight lookup is dropped and
    /// whatever was gathered so far is kept.
    async fn traverse(&self, request: &GraphRequest) -> TraversalOutcome {
        self.progress_reporter.report(&format!(
            "🔍 Building relationship graph for {} (depth {}, up to {} nodes)...",
            request.root,
            request.limits.max_depth(),
            request.limits.max_nodes()
        ));

        let mut traversal = BoundedTraversal::new(
            &self.asset_repository,
            &self.edge_repository,
            request.limits,
        )
        .with_fetch_limits(request.fetch_limits)
        .with_progress(&self.progress_reporter);

        let outcome = tokio::time::timeout(request.timeout, traversal.run(&request.root)).await;
        let status = match outcome {
            Ok(()) => BuildStatus::Complete,
            Err(_) => {
                tracing::warn!(
                    root = %request.root,
                    timeout_ms = request.timeout.as_millis() as u64,
                    nodes = traversal.nodes().len(),
                    "Graph build timed out; keeping partial result"
                );
                BuildStatus::TimedOut
            }
        };

        let (nodes, edges) = traversal.into_parts();
        (nodes, edges, status)
    }

    fn empty_build_error(request: &GraphRequest, status: BuildStatus) -> GraphError {
        match status {
            BuildStatus::Complete => GraphError::RootNotFound {
                ip_id: request.root.to_string(),
            },
            BuildStatus::TimedOut => GraphError::Timeout {
                ip_id: request.root.to_string(),
                timeout_secs: request.timeout.as_secs(),
            },
        }
    }

    fn build_response(
        &self,
        request: &GraphRequest,
        graph: GraphData,
        discarded_edges: usize,
        status: BuildStatus,
    ) -> GraphResponse {
        let stats = GraphStats::from_graph(&graph);
        let truncation =
            TruncationReport::evaluate(&graph, request.limits.max_nodes(), discarded_edges);
        let large_graph = graph
            .node(&request.root)
            .is_some_and(|root| root.total_relationships() > LARGE_GRAPH_THRESHOLD);
        let remix_path = request
            .path_target
            .as_ref()
            .and_then(|target| self.trace_remix_path(&graph, &request.root, target));

        GraphResponse {
            root: request.root.clone(),
            graph,
            status,
            stats,
            truncation,
            large_graph,
            remix_path,
            metadata: BuildMetadata::generate_default(),
        }
    }

    /// Path between root and target in either lineage direction
    fn trace_remix_path(&self, graph: &GraphData, root: &IpId, target: &IpId) -> Option<Vec<IpId>> {
        let path = RemixPathFinder::find(graph, root, target)
            .or_else(|| RemixPathFinder::find(graph, target, root));
        if path.is_none() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: No remix path between {} and {} within the built graph.",
                root.short(),
                target.short()
            ));
        }
        path
    }

    fn report_outcome(&self, response: &GraphResponse) {
        if response.large_graph {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} has more than {} direct relationships; the graph shows a bounded subset.",
                response.root.short(),
                LARGE_GRAPH_THRESHOLD
            ));
        }
        if response.status == BuildStatus::TimedOut {
            self.progress_reporter.report_error(
                "⚠️  Warning: Build timed out; showing the partial graph collected so far.",
            );
        }
        if response.truncation.node_limit_reached {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Node limit reached ({} nodes); increase --max-nodes to see more.",
                response.stats.total_nodes
            ));
        }

        self.progress_reporter.report_completion(&format!(
            "Graph built: {} node(s), {} edge(s) across {} generation(s)",
            response.stats.total_nodes, response.stats.total_edges, response.stats.generation_count
        ));
    }
}
