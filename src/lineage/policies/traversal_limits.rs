use crate::shared::error::GraphError;
use crate::shared::Result;

/// Largest page the edges API serves in one request
pub const MAX_PAGE_SIZE: usize = 200;

/// Root relationship count above which a graph is reported as large
pub const LARGE_GRAPH_THRESHOLD: u64 = 100;

/// Bounds on one traversal: hops from the root and total distinct nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    max_depth: u32,
    max_nodes: usize,
}

impl TraversalLimits {
    pub const DEFAULT_MAX_DEPTH: u32 = 1;
    pub const DEFAULT_MAX_NODES: usize = 50;

    pub fn new(max_depth: u32, max_nodes: usize) -> Result<Self> {
        if max_nodes == 0 {
            return Err(GraphError::Validation {
                message: "max_nodes must be at least 1".to_string(),
            }
            .into());
        }
        Ok(Self {
            max_depth,
            max_nodes,
        })
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_nodes: Self::DEFAULT_MAX_NODES,
        }
    }
}

/// FetchLimits policy for edge page sizes
///
/// The root's direct neighborhood is fetched wide; deeper levels use a narrow
/// page so fan-out stays bounded as the traversal moves outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    root: usize,
    branch: usize,
}

impl FetchLimits {
    pub const DEFAULT_ROOT: usize = 20;
    pub const DEFAULT_BRANCH: usize = 5;

    pub fn new(root: usize, branch: usize) -> Result<Self> {
        for (name, value) in [("root_fetch_limit", root), ("branch_fetch_limit", branch)] {
            if value == 0 || value > MAX_PAGE_SIZE {
                return Err(GraphError::Validation {
                    message: format!(
                        "{} must be between 1 and {}, got {}",
                        name, MAX_PAGE_SIZE, value
                    ),
                }
                .into());
            }
        }
        Ok(Self { root, branch })
    }

    /// Page size for an edge lookup made at `depth`
    pub fn page_size(&self, depth: u32) -> usize {
        if depth == 0 {
            self.root
        } else {
            self.branch
        }
    }
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            root: Self::DEFAULT_ROOT,
            branch: Self::DEFAULT_BRANCH,
        }
    }
}
