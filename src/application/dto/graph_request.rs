use crate::lineage::domain::IpId;
use crate::lineage::policies::{FetchLimits, TraversalLimits};
use std::time::Duration;

/// Default wall-clock budget of one build (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GraphRequest - Internal request DTO for the graph build use case
#[derive(Debug, Clone)]
pub struct GraphRequest {
    /// Asset the graph is built around
    pub root: IpId,
    /// Depth and node-count bounds
    pub limits: TraversalLimits,
    /// Edge page sizes at the root and below
    pub fetch_limits: FetchLimits,
    /// Wall-clock budget; partial results are returned when it elapses
    pub timeout: Duration,
    /// Optional asset to trace a remix path to, starting at the root
    pub path_target: Option<IpId>,
}

impl GraphRequest {
    pub fn new(root: IpId, limits: TraversalLimits) -> Self {
        Self {
            root,
            limits,
            fetch_limits: FetchLimits::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            path_target: None,
        }
    }

    pub fn with_fetch_limits(mut self, fetch_limits: FetchLimits) -> Self {
        self.fetch_limits = fetch_limits;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_path_target(mut self, target: Option<IpId>) -> Self {
        self.path_target = target;
        self
    }
}
