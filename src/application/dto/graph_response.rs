use crate::lineage::domain::{BuildMetadata, GraphData, IpId};
use crate::lineage::services::{GraphStats, TruncationReport};
use serde::Serialize;

/// Outcome of a build with respect to its wall-clock budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    /// Traversal explored everything reachable within the limits
    Complete,
    /// Timeout elapsed; the graph holds what was gathered until then
    TimedOut,
}

impl BuildStatus {
    pub fn is_complete(self) -> bool {
        self == BuildStatus::Complete
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Complete => write!(f, "complete"),
            BuildStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

/// GraphResponse - Response DTO of the graph build use case
///
/// Carries the assembled graph plus everything the formatters need to
/// describe how it was obtained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    pub root: IpId,
    #[serde(flatten)]
    pub graph: GraphData,
    pub status: BuildStatus,
    pub stats: GraphStats,
    pub truncation: TruncationReport,
    /// Root reports more relationships than a readable graph can show
    pub large_graph: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remix_path: Option<Vec<IpId>>,
    pub metadata: BuildMetadata,
}
