use crate::application::dto::{BuildStatus, GraphResponse};
use crate::lineage::domain::{
    AssetEdge, AssetNode, AssetRecord, BuildMetadata, EdgeProvenance, GraphData, IpId,
    IpMetadata,
};
use crate::lineage::services::{GraphStats, TruncationReport};

pub fn ip(n: u8) -> IpId {
    IpId::new(&format!("0x{:040x}", n)).unwrap()
}

/// Parent (1) -> root (2) -> derivative (3), root titled "Root | Song"
pub fn sample_response() -> GraphResponse {
    let root_record = AssetRecord::new(ip(2))
        .with_counts(1, 1)
        .with_metadata(IpMetadata {
            title: Some("Root | Song".to_string()),
            creator: Some("0x00000000000000000000000000000000000000cc".to_string()),
            ..IpMetadata::default()
        });
    let nodes = vec![
        AssetNode::from_record(root_record, 0),
        AssetNode::from_record(AssetRecord::new(ip(1)).with_counts(0, 1), -1),
        AssetNode::from_record(AssetRecord::new(ip(3)).with_counts(1, 4), 1),
    ];
    let edges = vec![
        AssetEdge::derivative(
            ip(1),
            ip(2),
            EdgeProvenance {
                license_terms_id: Some("7".to_string()),
                block_number: Some(1200),
                ..EdgeProvenance::default()
            },
        ),
        AssetEdge::derivative(ip(2), ip(3), EdgeProvenance::default()),
    ];
    let graph = GraphData::new(nodes, edges);

    GraphResponse {
        root: ip(2),
        stats: GraphStats::from_graph(&graph),
        truncation: TruncationReport::evaluate(&graph, 50, 0),
        graph,
        status: BuildStatus::Complete,
        large_graph: false,
        remix_path: None,
        metadata: BuildMetadata::new(
            "2026-01-01T00:00:00+00:00".to_string(),
            "ip-graph".to_string(),
            "0.1.0".to_string(),
            "urn:uuid:00000000-0000-4000-8000-000000000000".to_string(),
        ),
    }
}
