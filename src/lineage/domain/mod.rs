pub mod asset_edge;
pub mod asset_node;
pub mod build_metadata;
pub mod direction;
pub mod graph_data;
pub mod ip_id;

pub use asset_edge::{AssetEdge, EdgeProvenance, EdgeRecord, EdgeType};
pub use asset_node::{AssetNode, AssetRecord, IpMetadata};
pub use build_metadata::BuildMetadata;
pub use direction::EdgeDirection;
pub use graph_data::GraphData;
pub use ip_id::IpId;
