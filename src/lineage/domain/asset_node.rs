use super::IpId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive payload of an IP asset. Opaque to the traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, rename = "ipMetadataURI", skip_serializing_if = "Option::is_none")]
    pub ip_metadata_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_metadata_hash: Option<String>,
    #[serde(default, rename = "nftMetadataURI", skip_serializing_if = "Option::is_none")]
    pub nft_metadata_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft_metadata_hash: Option<String>,
}

/// Detail record returned by the asset lookup, before it is placed in a graph
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub id: IpId,
    pub nft_contract: Option<String>,
    pub token_id: Option<String>,
    pub parent_count: u64,
    pub derivative_count: u64,
    pub metadata: Option<IpMetadata>,
    /// License terms attached to the asset
    pub license_terms_ids: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl AssetRecord {
    /// Minimal record with no token reference, metadata or counts
    pub fn new(id: IpId) -> Self {
        Self {
            id,
            nft_contract: None,
            token_id: None,
            parent_count: 0,
            derivative_count: 0,
            metadata: None,
            license_terms_ids: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_counts(mut self, parent_count: u64, derivative_count: u64) -> Self {
        self.parent_count = parent_count;
        self.derivative_count = derivative_count;
        self
    }

    pub fn with_metadata(mut self, metadata: IpMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_license_terms(mut self, license_terms_ids: Vec<String>) -> Self {
        self.license_terms_ids = license_terms_ids;
        self
    }

    /// Total relationships the data source reports for this asset
    pub fn total_relationships(&self) -> u64 {
        self.parent_count + self.derivative_count
    }
}

/// One IP asset as discovered during a traversal
///
/// `generation` is the signed derivative depth relative to the root and is
/// fixed at first visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNode {
    pub id: IpId,
    pub generation: i32,
    pub parent_count: u64,
    pub derivative_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nft_contract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IpMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub license_terms_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AssetNode {
    pub fn from_record(record: AssetRecord, generation: i32) -> Self {
        Self {
            id: record.id,
            generation,
            parent_count: record.parent_count,
            derivative_count: record.derivative_count,
            nft_contract: record.nft_contract,
            token_id: record.token_id,
            metadata: record.metadata,
            license_terms_ids: record.license_terms_ids,
            created_at: record.created_at,
        }
    }

    pub fn is_root(&self) -> bool {
        self.generation == 0
    }

    /// Title from metadata, if any
    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.title.as_deref())
    }

    /// Total relationships the data source reports for this asset
    pub fn total_relationships(&self) -> u64 {
        self.parent_count + self.derivative_count
    }
}
