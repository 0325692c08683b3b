use super::IpId;
use serde::{Deserialize, Serialize, Serializer};

/// Kind of relationship between two assets
///
/// Only `Derivative` edges are produced by the traversal; the other kinds are
/// carried as opaque payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Derivative,
    License,
    Royalty,
}

impl EdgeType {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::Derivative => "derivative",
            EdgeType::License => "license",
            EdgeType::Royalty => "royalty",
        }
    }
}

/// Provenance of a relationship, carried through unmodified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeProvenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_terms_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// One entry of an edge page: the asset on the other end of a relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub counterpart: IpId,
    pub provenance: EdgeProvenance,
}

impl EdgeRecord {
    pub fn new(counterpart: IpId) -> Self {
        Self {
            counterpart,
            provenance: EdgeProvenance::default(),
        }
    }

    pub fn with_provenance(mut self, provenance: EdgeProvenance) -> Self {
        self.provenance = provenance;
        self
    }
}

/// Directed relationship; `source` is the parent side, `target` the derivative
///
/// Serialized with its element id (`id`) for the rendering layer; the id is
/// derived and ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetEdge {
    pub source: IpId,
    pub target: IpId,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    #[serde(flatten)]
    pub provenance: EdgeProvenance,
}

impl AssetEdge {
    pub fn derivative(source: IpId, target: IpId, provenance: EdgeProvenance) -> Self {
        Self {
            source,
            target,
            edge_type: EdgeType::Derivative,
            provenance,
        }
    }

    /// Identity used for de-duplication: the same relationship is reported by
    /// both of its endpoints.
    pub fn key(&self) -> (IpId, IpId, EdgeType) {
        (self.source.clone(), self.target.clone(), self.edge_type)
    }

    /// Rendering-layer element id: `source-target`
    pub fn element_id(&self) -> String {
        format!("{}-{}", self.source, self.target)
    }

    pub fn touches(&self, id: &IpId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// Wire form of an edge
#[derive(Serialize)]
struct AssetEdgeJson<'a> {
    id: String,
    source: &'a IpId,
    target: &'a IpId,
    #[serde(rename = "type")]
    edge_type: EdgeType,
    #[serde(flatten)]
    provenance: &'a EdgeProvenance,
}

impl Serialize for AssetEdge {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        AssetEdgeJson {
            id: self.element_id(),
            source: &self.source,
            target: &self.target,
            edge_type: self.edge_type,
            provenance: &self.provenance,
        }
        .serialize(serializer)
    }
}
