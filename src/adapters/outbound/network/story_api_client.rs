use crate::lineage::domain::{
    AssetRecord, EdgeDirection, EdgeProvenance, EdgeRecord, IpId, IpMetadata,
};
use crate::lineage::policies::MAX_PAGE_SIZE;
use crate::ports::outbound::{AssetRepository, EdgeRepository};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Public Story Protocol API endpoint
pub const DEFAULT_API_URL: &str = "https://api.storyapis.com/api/v4";

/// Gateway used to resolve `ipfs://` metadata URIs
const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const METADATA_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    data: Vec<T>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAsset {
    #[serde(default)]
    token_contract: Option<String>,
    #[serde(default)]
    token_id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    owner_address: Option<String>,
    #[serde(default)]
    ipa_metadata_uri: Option<String>,
    #[serde(default)]
    nft_metadata: Option<ApiNftMetadata>,
    #[serde(default, deserialize_with = "null_as_empty")]
    licenses: Vec<ApiLicense>,
    #[serde(default)]
    parents_count: Option<u64>,
    #[serde(default)]
    children_count: Option<u64>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiNftMetadata {
    #[serde(default)]
    image: Option<ApiImage>,
    #[serde(default)]
    token_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiImage {
    #[serde(default)]
    cached_url: Option<String>,
    #[serde(default)]
    original_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLicense {
    #[serde(default)]
    license_terms_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEdge {
    #[serde(default)]
    parent_ip_id: Option<String>,
    #[serde(default)]
    child_ip_id: Option<String>,
    #[serde(default)]
    license_terms_id: Option<Value>,
    #[serde(default)]
    license_token_id: Option<Value>,
    #[serde(default)]
    license_template: Option<String>,
    #[serde(default)]
    block_number: Option<Value>,
    #[serde(default)]
    tx_hash: Option<String>,
}

#[derive(Debug, Serialize)]
struct Pagination {
    limit: usize,
    offset: usize,
}

/// Renders ids and block numbers that the API sends either as strings or numbers
fn scalar_to_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_to_u64(value: Option<Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Resolves `ipfs://` URIs through the public gateway
fn resolve_metadata_url(uri: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(cid) => format!("{}{}", IPFS_GATEWAY, cid),
        None => uri.to_string(),
    }
}

impl ApiAsset {
    fn image_url(&self) -> Option<String> {
        let image = self.nft_metadata.as_ref()?.image.as_ref()?;
        image.cached_url.clone().or_else(|| image.original_url.clone())
    }

    /// Metadata assembled from the asset record alone
    fn record_metadata(&self) -> IpMetadata {
        IpMetadata {
            title: self.title.clone().or_else(|| self.name.clone()),
            description: self.description.clone(),
            image_url: self.image_url(),
            creator: self.owner_address.clone(),
            ip_metadata_uri: self.ipa_metadata_uri.clone(),
            nft_metadata_uri: self
                .nft_metadata
                .as_ref()
                .and_then(|m| m.token_uri.clone()),
            ..IpMetadata::default()
        }
    }

    fn license_terms_ids(&self) -> Vec<String> {
        self.licenses
            .iter()
            .filter_map(|license| scalar_to_string(license.license_terms_id.clone()))
            .collect()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

impl ApiEdge {
    fn into_record(self, direction: EdgeDirection) -> Option<EdgeRecord> {
        let counterpart = match direction {
            EdgeDirection::Ancestors => self.parent_ip_id.as_deref(),
            EdgeDirection::Descendants => self.child_ip_id.as_deref(),
        };
        let counterpart = match counterpart.map(IpId::new) {
            Some(Ok(id)) => id,
            Some(Err(e)) => {
                tracing::warn!(%direction, error = %e, "Skipping edge with malformed counterpart id");
                return None;
            }
            None => {
                tracing::warn!(%direction, "Skipping edge without counterpart id");
                return None;
            }
        };

        Some(EdgeRecord::new(counterpart).with_provenance(EdgeProvenance {
            license_terms_id: scalar_to_string(self.license_terms_id),
            license_token_id: scalar_to_string(self.license_token_id),
            license_template: self.license_template,
            block_number: scalar_to_u64(self.block_number),
            tx_hash: self.tx_hash,
        }))
    }
}

/// StoryApiClient adapter for the Story Protocol REST API
///
/// This adapter implements both the AssetRepository and EdgeRepository
/// ports. Each request is retried with a linear backoff before the error is
/// handed to the caller; the traversal then treats the lookup as empty.
#[derive(Clone)]
pub struct StoryApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    max_retries: u32,
}

impl StoryApiClient {
    /// Creates a client for the public API endpoint
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL, api_key)
    }

    /// Creates a client for a custom endpoint (self-hosted API, test server)
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("ip-graph/{}", version);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            max_retries: 3,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts a JSON query with retry logic
    async fn post_with_retry<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let mut attempt = 1;
        loop {
            match self.post(path, body).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt < self.max_retries => {
                    tracing::debug!(path, attempt, error = %e, "Story API request failed; retrying");
                    // Retry after a short wait (async)
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Story API returned status code {} for {}", response.status(), path);
        }

        Ok(response.json().await?)
    }

    /// Fetches the off-chain metadata document behind `uri`
    async fn fetch_metadata_document(&self, uri: &str) -> Result<IpMetadata> {
        let url = resolve_metadata_url(uri);
        let response = self
            .client
            .get(&url)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Metadata host returned status code {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Metadata for an asset: the fetched document merged with the image and
    /// owner from the asset record, or the record alone when the document is
    /// unavailable.
    async fn resolve_metadata(&self, asset: &ApiAsset) -> IpMetadata {
        let fallback = asset.record_metadata();
        let Some(uri) = asset.ipa_metadata_uri.as_deref() else {
            return fallback;
        };

        match self.fetch_metadata_document(uri).await {
            Ok(mut document) => {
                document.image_url = fallback.image_url.or(document.image_url);
                document.creator = fallback.creator.or(document.creator);
                document.ip_metadata_uri = document.ip_metadata_uri.or(fallback.ip_metadata_uri);
                document.title = document.title.or(fallback.title);
                document
            }
            Err(e) => {
                tracing::warn!(uri, error = %e, "Metadata fetch failed; using asset record");
                fallback
            }
        }
    }
}

#[async_trait]
impl AssetRepository for StoryApiClient {
    async fn get_asset(&self, id: &IpId) -> Result<Option<AssetRecord>> {
        let body = json!({
            "where": { "ipIds": [id.as_str()] },
            "pagination": Pagination { limit: 1, offset: 0 },
            "includeLicenses": true,
        });

        let envelope: DataEnvelope<ApiAsset> = self.post_with_retry("/assets", &body).await?;
        let Some(asset) = envelope.data.into_iter().next() else {
            return Ok(None);
        };

        let metadata = self.resolve_metadata(&asset).await;
        let mut record = AssetRecord::new(id.clone())
            .with_counts(
                asset.parents_count.unwrap_or(0),
                asset.children_count.unwrap_or(0),
            )
            .with_metadata(metadata)
            .with_license_terms(asset.license_terms_ids());
        record.created_at = asset.created_at();
        record.token_id = scalar_to_string(asset.token_id);
        record.nft_contract = asset.token_contract;

        Ok(Some(record))
    }
}

#[async_trait]
impl EdgeRepository for StoryApiClient {
    async fn get_edges(
        &self,
        id: &IpId,
        direction: EdgeDirection,
        limit: usize,
    ) -> Result<Vec<EdgeRecord>> {
        let filter = match direction {
            EdgeDirection::Ancestors => json!({ "childIpId": id.as_str() }),
            EdgeDirection::Descendants => json!({ "parentIpId": id.as_str() }),
        };
        let limit = limit.min(MAX_PAGE_SIZE);
        let body = json!({
            "where": filter,
            "pagination": Pagination { limit, offset: 0 },
            "orderBy": "blockNumber",
            "orderDirection": "asc",
        });

        let envelope: DataEnvelope<ApiEdge> = self.post_with_retry("/assets/edges", &body).await?;
        Ok(envelope
            .data
            .into_iter()
            .filter_map(|edge| edge.into_record(direction))
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ROOT: &str = "0x1234567890abcdef1234567890abcdef12345678";
    const PARENT: &str = "0x00000000000000000000000000000000000000aa";
    const CHILD: &str = "0x00000000000000000000000000000000000000bb";

    fn root() -> IpId {
        IpId::new(ROOT).unwrap()
    }

    fn client(server: &MockServer) -> StoryApiClient {
        StoryApiClient::with_base_url(server.uri(), Some("test-api-key".to_string())).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = StoryApiClient::new(None).unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = StoryApiClient::with_base_url("http://localhost:9/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/api");
    }

    #[test]
    fn test_resolve_metadata_url() {
        assert_eq!(
            resolve_metadata_url("ipfs://bafyabc/meta.json"),
            "https://ipfs.io/ipfs/bafyabc/meta.json"
        );
        assert_eq!(
            resolve_metadata_url("https://example.com/meta.json"),
            "https://example.com/meta.json"
        );
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(scalar_to_string(Some(json!("7"))), Some("7".to_string()));
        assert_eq!(scalar_to_string(Some(json!(7))), Some("7".to_string()));
        assert_eq!(scalar_to_string(Some(Value::Null)), None);
        assert_eq!(scalar_to_u64(Some(json!("1200"))), Some(1200));
        assert_eq!(scalar_to_u64(Some(json!(1200))), Some(1200));
        assert_eq!(scalar_to_u64(None), None);
    }

    #[test]
    fn test_data_envelope_tolerates_missing_and_null_data() {
        let missing: DataEnvelope<ApiEdge> = serde_json::from_value(json!({})).unwrap();
        let null: DataEnvelope<ApiEdge> = serde_json::from_value(json!({ "data": null })).unwrap();
        let edges: DataEnvelope<ApiEdge> = serde_json::from_value(json!({
            "data": [{ "parentIpId": ROOT, "childIpId": CHILD }]
        }))
        .unwrap();

        assert!(missing.data.is_empty());
        assert!(null.data.is_empty());
        assert_eq!(edges.data.len(), 1);
        assert_eq!(edges.data[0].child_ip_id.as_deref(), Some(CHILD));
    }

    #[test]
    fn test_asset_without_licenses_has_no_terms() {
        let asset: ApiAsset = serde_json::from_value(json!({ "ipId": ROOT, "licenses": null })).unwrap();
        assert!(asset.license_terms_ids().is_empty());
    }

    #[tokio::test]
    async fn test_get_asset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets"))
            .and(header("X-Api-Key", "test-api-key"))
            .and(body_partial_json(json!({
                "where": { "ipIds": [ROOT] },
                "pagination": { "limit": 1, "offset": 0 },
                "includeLicenses": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "ipId": ROOT,
                    "tokenContract": "0xcontract",
                    "tokenId": 42,
                    "name": "Root Song",
                    "description": "Original work",
                    "ownerAddress": "0xowner",
                    "nftMetadata": {
                        "image": { "cachedUrl": null, "originalUrl": "https://img/1.png" },
                        "tokenUri": "https://nft/1.json"
                    },
                    "licenses": [
                        { "licenseTermsId": "1", "licenseTemplate": "0xpil" },
                        { "licenseTermsId": 27 }
                    ],
                    "parentsCount": 2,
                    "childrenCount": 5,
                    "createdAt": "2025-03-01T12:00:00Z"
                }]
            })))
            .mount(&mock_server)
            .await;

        let record = client(&mock_server).get_asset(&root()).await.unwrap().unwrap();

        assert_eq!(record.id, root());
        assert_eq!(record.parent_count, 2);
        assert_eq!(record.derivative_count, 5);
        assert_eq!(record.nft_contract.as_deref(), Some("0xcontract"));
        assert_eq!(record.token_id.as_deref(), Some("42"));
        assert!(record.created_at.is_some());
        assert_eq!(record.license_terms_ids, vec!["1", "27"]);
        let metadata = record.metadata.unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Root Song"));
        assert_eq!(metadata.image_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(metadata.creator.as_deref(), Some("0xowner"));
        assert_eq!(metadata.nft_metadata_uri.as_deref(), Some("https://nft/1.json"));
    }

    #[tokio::test]
    async fn test_get_asset_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).get_asset(&root()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_asset_null_data_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).get_asset(&root()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_asset_merges_metadata_document() {
        let mock_server = MockServer::start().await;
        let metadata_uri = format!("{}/metadata/1.json", mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "ipId": ROOT,
                    "title": "Record title",
                    "ownerAddress": "0xowner",
                    "ipaMetadataUri": metadata_uri,
                    "nftMetadata": { "image": { "cachedUrl": "https://cache/1.png" } }
                }]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/metadata/1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Document title",
                "description": "From IPFS",
                "ipMetadataHash": "0xhash"
            })))
            .mount(&mock_server)
            .await;

        let record = client(&mock_server).get_asset(&root()).await.unwrap().unwrap();

        let metadata = record.metadata.unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Document title"));
        assert_eq!(metadata.description.as_deref(), Some("From IPFS"));
        assert_eq!(metadata.ip_metadata_hash.as_deref(), Some("0xhash"));
        assert_eq!(metadata.image_url.as_deref(), Some("https://cache/1.png"));
        assert_eq!(metadata.creator.as_deref(), Some("0xowner"));
        assert_eq!(metadata.ip_metadata_uri.as_deref(), Some(metadata_uri.as_str()));
    }

    #[tokio::test]
    async fn test_get_asset_metadata_failure_falls_back_to_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "ipId": ROOT,
                    "title": "Record title",
                    "ipaMetadataUri": format!("{}/missing.json", mock_server.uri())
                }]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let record = client(&mock_server).get_asset(&root()).await.unwrap().unwrap();

        assert_eq!(record.metadata.unwrap().title.as_deref(), Some("Record title"));
    }

    #[tokio::test]
    async fn test_get_edges_ancestors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets/edges"))
            .and(body_partial_json(json!({
                "where": { "childIpId": ROOT },
                "pagination": { "limit": 5, "offset": 0 },
                "orderBy": "blockNumber",
                "orderDirection": "asc"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{
                    "parentIpId": PARENT,
                    "childIpId": ROOT,
                    "licenseTermsId": "7",
                    "licenseTokenId": 99,
                    "licenseTemplate": "0xtemplate",
                    "blockNumber": "1200",
                    "txHash": "0xtx"
                }]
            })))
            .mount(&mock_server)
            .await;

        let edges = client(&mock_server)
            .get_edges(&root(), EdgeDirection::Ancestors, 5)
            .await
            .unwrap();

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].counterpart, IpId::new(PARENT).unwrap());
        let provenance = &edges[0].provenance;
        assert_eq!(provenance.license_terms_id.as_deref(), Some("7"));
        assert_eq!(provenance.license_token_id.as_deref(), Some("99"));
        assert_eq!(provenance.license_template.as_deref(), Some("0xtemplate"));
        assert_eq!(provenance.block_number, Some(1200));
        assert_eq!(provenance.tx_hash.as_deref(), Some("0xtx"));
    }

    #[tokio::test]
    async fn test_get_edges_descendants_caps_page_size() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets/edges"))
            .and(body_partial_json(json!({
                "where": { "parentIpId": ROOT },
                "pagination": { "limit": 200, "offset": 0 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "parentIpId": ROOT, "childIpId": CHILD },
                    { "parentIpId": ROOT, "childIpId": "not-an-address" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let edges = client(&mock_server)
            .get_edges(&root(), EdgeDirection::Descendants, 1000)
            .await
            .unwrap();

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].counterpart, IpId::new(CHILD).unwrap());
    }

    #[tokio::test]
    async fn test_retries_transient_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets/edges"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/assets/edges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "parentIpId": ROOT, "childIpId": CHILD }]
            })))
            .mount(&mock_server)
            .await;

        let edges = client(&mock_server)
            .get_edges(&root(), EdgeDirection::Descendants, 20)
            .await
            .unwrap();

        assert_eq!(edges.len(), 1);
    }

    #[tokio::test]
    async fn test_persistent_failure_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/assets"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).get_asset(&root()).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_api_key_omitted_when_blank() {
        let mock_server = MockServer::start().await;
        let client = StoryApiClient::with_base_url(mock_server.uri(), Some("  ".to_string())).unwrap();

        Mock::given(method("POST"))
            .and(path("/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&mock_server)
            .await;

        assert!(client.get_asset(&root()).await.unwrap().is_none());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("x-api-key"));
    }
}
