use crate::lineage::domain::{AssetRecord, IpId};
use crate::shared::Result;
use async_trait::async_trait;

/// AssetRepository port for fetching the detail record of an IP asset
///
/// This port abstracts the external data source (e.g., the Story API).
///
/// # Async Support
/// Implementations must be `Send + Sync` so a build can run on any tokio
/// worker thread.
#[async_trait]
pub trait AssetRepository: Send + Sync {
    /// Fetches the detail record for an asset
    ///
    /// # Returns
    /// `Ok(None)` when the data source has no such asset. Not-found is an
    /// ordinary outcome and must not be reported as an error.
    ///
    /// # Errors
    /// Returns an error only for infrastructure failures:
    /// - The network request fails
    /// - The API returns an error status code
    /// - The response cannot be decoded
    async fn get_asset(&self, id: &IpId) -> Result<Option<AssetRecord>>;
}
