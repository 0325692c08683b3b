use crate::lineage::domain::{EdgeDirection, EdgeRecord, IpId};
use crate::shared::Result;
use async_trait::async_trait;

/// EdgeRepository port for fetching one page of relationship edges
#[async_trait]
pub trait EdgeRepository: Send + Sync {
    /// Fetches edges to (`Ancestors`) or from (`Descendants`) an asset
    ///
    /// # Arguments
    /// * `id` - The asset whose relationships are listed
    /// * `direction` - Which side of the relationship `id` is on
    /// * `limit` - Maximum number of entries to return
    ///
    /// # Returns
    /// At most `limit` records in the data source's chronological order
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be decoded
    async fn get_edges(
        &self,
        id: &IpId,
        direction: EdgeDirection,
        limit: usize,
    ) -> Result<Vec<EdgeRecord>>;
}
