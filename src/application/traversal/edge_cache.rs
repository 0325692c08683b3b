use crate::lineage::domain::{EdgeDirection, EdgeRecord, IpId};
use crate::ports::outbound::EdgeRepository;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Cache key for an edge page
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    id: IpId,
    direction: EdgeDirection,
}

impl CacheKey {
    fn new(id: &IpId, direction: EdgeDirection) -> Self {
        Self {
            id: id.clone(),
            direction,
        }
    }
}

/// EdgeCache memoizes edge pages per `(id, direction)` for one build.
///
/// Wraps an `EdgeRepository` decorator-style. The first request for a key
/// goes to the repository; every later request for the same key is served
/// from memory, so a build makes at most one remote call per key. Failed
/// lookups are cached as empty pages and never retried. The page size of the
/// first request for a key wins.
pub struct EdgeCache<'a, R: EdgeRepository + ?Sized> {
    inner: &'a R,
    cache: DashMap<CacheKey, Vec<EdgeRecord>>,
    remote_calls: AtomicUsize,
}

impl<'a, R: EdgeRepository + ?Sized> EdgeCache<'a, R> {
    pub fn new(inner: &'a R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
            remote_calls: AtomicUsize::new(0),
        }
    }

    pub async fn get(&self, id: &IpId, direction: EdgeDirection, limit: usize) -> Vec<EdgeRecord> {
        let key = CacheKey::new(id, direction);

        let cached = self.cache.get(&key).map(|entry| entry.value().clone());
        if let Some(page) = cached {
            tracing::debug!(%id, %direction, "edge cache hit");
            return page;
        }

        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        let page = match self.inner.get_edges(id, direction, limit).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(%id, %direction, error = %e, "Edge lookup failed; treating as empty");
                Vec::new()
            }
        };

        self.cache.insert(key, page.clone());
        page
    }

    /// Number of lookups delegated to the wrapped repository
    pub fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::SeqCst)
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
