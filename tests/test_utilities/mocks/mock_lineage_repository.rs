use async_trait::async_trait;
use ip_graph::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Builds a valid IP id from a small number: `0x000...00nn`
pub fn ip(n: u8) -> IpId {
    IpId::new(&format!("0x{:040x}", n)).unwrap()
}

#[derive(Default)]
struct LineageState {
    assets: HashMap<IpId, AssetRecord>,
    /// parent -> child, in chronological order
    edges: Vec<(IpId, IpId)>,
    failing_assets: HashSet<IpId>,
    failing_edges: HashSet<IpId>,
    asset_calls: Vec<IpId>,
    edge_calls: Vec<(IpId, EdgeDirection, usize)>,
}

/// In-memory lineage implementing both lookup ports, with call recording
///
/// Clones share state, so one clone can be handed to a use case while the
/// test keeps another to inspect the calls.
#[derive(Default, Clone)]
pub struct MockLineageRepository {
    state: Arc<Mutex<LineageState>>,
}

impl MockLineageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(ids: &[u8]) -> Self {
        let repo = Self::new();
        for &n in ids {
            repo.add_asset(AssetRecord::new(ip(n)));
        }
        repo
    }

    pub fn add_asset(&self, record: AssetRecord) {
        self.state
            .lock()
            .unwrap()
            .assets
            .insert(record.id.clone(), record);
    }

    pub fn with_edge(self, parent: u8, child: u8) -> Self {
        self.state.lock().unwrap().edges.push((ip(parent), ip(child)));
        self
    }

    pub fn with_failing_asset(self, n: u8) -> Self {
        self.state.lock().unwrap().failing_assets.insert(ip(n));
        self
    }

    pub fn with_failing_edges(self, n: u8) -> Self {
        self.state.lock().unwrap().failing_edges.insert(ip(n));
        self
    }

    pub fn asset_calls(&self) -> Vec<IpId> {
        self.state.lock().unwrap().asset_calls.clone()
    }

    pub fn edge_calls(&self) -> Vec<(IpId, EdgeDirection, usize)> {
        self.state.lock().unwrap().edge_calls.clone()
    }

    /// Edge lookups made for one `(id, direction)` pair
    pub fn edge_calls_for(&self, id: &IpId, direction: EdgeDirection) -> usize {
        self.edge_calls()
            .iter()
            .filter(|(i, d, _)| i == id && *d == direction)
            .count()
    }
}

#[async_trait]
impl AssetRepository for MockLineageRepository {
    async fn get_asset(&self, id: &IpId) -> Result<Option<AssetRecord>> {
        let mut state = self.state.lock().unwrap();
        state.asset_calls.push(id.clone());
        if state.failing_assets.contains(id) {
            anyhow::bail!("Mock asset lookup failure for {}", id);
        }
        Ok(state.assets.get(id).cloned())
    }
}

#[async_trait]
impl EdgeRepository for MockLineageRepository {
    async fn get_edges(
        &self,
        id: &IpId,
        direction: EdgeDirection,
        limit: usize,
    ) -> Result<Vec<EdgeRecord>> {
        let mut state = self.state.lock().unwrap();
        state.edge_calls.push((id.clone(), direction, limit));
        if state.failing_edges.contains(id) {
            anyhow::bail!("Mock edge lookup failure for {}", id);
        }
        Ok(state
            .edges
            .iter()
            .filter_map(|(parent, child)| match direction {
                EdgeDirection::Ancestors if child == id => Some(parent.clone()),
                EdgeDirection::Descendants if parent == id => Some(child.clone()),
                _ => None,
            })
            .take(limit)
            .map(EdgeRecord::new)
            .collect())
    }
}
