//! Bounded relationship-graph traversal and its per-build edge cache

mod bounded_traversal;
mod edge_cache;

pub use bounded_traversal::{build_graph, BoundedTraversal};
pub use edge_cache::EdgeCache;
