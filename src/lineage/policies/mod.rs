pub mod traversal_limits;

pub use traversal_limits::{FetchLimits, TraversalLimits, LARGE_GRAPH_THRESHOLD, MAX_PAGE_SIZE};
