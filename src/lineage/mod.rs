/// Lineage domain - IP asset graph model, limits policy and pure graph services
///
/// Nothing in this module performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
