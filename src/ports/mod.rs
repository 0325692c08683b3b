/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports only: the graph builder is driven directly through
/// its use case.
pub mod outbound;
