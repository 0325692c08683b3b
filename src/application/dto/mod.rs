/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the lineage domain isolated.
mod graph_request;
mod graph_response;
mod output_format;

pub use graph_request::{GraphRequest, DEFAULT_TIMEOUT_SECS};
pub use graph_response::{BuildStatus, GraphResponse};
pub use output_format::OutputFormat;
