//! ip-graph - bounded relationship graphs for Story Protocol IP assets
//!
//! This library reconstructs the parent/derivative lineage around a root IP
//! asset from the Story Protocol API, bounded by traversal depth, node count
//! and a wall-clock budget, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`lineage`): Graph model, limits and pure graph services
//! - **Application Layer** (`application`): Traversal engine, use case and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Story API client, console, filesystem, formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use ip_graph::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let client = StoryApiClient::new(None)?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildGraphUseCase::new(client.clone(), client, progress_reporter);
//!
//! // Execute
//! let root = IpId::new("0x1234567890abcdef1234567890abcdef12345678")?;
//! let request = GraphRequest::new(root, TraversalLimits::new(2, 100)?);
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod lineage;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::StoryApiClient;
    pub use crate::application::dto::{BuildStatus, GraphRequest, GraphResponse, OutputFormat};
    pub use crate::application::traversal::{build_graph, BoundedTraversal};
    pub use crate::application::use_cases::BuildGraphUseCase;
    pub use crate::lineage::domain::{
        AssetEdge, AssetNode, AssetRecord, EdgeDirection, EdgeProvenance, EdgeRecord, EdgeType,
        GraphData, IpId, IpMetadata,
    };
    pub use crate::lineage::policies::{FetchLimits, TraversalLimits};
    pub use crate::lineage::services::{
        GenerationCalculator, GraphAssembler, GraphStats, RemixPathFinder, TruncationReport,
    };
    pub use crate::ports::outbound::{
        AssetRepository, EdgeRepository, GraphFormatter, OutputPresenter, ProgressReporter,
    };
    pub use crate::shared::error::GraphError;
    pub use crate::shared::Result;
}
