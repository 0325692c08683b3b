mod mock_lineage_repository;
mod mock_progress_reporter;

pub use mock_lineage_repository::{ip, MockLineageRepository};
pub use mock_progress_reporter::MockProgressReporter;
