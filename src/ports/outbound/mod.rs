/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (the asset API, console, file system).
pub mod asset_repository;
pub mod edge_repository;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use asset_repository::AssetRepository;
pub use edge_repository::EdgeRepository;
pub use formatter::GraphFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
