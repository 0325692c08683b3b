pub mod generation_calculator;
pub mod graph_assembler;
pub mod graph_stats;
pub mod remix_path;

pub use generation_calculator::GenerationCalculator;
pub use graph_assembler::{AssemblyReport, GraphAssembler};
pub use graph_stats::{GraphStats, TruncationReport};
pub use remix_path::RemixPathFinder;
