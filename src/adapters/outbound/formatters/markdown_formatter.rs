use crate::application::dto::{BuildStatus, GraphResponse};
use crate::lineage::domain::{AssetNode, IpId};
use crate::lineage::services::GenerationCalculator;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Markdown table header for asset information
const ASSET_TABLE_HEADER: &str = "| IP Asset | Title | Lineage Depth | Parents | Derivatives | Token |\n";

/// Markdown table separator line for asset table
const ASSET_TABLE_SEPARATOR: &str = "|----------|-------|---------------|---------|-------------|-------|\n";

/// Markdown table header for relationship information
const EDGE_TABLE_HEADER: &str = "| Parent | Derivative | Type | License Terms | Block |\n";

/// Markdown table separator line for relationship table
const EDGE_TABLE_SEPARATOR: &str = "|--------|------------|------|---------------|-------|\n";

/// MarkdownFormatter adapter for a human-readable lineage report
///
/// This adapter implements the GraphFormatter port for Markdown format:
/// a summary, limit notices, assets grouped by generation, the relationship
/// table and, when requested, the remix path.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn generation_heading(generation: i32) -> String {
        match generation {
            0 => "Generation 0 (Root)".to_string(),
            g if g < 0 => format!("Generation {} (Ancestors)", g),
            g => format!("Generation +{} (Derivatives)", g),
        }
    }

    fn token_reference(node: &AssetNode) -> String {
        match (&node.nft_contract, &node.token_id) {
            (Some(contract), Some(token_id)) => format!(
                "{} #{}",
                Self::escape_markdown_table_cell(contract),
                Self::escape_markdown_table_cell(token_id)
            ),
            _ => "N/A".to_string(),
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String) {
        output.push_str("# IP Asset Relationship Graph\n\n");
    }

    fn render_summary(&self, output: &mut String, response: &GraphResponse) {
        let root_label = match response.graph.node(&response.root).and_then(|n| n.title()) {
            Some(title) => format!(
                "`{}` ({})",
                response.root,
                Self::escape_markdown_table_cell(title)
            ),
            None => format!("`{}`", response.root),
        };
        let stats = &response.stats;

        output.push_str("## Summary\n\n");
        output.push_str("| Property | Value |\n");
        output.push_str("|----------|-------|\n");
        output.push_str(&format!("| Root | {} |\n", root_label));
        output.push_str(&format!("| Status | {} |\n", response.status));
        output.push_str(&format!("| Assets | {} |\n", stats.total_nodes));
        output.push_str(&format!("| Relationships | {} |\n", stats.total_edges));
        output.push_str(&format!(
            "| Generations | {} to {} |\n",
            stats.min_generation, stats.max_generation
        ));
        output.push_str(&format!(
            "| Built | {} by {} {} |\n",
            response.metadata.timestamp(),
            response.metadata.tool_name(),
            response.metadata.tool_version()
        ));
        output.push('\n');
    }

    /// Renders limit notices; a bounded graph is a successful result
    fn render_notices(&self, output: &mut String, response: &GraphResponse) {
        let mut notices = Vec::new();

        if response.status == BuildStatus::TimedOut {
            notices.push("The build timed out; this graph is the partial result collected so far.".to_string());
        }
        if response.truncation.node_limit_reached {
            notices.push(format!(
                "The node limit was reached at {} assets; more relationships exist beyond this graph.",
                response.stats.total_nodes
            ));
        }
        if response.truncation.unexplored_relationships > 0 {
            notices.push(format!(
                "{} reported relationship(s) are not shown within the configured depth and limits.",
                response.truncation.unexplored_relationships
            ));
        }
        if response.large_graph {
            notices.push(
                "The root asset has a very large number of direct relationships; only a bounded subset is shown."
                    .to_string(),
            );
        }

        for notice in &notices {
            output.push_str(&format!("> ⚠️ {}\n", notice));
        }
        if !notices.is_empty() {
            output.push('\n');
        }
    }

    /// Lineage depth counts derivative hops from the nearest origin asset in
    /// the built graph, independent of the root.
    fn render_assets(&self, output: &mut String, response: &GraphResponse) {
        output.push_str("## Assets by Generation\n\n");

        let lineage_depths =
            GenerationCalculator::calculate(response.graph.nodes(), response.graph.edges());

        let generations: BTreeSet<i32> =
            response.graph.nodes().iter().map(|n| n.generation).collect();

        for generation in generations {
            output.push_str(&format!("### {}\n\n", Self::generation_heading(generation)));
            output.push_str(ASSET_TABLE_HEADER);
            output.push_str(ASSET_TABLE_SEPARATOR);

            for node in response.graph.nodes_at_generation(generation) {
                let lineage_depth = lineage_depths
                    .get(&node.id)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "| `{}` | {} | {} | {} | {} | {} |\n",
                    node.id,
                    Self::escape_markdown_table_cell(node.title().unwrap_or("Untitled")),
                    lineage_depth,
                    node.parent_count,
                    node.derivative_count,
                    Self::token_reference(node)
                ));
            }
            output.push('\n');
        }
    }

    fn render_relationships(&self, output: &mut String, response: &GraphResponse) {
        output.push_str("## Relationships\n\n");

        if response.graph.edges().is_empty() {
            output.push_str("No relationships within the built graph.\n\n");
            return;
        }

        output.push_str(EDGE_TABLE_HEADER);
        output.push_str(EDGE_TABLE_SEPARATOR);
        for edge in response.graph.edges() {
            let block = edge
                .provenance
                .block_number
                .map(|b| b.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            output.push_str(&format!(
                "| `{}` | `{}` | {} | {} | {} |\n",
                edge.source.short(),
                edge.target.short(),
                edge.edge_type.as_str(),
                Self::escape_markdown_table_cell(
                    edge.provenance.license_terms_id.as_deref().unwrap_or("N/A")
                ),
                block
            ));
        }
        output.push('\n');
    }

    fn render_remix_path(&self, output: &mut String, path: &[IpId]) {
        output.push_str("## Remix Path\n\n");
        let hops: Vec<String> = path.iter().map(|id| format!("`{}`", id.short())).collect();
        output.push_str(&hops.join(" → "));
        output.push_str("\n\n");
    }
}

impl GraphFormatter for MarkdownFormatter {
    fn format(&self, response: &GraphResponse) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output);
        self.render_summary(&mut output, response);
        self.render_notices(&mut output, response);
        self.render_assets(&mut output, response);
        self.render_relationships(&mut output, response);
        if let Some(path) = &response.remix_path {
            self.render_remix_path(&mut output, path);
        }

        Ok(output)
    }
}
