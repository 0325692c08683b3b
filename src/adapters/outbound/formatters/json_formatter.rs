use crate::application::dto::GraphResponse;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for the rendering-layer graph document
///
/// Emits `{root, nodes, edges, status, stats, truncation, largeGraph,
/// remixPath?, metadata}` with camelCase keys, the shape graph front ends
/// consume directly.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for JsonFormatter {
    fn format(&self, response: &GraphResponse) -> Result<String> {
        let json = serde_json::to_string_pretty(response)?;
        Ok(json)
    }
}
