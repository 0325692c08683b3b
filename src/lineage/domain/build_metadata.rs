use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// BuildMetadata value object identifying one graph build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    build_id: String,
}

impl BuildMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String, build_id: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            build_id,
        }
    }

    /// Metadata stamped with the current time and a fresh `urn:uuid:` build id
    pub fn generate(tool_name: &str, tool_version: &str) -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    /// Metadata for this crate, using the compile-time package version
    pub fn generate_default() -> Self {
        Self::generate(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn build_id(&self) -> &str {
        &self.build_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_metadata_new() {
        let metadata = BuildMetadata::new(
            "2026-01-01T00:00:00Z".to_string(),
            "ip-graph".to_string(),
            "0.1.0".to_string(),
            "urn:uuid:12345".to_string(),
        );

        assert_eq!(metadata.timestamp(), "2026-01-01T00:00:00Z");
        assert_eq!(metadata.tool_name(), "ip-graph");
        assert_eq!(metadata.tool_version(), "0.1.0");
        assert_eq!(metadata.build_id(), "urn:uuid:12345");
    }

    #[test]
    fn test_generate_default() {
        let metadata = BuildMetadata::generate_default();

        assert_eq!(metadata.tool_name(), "ip-graph");
        assert_eq!(metadata.tool_version(), env!("CARGO_PKG_VERSION"));
        assert!(metadata.build_id().starts_with("urn:uuid:"));
        assert!(chrono::DateTime::parse_from_rfc3339(metadata.timestamp()).is_ok());
    }

    #[test]
    fn test_generate_unique_build_ids() {
        let a = BuildMetadata::generate("t", "1");
        let b = BuildMetadata::generate("t", "1");
        assert_ne!(a.build_id(), b.build_id());
    }
}
