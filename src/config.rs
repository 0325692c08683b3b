//! Configuration file support for ip-graph.
//!
//! Provides YAML-based configuration through `ip-graph.config.yml` files,
//! environment overrides, and resolution of the effective build settings.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::adapters::outbound::network::DEFAULT_API_URL;
use crate::application::dto::{OutputFormat, DEFAULT_TIMEOUT_SECS};
use crate::lineage::policies::{FetchLimits, TraversalLimits, MAX_PAGE_SIZE};
use crate::shared::error::GraphError;
use crate::shared::security::{validate_api_url, validate_config_file};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "ip-graph.config.yml";

/// Environment variable overriding the API endpoint
pub const API_URL_ENV: &str = "STORY_API_URL";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "STORY_API_KEY";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub max_depth: Option<u32>,
    pub max_nodes: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub root_fetch_limit: Option<usize>,
    pub branch_fetch_limit: Option<usize>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_config_file(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists, is a regular file and is readable.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if std::fs::symlink_metadata(&config_path).is_err() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_nodes == Some(0) {
        bail!(
            "Invalid config: max_nodes must be at least 1.\n\n\
             💡 Hint: Use a positive node budget (default: {}).",
            TraversalLimits::DEFAULT_MAX_NODES
        );
    }
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be at least 1.\n\n\
             💡 Hint: Use a positive number of seconds (default: {}).",
            DEFAULT_TIMEOUT_SECS
        );
    }
    for (field, value) in [
        ("root_fetch_limit", config.root_fetch_limit),
        ("branch_fetch_limit", config.branch_fetch_limit),
    ] {
        if let Some(limit) = value {
            if limit == 0 || limit > MAX_PAGE_SIZE {
                bail!(
                    "Invalid config: {} must be between 1 and {} (got {}).\n\n\
                     💡 Hint: The API returns at most {} relationships per request.",
                    field,
                    MAX_PAGE_SIZE,
                    limit,
                    MAX_PAGE_SIZE
                );
            }
        }
    }
    if let Some(ref url) = config.api_url {
        validate_api_url(url).with_context(|| {
            format!(
                "Invalid config: api_url '{}' is not a valid endpoint.\n\n\
                 💡 Hint: Use an http(s) URL such as {}",
                url, DEFAULT_API_URL
            )
        })?;
    }
    if let Some(ref format) = config.format {
        if let Err(e) = OutputFormat::from_str(format) {
            bail!("Invalid config: {}", e);
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

impl EnvSettings {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_url: read(API_URL_ENV),
            api_key: read(API_KEY_ENV),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub max_depth: Option<u32>,
    pub max_nodes: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
}

/// Effective settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub limits: TraversalLimits,
    pub fetch_limits: FetchLimits,
    pub timeout: Duration,
    pub format: OutputFormat,
}

impl Settings {
    /// Merges the layers with precedence CLI > environment > config file > defaults
    pub fn resolve(
        cli: &CliOverrides,
        env: &EnvSettings,
        file: Option<&ConfigFile>,
    ) -> Result<Self> {
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| env.api_url.clone())
            .or_else(|| file.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_api_url(&api_url).map_err(|e| GraphError::Validation {
            message: format!("API url '{}' is invalid: {}", api_url, e),
        })?;

        let limits = TraversalLimits::new(
            cli.max_depth
                .or(file.max_depth)
                .unwrap_or(TraversalLimits::DEFAULT_MAX_DEPTH),
            cli.max_nodes
                .or(file.max_nodes)
                .unwrap_or(TraversalLimits::DEFAULT_MAX_NODES),
        )?;

        let fetch_limits = FetchLimits::new(
            file.root_fetch_limit.unwrap_or(FetchLimits::DEFAULT_ROOT),
            file.branch_fetch_limit.unwrap_or(FetchLimits::DEFAULT_BRANCH),
        )?;

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(GraphError::Validation {
                message: "Timeout must be at least 1 second".to_string(),
            }
            .into());
        }

        let format = match (cli.format, file.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(raw)) => OutputFormat::from_str(raw)
                .map_err(|message| GraphError::Validation { message })?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Self {
            api_url,
            api_key: env.api_key.clone().or_else(|| file.api_key.clone()),
            limits,
            fetch_limits,
            timeout: Duration::from_secs(timeout_secs),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
api_url: https://api.example.com/api/v4
api_key: secret
max_depth: 3
max_nodes: 120
timeout_secs: 45
root_fetch_limit: 50
branch_fetch_limit: 10
format: markdown
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com/api/v4"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.max_nodes, Some(120));
        assert_eq!(config.timeout_secs, Some(45));
        assert_eq!(config.root_fetch_limit, Some(50));
        assert_eq!(config.branch_fetch_limit, Some(10));
        assert_eq!(config.format.as_deref(), Some("markdown"));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "max_depth: 2\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.max_depth, Some(2));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/ip-graph.config.yml"));
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "max_depth: [unclosed\n");

        let err = format!("{:#}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_config_wrong_type() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "max_depth: deep\n");

        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_unknown_fields_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "max_depth: 1\ncolour: blue\n");

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.unknown_fields.contains_key("colour"));
    }

    #[test]
    fn test_validate_rejects_zero_max_nodes() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "max_nodes: 0\n");

        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("max_nodes must be at least 1"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "timeout_secs: 0\n");

        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("timeout_secs must be at least 1"));
    }

    #[test]
    fn test_validate_rejects_oversized_fetch_limit() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "branch_fetch_limit: 500\n");

        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("branch_fetch_limit must be between 1 and 200"));
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "api_url: ftp://example.com\n");

        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("api_url"));
    }

    #[test]
    fn test_validate_rejects_bad_format() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "format: xml\n");

        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("Invalid format"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings =
            Settings::resolve(&CliOverrides::default(), &EnvSettings::default(), None).unwrap();

        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.api_key, None);
        assert_eq!(settings.limits, TraversalLimits::default());
        assert_eq!(settings.fetch_limits, FetchLimits::default());
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_precedence() {
        let file = ConfigFile {
            api_url: Some("https://file.example.com".to_string()),
            api_key: Some("file-key".to_string()),
            max_depth: Some(2),
            max_nodes: Some(80),
            timeout_secs: Some(60),
            format: Some("markdown".to_string()),
            ..ConfigFile::default()
        };
        let env = EnvSettings {
            api_url: Some("https://env.example.com".to_string()),
            api_key: Some("env-key".to_string()),
        };
        let cli = CliOverrides {
            max_depth: Some(4),
            ..CliOverrides::default()
        };

        let settings = Settings::resolve(&cli, &env, Some(&file)).unwrap();

        assert_eq!(settings.api_url, "https://env.example.com");
        assert_eq!(settings.api_key.as_deref(), Some("env-key"));
        assert_eq!(settings.limits.max_depth(), 4);
        assert_eq!(settings.limits.max_nodes(), 80);
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(settings.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_resolve_cli_api_url_wins() {
        let env = EnvSettings {
            api_url: Some("https://env.example.com".to_string()),
            api_key: None,
        };
        let cli = CliOverrides {
            api_url: Some("http://localhost:8080/api".to_string()),
            format: Some(OutputFormat::Json),
            ..CliOverrides::default()
        };

        let settings = Settings::resolve(&cli, &env, None).unwrap();
        assert_eq!(settings.api_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_resolve_fetch_limits_from_file() {
        let file = ConfigFile {
            root_fetch_limit: Some(40),
            branch_fetch_limit: Some(8),
            ..ConfigFile::default()
        };

        let settings =
            Settings::resolve(&CliOverrides::default(), &EnvSettings::default(), Some(&file))
                .unwrap();

        assert_eq!(settings.fetch_limits.page_size(0), 40);
        assert_eq!(settings.fetch_limits.page_size(2), 8);
    }

    #[test]
    fn test_resolve_rejects_invalid_cli_values() {
        let zero_nodes = CliOverrides {
            max_nodes: Some(0),
            ..CliOverrides::default()
        };
        assert!(Settings::resolve(&zero_nodes, &EnvSettings::default(), None).is_err());

        let zero_timeout = CliOverrides {
            timeout_secs: Some(0),
            ..CliOverrides::default()
        };
        assert!(Settings::resolve(&zero_timeout, &EnvSettings::default(), None).is_err());

        let bad_url = CliOverrides {
            api_url: Some("not a url".to_string()),
            ..CliOverrides::default()
        };
        assert!(Settings::resolve(&bad_url, &EnvSettings::default(), None).is_err());
    }
}
