use serde::Deserialize;

/// Output format of a rendered graph
///
/// Shared by the CLI, the config file and the formatter factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Graph JSON consumed by visualization front ends (default)
    #[default]
    Json,
    /// Human-readable Markdown report
    #[serde(alias = "md")]
    Markdown,
}

impl OutputFormat {
    /// Names accepted on the command line and in the config file
    pub const ACCEPTED_NAMES: &'static [&'static str] = &["json", "markdown", "md"];
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: '{}'. Expected one of: {}",
                s,
                Self::ACCEPTED_NAMES.join(", ")
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
