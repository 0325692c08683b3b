use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::config::CliOverrides;

/// Build a bounded relationship graph around a Story Protocol IP asset
#[derive(Parser, Debug)]
#[command(name = "ip-graph")]
#[command(version)]
#[command(about = "Build a bounded relationship graph around a Story Protocol IP asset", long_about = None)]
pub struct Args {
    /// IP asset id to build the graph around (0x-prefixed 40-digit hex address)
    #[arg(value_name = "IP_ID")]
    pub ip_id: String,

    /// Maximum relationship hops from the root, in either direction [default: 1]
    #[arg(short = 'd', long)]
    pub depth: Option<u32>,

    /// Maximum number of assets in the graph [default: 50]
    #[arg(short = 'n', long)]
    pub max_nodes: Option<usize>,

    /// Wall-clock budget in seconds; a partial graph is returned when it elapses [default: 30]
    #[arg(short = 't', long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (defaults to ./ip-graph.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Story API base url (overrides STORY_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Trace the remix path between the root and this asset
    #[arg(long, value_name = "IP_ID")]
    pub path_to: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Settings given on the command line, highest precedence layer
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_url: self.api_url.clone(),
            max_depth: self.depth,
            max_nodes: self.max_nodes,
            timeout_secs: self.timeout_secs,
            format: self.format,
        }
    }
}
