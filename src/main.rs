use ip_graph::adapters::outbound::console::StderrProgressReporter;
use ip_graph::adapters::outbound::network::StoryApiClient;
use ip_graph::application::dto::GraphRequest;
use ip_graph::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use ip_graph::application::use_cases::BuildGraphUseCase;
use ip_graph::cli::Args;
use ip_graph::config::{self, ConfigFile, EnvSettings, Settings};
use ip_graph::lineage::domain::IpId;
use ip_graph::shared::error::ExitCode;
use ip_graph::shared::Result;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics filter used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
    init_tracing();

    // clap exits with code 2 on invalid arguments and 0 for --help/--version
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        report_error(&e);
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report_error(e: &anyhow::Error) {
    if std::io::stderr().is_terminal() {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
    } else {
        eprintln!("\n❌ An error occurred:\n");
    }
    eprintln!("{}", e);

    // Display error chain
    for cause in e.chain().skip(1) {
        eprintln!("\nCaused by: {}", cause);
    }

    eprintln!();
}

async fn run(args: Args) -> Result<()> {
    // Validate ids before any network access
    let root = IpId::new(&args.ip_id)?;
    let path_target = args.path_to.as_deref().map(IpId::new).transpose()?;

    // Resolve settings: CLI > environment > config file > defaults
    let config_file = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(
        &args.overrides(),
        &EnvSettings::from_env(),
        config_file.as_ref(),
    )?;
    tracing::debug!(
        limits = ?settings.limits,
        fetch_limits = ?settings.fetch_limits,
        api_url = %settings.api_url,
        "resolved settings"
    );

    // Create adapters (Dependency Injection)
    let client = StoryApiClient::with_base_url(settings.api_url.clone(), settings.api_key.clone())?;
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = BuildGraphUseCase::new(client.clone(), client, progress_reporter);

    // Create request
    let request = GraphRequest::new(root, settings.limits)
        .with_fetch_limits(settings.fetch_limits)
        .with_timeout(settings.timeout)
        .with_path_target(path_target);

    // Execute use case
    let response = use_case.execute(request).await?;

    // Display progress message
    eprintln!("{}", FormatterFactory::progress_message(settings.format));

    // Create formatter using factory
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&response)?;

    // Present output
    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatted_output)?;

    Ok(())
}

/// Explicit `--config` path, else `ip-graph.config.yml` in the current directory
fn load_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => config::discover_config(Path::new(".")),
    }
}
