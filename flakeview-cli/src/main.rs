use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use flakeview_common::FlakeviewConfig;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod serve;

#[derive(Parser)]
#[command(name = "flakeview")]
#[command(about = "Flaky test statistics for CI projects")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CI server base URL, overrides the configuration
    #[arg(long, global = true, env = "FLAKEVIEW_API_URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect flaky tests of a project
    FlakyTests {
        #[command(subcommand)]
        action: flaky_tests::FlakyTestsCommands,
    },
    /// Host the flaky tests dashboard
    Serve(serve::ServeArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    match cli.command {
        Commands::FlakyTests { action } => flaky_tests::handle_command(action, &config).await,
        Commands::Serve(args) => serve::handle_command(args, &config).await,
        Commands::Config { action } => config::handle_command(action, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<FlakeviewConfig> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => FlakeviewConfig::default_path().filter(|p| p.exists()),
    };
    debug!(path = ?path, "Loading configuration");

    FlakeviewConfig::load(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("flakeview={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
