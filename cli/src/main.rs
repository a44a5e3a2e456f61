//! Foundation CLI - read environment, configuration and variables from the
//! Foundation API

mod commands;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use foundation_core::{ApiClient, ClientConfig, UreqTransport};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "foundation", author, version, about = "CLI for the Foundation API", long_about = None)]
struct Cli {
    /// The api-key to make requests with
    #[arg(long = "api-key", visible_alias = "key", env = "FOUNDATION_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the Foundation API
    #[arg(long, env = "FOUNDATION_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Gets the environment
    #[command(visible_alias = "env")]
    Environment,
    /// Gets the configuration
    #[command(visible_alias = "config")]
    Configuration,
    /// Gets a specific variable
    Variable {
        /// The name of the variable
        #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
        name: String,
        /// The unique identifier of a user/entity
        #[arg(long)]
        uid: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .init();
}

fn build_client(cli: &Cli) -> Result<ApiClient<UreqTransport>> {
    let mut config = ClientConfig::new(&cli.api_key)
        .with_default_header("user-agent", concat!("foundation-cli/", env!("CARGO_PKG_VERSION")));
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url).context("invalid --api-url")?;
    }
    Ok(ApiClient::new(config, UreqTransport::new()))
}

fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Command::Environment => commands::environment(&client, &mut stdout),
        Command::Configuration => commands::configuration(&client, &mut stdout),
        Command::Variable { name, uid } => commands::variable(&client, name, uid.as_deref(), &mut stdout),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
