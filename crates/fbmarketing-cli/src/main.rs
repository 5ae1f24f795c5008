//! fbmarketing CLI - Command-line interface for the Facebook Graph API
//!
//! Provides commands for:
//! - OAuth helpers (login URL, app token, code exchange, token inspection)
//! - Listing and calling the endpoint catalog
//! - Managing the configuration file

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    auth::AuthCommand, call::CallCommand, config::ConfigCommand, endpoints::EndpointsCommand,
    CredentialArgs, Session,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "fbmarketing",
    version,
    about = "Facebook Graph and Marketing API client"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// OAuth helpers
    #[command(subcommand)]
    Auth(AuthCommand),
    /// List the endpoint catalog
    Endpoints(EndpointsCommand),
    /// Call a catalog endpoint
    Call(CallCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let session = Session::load(cli.config.as_deref(), cli.credentials.clone());

    // Setup tracing; RUST_LOG wins over -v, which wins over logging.level
    let filter = match cli.verbose {
        0 => session.config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Auth(cmd) => cmd.execute(&session, format).await,
        Commands::Endpoints(cmd) => cmd.execute(format).await,
        Commands::Call(cmd) => cmd.execute(&session, format).await,
        Commands::Config(cmd) => cmd.execute(&session, format).await,
    }
}
