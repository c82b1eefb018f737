mod menu;
mod related;

use clap::{Parser, Subcommand};

use kwfusion_labs::{Credentials, LabsClient};

#[derive(Debug, Parser)]
#[command(name = "kwfusion-cli")]
#[command(about = "Keyword research from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch related keywords for a seed keyword and render or export them.
    Related(related::RelatedArgs),
    /// List the location and language options the API supports.
    Menu,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Related(args) => related::run_related(&args).await,
        Commands::Menu => menu::run_menu().await,
    }
}

/// Builds a `LabsClient` from env credentials and app config.
///
/// Credentials are checked here, before any network call, so a missing secret
/// fails the command immediately with a configuration error.
pub(crate) fn labs_client(config: &kwfusion_core::AppConfig) -> anyhow::Result<LabsClient> {
    let credentials = Credentials::from_env()?;
    let client =
        LabsClient::with_base_url(credentials, config.request_timeout_secs, &config.labs_base_url)?;
    Ok(client)
}
