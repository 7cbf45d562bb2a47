use clap::{Parser, Subcommand};
use dossier_aggregator::{Aggregator, AggregatorConfig};
use dossier_upstream::GeocodeClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dossier-cli")]
#[command(about = "Property dossier command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build an intelligence dossier for an address and print it as JSON.
    Analyze {
        address: String,
        /// Reject model output that does not match the dossier schema.
        #[arg(long)]
        strict: bool,
    },
    /// Look up address candidates.
    Geocode { query: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}

/// Loads configuration and executes one subcommand. Arguments are parsed
/// before this so `--help` works regardless of the environment.
async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dossier_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze { address, strict } => {
            let mut aggregator_config = AggregatorConfig::from_app_config(&config);
            aggregator_config.strict_schema |= strict;
            let aggregator = Aggregator::new(&aggregator_config)?;
            let dossier = aggregator.analyze(&address).await?;
            println!("{}", serde_json::to_string_pretty(&dossier)?);
        }
        Commands::Geocode { query } => {
            let geocoder = GeocodeClient::with_base_url(
                &config.user_agent,
                &config.geocode_country,
                &config.geocode_base_url,
            )?;
            let candidates = geocoder.search(&query).await?;
            if candidates.is_empty() {
                tracing::info!(query = %query, "no candidates found");
            }
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
    }

    Ok(())
}
