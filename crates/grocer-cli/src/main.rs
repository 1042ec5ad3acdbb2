mod find;
mod report;
mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grocer_core::AppConfig;
use grocer_pricing::{ListOutcome, MatchFilter, PriceResolver, UnitTable};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "grocer-cli")]
#[command(about = "Find the cheapest local prices for a grocery list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a grocery list and find the cheapest match for every item
    Find {
        /// Postal or zip code to search flyers for (prompted when absent)
        #[arg(long)]
        postal_code: Option<String>,
        /// Grocery list text (prompted when neither --list nor --file is given)
        #[arg(long, conflicts_with = "file")]
        list: Option<String>,
        /// Read the grocery list from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print results and statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve one item offline against an archived search response
    Resolve {
        /// Archived search response (JSON)
        #[arg(long)]
        candidates: PathBuf,
        /// Item name
        #[arg(long)]
        name: String,
        /// Required brand
        #[arg(long)]
        brand: Option<String>,
        /// Variety, e.g. "2%"
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = grocer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Find {
            postal_code,
            list,
            file,
            json,
        } => {
            find::run_find(
                &config,
                find::FindArgs {
                    postal_code,
                    list,
                    file,
                    json,
                },
            )
            .await
        }
        Commands::Resolve {
            candidates,
            name,
            brand,
            kind,
            quantity,
            category,
            json,
        } => resolve::run_resolve(
            &config,
            resolve::ResolveArgs {
                candidates,
                name,
                brand,
                kind,
                quantity,
                category,
                json,
            },
        ),
    }
}

/// Builds the engine from the configured unit table and matcher.
fn build_resolver(config: &AppConfig) -> anyhow::Result<PriceResolver> {
    let units = match &config.units_path {
        Some(path) => UnitTable::load(path)?,
        None => UnitTable::default(),
    };
    let filter = MatchFilter::from_kind(config.matcher, config.match_threshold);
    tracing::debug!(
        matcher = %config.matcher,
        threshold = config.match_threshold,
        units = units.units().count(),
        "price resolver configured"
    );
    Ok(PriceResolver::new(units, filter)?)
}

/// Prints `outcome` as the text report or as pretty JSON.
fn print_outcome(outcome: &ListOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print!("{}", report::render(outcome));
    }
    Ok(())
}
