mod explore;
mod render;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wayfind_core::{CategoryGroup, Coordinate};

#[derive(Debug, Parser)]
#[command(name = "wayfind")]
#[command(about = "Find places near you from OpenStreetMap")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the place categories
    Categories {
        /// Only show one group (e.g. food, health, `public_services`)
        #[arg(long)]
        group: Option<CategoryGroup>,
    },
    /// Run one search and print the ranked results
    Search {
        /// Category id (see `wayfind categories`)
        #[arg(long, default_value = "restaurant")]
        category: String,
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        query: String,
        /// Search around "lat,lon" instead of the detected position
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinate>,
        /// Print places as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive search: type to filter by name, `:c <id>` to switch category
    Explore {
        /// Initial category id
        #[arg(long, default_value = "restaurant")]
        category: String,
        /// Search around "lat,lon" instead of the detected position
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinate>,
    },
    /// Show the position searches would use
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        at: Option<Coordinate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = wayfind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Categories { group } => search::run_categories(group),
        Commands::Search {
            category,
            query,
            at,
            json,
        } => search::run_search(&config, &category, &query, at, json).await,
        Commands::Explore { category, at } => explore::run_explore(&config, category, at).await,
        Commands::Locate { at } => search::run_locate(&config, at).await,
    }
}
