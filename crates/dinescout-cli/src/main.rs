mod detail;
mod list;
mod regions;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dinescout_cache::{FileStore, ResultCache};
use dinescout_core::{AppConfig, CategoryFilter, PresetRegions, SortOrder};
use dinescout_places::{Explorer, PlacesProvider, RandomRating};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dinescout")]
#[command(about = "Browse restaurants, cafés and bars around Paris and beyond")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the preset regions
    Regions,
    /// List venues in a region
    List {
        /// Preset region name (e.g. Paris, Versailles)
        #[arg(long, conflicts_with = "search_city")]
        city: Option<String>,
        /// Free-text city to geocode instead of a preset
        #[arg(long)]
        search_city: Option<String>,
        /// Case-insensitive name filter
        #[arg(long, short = 'q', default_value = "")]
        query: String,
        /// Category filter: all, restaurant, cafe, fast_food, bar, other
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Rating order: desc or asc
        #[arg(long, default_value = "desc")]
        sort: SortOrder,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print each venue's illustration URL under its row
        #[arg(long)]
        images: bool,
    },
    /// Show the detail record of one venue
    Detail {
        /// Provider identifier of the venue
        id: String,
    },
}

type CliExplorer = Explorer<PlacesProvider, FileStore>;

fn load_presets(config: &AppConfig) -> anyhow::Result<PresetRegions> {
    let presets = match &config.regions_path {
        Some(path) => PresetRegions::load_yaml(path)?,
        None => PresetRegions::builtin(),
    };
    Ok(presets.with_default(&config.default_region)?)
}

fn build_explorer(config: &AppConfig, presets: PresetRegions) -> anyhow::Result<CliExplorer> {
    let provider = PlacesProvider::from_config(config, Arc::new(RandomRating))?;
    let store = FileStore::open(config.cache_dir.clone())?;
    let cache = ResultCache::with_ttl_secs(store, config.cache_ttl_secs);
    tracing::debug!(
        provider = %provider.kind(),
        cache_dir = %config.cache_dir.display(),
        "explorer ready"
    );
    Ok(Explorer::new(provider, cache, presets))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = dinescout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let presets = load_presets(&config)?;

    match cli.command {
        Commands::Regions => regions::run_regions(&presets),
        Commands::List {
            city,
            search_city,
            query,
            category,
            sort,
            page,
            images,
        } => {
            let explorer = build_explorer(&config, presets)?;
            let args = list::ListArgs {
                city,
                search_city,
                query,
                category,
                sort,
                page,
                images,
            };
            list::run_list(&explorer, &config, args).await
        }
        Commands::Detail { id } => {
            let explorer = build_explorer(&config, presets)?;
            detail::run_detail(&explorer, &id).await
        }
    }
}
