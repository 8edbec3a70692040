use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use listing_dashboard::{
    analysis::{Dashboard, DashboardView, FilterOptions},
    io::{self, Dataset, LoadReport},
    visualization::{
        print_dataset_overview, print_filter_options, print_group_table, print_listing_map,
        print_most_reviewed, print_price_statistics, print_review_scatter,
        print_room_type_chart, print_summary_metrics, print_top_neighborhoods,
    },
    DashboardConfig, FilterCriteria,
};

#[derive(Parser)]
#[command(
    name = "listing-dashboard",
    about = "Listing Dashboard - Explore short-term rental listings from a CSV file",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Filter selection shared by the dashboard and map commands.
#[derive(Args)]
struct FilterArgs {
    /// Neighborhood to include (repeatable; none means all)
    #[arg(short, long = "neighborhood")]
    neighborhoods: Vec<String>,

    /// Room type to include (repeatable; none means all)
    #[arg(short, long = "room-type")]
    room_types: Vec<String>,

    /// Lowest nightly price to include
    #[arg(long)]
    price_min: Option<f64>,

    /// Highest nightly price to include
    #[arg(long)]
    price_max: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter listings and display metrics, charts and insights
    Dashboard {
        /// Path to the listings CSV (defaults to data.path from the config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Number of entries in the top-N lists
        #[arg(long)]
        top: Option<usize>,

        /// Maximum number of listings drawn on the map
        #[arg(long)]
        map_sample: Option<usize>,

        /// Print the whole dashboard view as JSON
        #[arg(long)]
        json: bool,

        /// Skip the map
        #[arg(long)]
        no_map: bool,
    },

    /// Display an overview of the dataset and the load report
    Summary {
        /// Path to the listings CSV
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List the selectable neighborhoods, room types and price bounds
    Options {
        /// Path to the listings CSV
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Draw the map of a filtered sample with geographic insights
    Map {
        /// Path to the listings CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum number of listings drawn on the map
        #[arg(long)]
        map_sample: Option<usize>,
    },

    /// Start the web UI server
    #[cfg(feature = "web")]
    Serve {
        /// Path to the listings CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// `dashboard --json` output: the view plus where it came from.
#[derive(Serialize)]
struct JsonReport<'a> {
    dataset: &'a str,
    report: &'a LoadReport,
    #[serde(flatten)]
    view: &'a DashboardView,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn resolve_input(input: Option<PathBuf>, config: &DashboardConfig) -> Result<PathBuf> {
    match input.or_else(|| config.data.path.clone()) {
        Some(path) => Ok(path),
        None => anyhow::bail!("No input file: pass --input or set data.path in the config"),
    }
}

fn load(input: Option<PathBuf>, config: &DashboardConfig) -> Result<Dataset> {
    let path = resolve_input(input, config)?;
    Ok(io::load_dataset(&path, &config.load_options())?)
}

/// Command-line bounds win over configured defaults, which win over the dataset range.
fn build_criteria(
    filters: FilterArgs,
    config: &DashboardConfig,
    options: &FilterOptions,
) -> Result<FilterCriteria> {
    let price_min = filters
        .price_min
        .or(config.filters.price_min)
        .unwrap_or(options.price_floor);
    let price_max = filters
        .price_max
        .or(config.filters.price_max)
        .unwrap_or(options.price_ceiling);

    Ok(FilterCriteria::new(price_min, price_max)?
        .with_neighborhoods(filters.neighborhoods)
        .with_room_types(filters.room_types))
}

fn render(dashboard: &Dashboard<'_>, criteria: &FilterCriteria, seed: Option<u64>) -> DashboardView {
    match seed {
        Some(seed) => dashboard.render_with_rng(criteria, &mut StdRng::seed_from_u64(seed)),
        None => dashboard.render(criteria),
    }
}

fn print_loaded(dataset: &Dataset) {
    println!(
        "\n{}",
        format!("Listing Dashboard: {}", dataset.table.name).bold().cyan()
    );
    println!(
        "  Loaded {} listings ({} rows skipped)",
        dataset.table.len(),
        dataset.report.skipped()
    );
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dashboard {
            input,
            filters,
            top,
            map_sample,
            json,
            no_map,
        } => {
            let dataset = load(input, &config)?;

            let mut settings = config.settings();
            if let Some(top) = top {
                settings.top_n = top;
            }
            if let Some(size) = map_sample {
                settings.map_sample_size = size;
            }

            let dashboard = Dashboard::new(&dataset.table, &settings);
            let criteria = build_criteria(filters, &config, &dashboard.options())?;
            let view = render(&dashboard, &criteria, config.map.seed);

            if json {
                let output = JsonReport {
                    dataset: &dataset.table.name,
                    report: &dataset.report,
                    view: &view,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            print_loaded(&dataset);
            print_summary_metrics(&view);
            if view.is_empty() {
                return Ok(());
            }

            print_room_type_chart(&view.room_type_prices);
            print_review_scatter(&view.price_reviews);
            print_group_table(&view.summary);
            print_top_neighborhoods(&view.top_neighborhoods);
            print_most_reviewed(&view.most_reviewed);

            match &view.price_statistics {
                Some(stats) => print_price_statistics(stats),
                None => eprintln!(
                    "{}: too few listings for price statistics",
                    "Warning".yellow()
                ),
            }

            if !no_map {
                print_listing_map(&view.map_sample, view.filtered.num_mappable());
            }
        }

        Commands::Summary { input } => {
            let dataset = load(input, &config)?;
            print_dataset_overview(
                &dataset.table.name,
                &dataset.table.overview(),
                &dataset.report,
            );
        }

        Commands::Options { input } => {
            let dataset = load(input, &config)?;
            print_filter_options(&FilterOptions::from_table(&dataset.table));
        }

        Commands::Map {
            input,
            filters,
            map_sample,
        } => {
            let dataset = load(input, &config)?;

            let mut settings = config.settings();
            if let Some(size) = map_sample {
                settings.map_sample_size = size;
            }

            let dashboard = Dashboard::new(&dataset.table, &settings);
            let criteria = build_criteria(filters, &config, &dashboard.options())?;
            let view = render(&dashboard, &criteria, config.map.seed);

            print_loaded(&dataset);
            print_listing_map(&view.map_sample, view.filtered.num_mappable());
        }

        #[cfg(feature = "web")]
        Commands::Serve { input, port } => {
            let path = resolve_input(input, &config)?;
            let state = listing_dashboard::web::AppState::new(path, &config);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(listing_dashboard::web::start_server(port, state))?;
        }
    }

    Ok(())
}
