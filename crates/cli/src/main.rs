//! NANASU CLI - query the product catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Search fresh pineapples, cheapest first
//! nanasu search --category nanas-segar --sort price_asc
//!
//! # Product detail by id or slug
//! nanasu product nanas-madu-premium
//!
//! # Search-as-you-type suggestions
//! nanasu suggest madu
//!
//! # Same-category products and bestsellers
//! nanasu related 1
//! nanasu featured
//!
//! # Check a fixture file before deploying it
//! nanasu validate crates/storefront/data/catalog.json
//! ```
//!
//! Query commands use the backend configured by the `NANASU_CATALOG_*`
//! environment variables (see the storefront config), unless `--fixtures`
//! points at a JSON file. Results are printed as the JSON response envelope;
//! the exit code is 1 when the envelope reports a failure.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nanasu_core::{Price, Rating};

mod commands;

use commands::query::SearchArgs;

#[derive(Parser)]
#[command(name = "nanasu")]
#[command(author, version, about = "NANASU catalog CLI")]
struct Cli {
    /// Serve queries from this fixture file instead of the configured backend
    #[arg(long, global = true, value_name = "FILE")]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter, sort and paginate products
    Search {
        /// Free-text query (name and description)
        #[arg(short, long)]
        q: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<String>,

        /// Lowest price, inclusive
        #[arg(long)]
        min_price: Option<Price>,

        /// Highest price, inclusive
        #[arg(long)]
        max_price: Option<Price>,

        /// Minimum rating (finite number)
        #[arg(short, long)]
        rating: Option<Rating>,

        /// `price_asc`, `price_desc`, `rating_desc`, `bestselling` or `newest`
        #[arg(short, long, default_value = "newest")]
        sort: String,

        /// Page number, starting at 1
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
    },
    /// Show a product by id or slug
    Product {
        /// Product id or slug
        id_or_slug: String,
    },
    /// Search-as-you-type suggestions
    Suggest {
        /// Partial query
        query: String,
    },
    /// Products from the same category as the given product
    Related {
        /// Product id
        id: String,
    },
    /// Bestseller products
    Featured,
    /// Check a fixture file for invariant violations
    Validate {
        /// Fixture JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run a command, returning whether it succeeded.
async fn run(cli: Cli) -> Result<bool, commands::CliError> {
    if let Commands::Validate { path } = &cli.command {
        return commands::validate::run(path);
    }

    let catalog = commands::query::open_catalog(cli.fixtures.as_deref())?;

    match cli.command {
        Commands::Search {
            q,
            category,
            min_price,
            max_price,
            rating,
            sort,
            page,
        } => {
            let args = SearchArgs {
                q,
                category,
                min_price,
                max_price,
                rating,
                sort,
                page,
            };
            commands::query::search(&catalog, args).await
        }
        Commands::Product { id_or_slug } => commands::query::product(&catalog, &id_or_slug).await,
        Commands::Suggest { query } => commands::query::suggest(&catalog, &query).await,
        Commands::Related { id } => commands::query::related(&catalog, &id).await,
        Commands::Featured => commands::query::featured(&catalog).await,
        Commands::Validate { .. } => Ok(true),
    }
}
