//! Rising Scout: Binary Entrypoint
//! Finds rising product-curation posts and prints them ranked by
//! engagement opportunity.
//!
//!   rising-scout                    # all categories
//!   rising-scout --cat golf --top 5
//!   rising-scout --sort hot --format json

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rising_scout::aggregate::{run_scout, AggregatorSettings, ScoutRequest};
use rising_scout::config::catalog::load_catalog_default;
use rising_scout::config::ScoutSettings;
use rising_scout::ingest::providers::reddit::RedditFetcher;
use rising_scout::report::{presenter_for, OutputFormat};
use rising_scout::SortMode;

#[derive(Parser)]
#[command(name = "rising-scout")]
#[command(about = "Find rising product-curation posts worth engaging with")]
#[command(version)]
struct Cli {
    /// Category filter (e.g. golf, tech, beauty, edc, travel)
    #[arg(long)]
    cat: Option<String>,

    /// Show top N posts
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    top: u64,

    /// Listing sort
    #[arg(long, value_enum, default_value_t = SortMode::Rising)]
    sort: SortMode,

    /// Posts requested per subreddit
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=100))]
    limit: u64,

    /// Subreddits fetched at once; request starts stay paced either way
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=8))]
    concurrency: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Catalog file (TOML or JSON); overrides SCOUT_CATALOG_PATH
    #[arg(long)]
    catalog: Option<PathBuf>,
}

/// Logs go to stderr so the report on stdout stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rising_scout=info,warn"));

    let json = std::env::var("SCOUT_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<()> {
    let settings = ScoutSettings::from_env();
    let catalog = load_catalog_default(cli.catalog.as_deref())?;
    let fetcher = RedditFetcher::from_settings(&settings)?;

    let request = ScoutRequest {
        category: cli.cat,
        sort: cli.sort,
        top_n: cli.top as usize,
    };
    let agg = AggregatorSettings {
        fetch_limit: cli.limit as usize,
        pacing: settings.pacing,
        concurrency: cli.concurrency as usize,
    };

    let ranked = run_scout(&catalog, &fetcher, agg, &request).await?;
    let report = presenter_for(cli.format).render(&ranked)?;
    println!("{report}");
    Ok(())
}
