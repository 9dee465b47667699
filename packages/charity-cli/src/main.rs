//! Command-line front end for paced charity register searches.
//!
//! Results go to stdout as JSON; logs go to stderr.

mod config;

use anyhow::{Context, Result};
use charity_search::{
    build_charity_number_list, collect_charities, fetch_all_charities, normalize_all,
    search_by_keyword_list, CharityNumber, DelayBound, RandomPacer,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "charity-search")]
#[command(about = "Search the charity register by keyword and fetch full records")]
struct Cli {
    /// Settings JSON file (private.charity_commission.api_key, private.search_terms)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Upper bound of the random pause between registry calls, in milliseconds
    #[arg(long, global = true)]
    delay_max_ms: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search keywords and print the unique charity numbers found
    Search {
        /// Keywords (defaults to the configured search terms)
        keywords: Vec<String>,

        /// Print the flat seven-field rows instead of numbers
        #[arg(long)]
        normalized: bool,
    },

    /// Fetch full records for charity numbers
    Fetch {
        #[arg(required = true)]
        numbers: Vec<u32>,
    },

    /// Search, deduplicate and fetch full records
    Collect {
        /// Keywords (defaults to the configured search terms)
        keywords: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,charity_search=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.settings.as_deref())?;
    if let Some(ms) = cli.delay_max_ms {
        config.delay = DelayBound::new(ms).context("invalid --delay-max-ms")?;
    }

    let registry = config.registry();
    let pacer = RandomPacer::new(config.delay);
    let base = config.search_criteria();

    tracing::info!(
        endpoint = registry.endpoint(),
        delay_max_ms = config.delay.as_millis(),
        "Charity register client ready"
    );

    match cli.command {
        Command::Search {
            keywords,
            normalized,
        } => {
            let keywords = config.keywords_or_default(keywords);
            let lists = search_by_keyword_list(&registry, &base, &keywords, &pacer)
                .await
                .context("keyword search failed")?;

            if normalized {
                print_json(&normalize_all(&lists))?;
            } else {
                print_json(&build_charity_number_list(&lists))?;
            }
        }
        Command::Fetch { numbers } => {
            let numbers = numbers
                .into_iter()
                .map(CharityNumber::new)
                .collect::<Result<Vec<_>, _>>()
                .context("invalid charity number")?;

            let records = fetch_all_charities(&registry, &base.fetch_params(), &numbers, &pacer)
                .await
                .context("charity fetch failed")?;
            print_json(&records)?;
        }
        Command::Collect { keywords } => {
            let keywords = config.keywords_or_default(keywords);
            let records = collect_charities(&registry, &base, &keywords, &pacer)
                .await
                .context("charity collection failed")?;
            print_json(&records)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
