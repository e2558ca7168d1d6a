//! League Report CLI
//!
//! Computes all-time records and the transaction history for a Sleeper
//! league and prints a terminal summary. Results cache in the data
//! directory; `--refresh` forces a recompute.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use league_settings::LeagueConfig;
use record_store::RecordStore;
use records_engine::{RecordsBundle, RecordsEngine};
use sleeper_client::SleeperClient;
use tracing_subscriber::EnvFilter;
use transactions_engine::{preview, TransactionsBundle, TransactionsEngine};

#[derive(Parser)]
#[command(name = "league-report")]
#[command(about = "All-time records and transaction history for a Sleeper league")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the league configuration file
    #[arg(short, long, default_value = "league.toml")]
    config: String,

    /// Directory for cached result snapshots
    #[arg(short, long, default_value = ".league-report")]
    data_dir: String,

    /// Recompute even when a cached snapshot exists
    #[arg(short, long)]
    refresh: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// All-time records and leaderboards
    Records,

    /// Transaction history and per-manager totals
    Transactions,

    /// Both reports
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = LeagueConfig::load(&cli.config)
        .with_context(|| format!("Failed to load league config from {}", cli.config))?;
    if let Ok(league_id) = std::env::var("LEAGUE_ID") {
        config.league_id = league_id;
    }

    let client = SleeperClient::new().context("Failed to build Sleeper client")?;

    match cli.command.clone().unwrap_or(Commands::All) {
        Commands::Records => {
            let records = load_records(&cli, &client, &config).await?;
            print_records(&records);
        }
        Commands::Transactions => {
            let transactions = load_transactions(&cli, &client, &config).await?;
            print_transactions(&transactions);
        }
        Commands::All => {
            let records = load_records(&cli, &client, &config).await?;
            let transactions = load_transactions(&cli, &client, &config).await?;
            print_records(&records);
            print_transactions(&transactions);
        }
    }

    Ok(())
}

async fn load_records(
    cli: &Cli,
    client: &SleeperClient,
    config: &LeagueConfig,
) -> Result<RecordsBundle> {
    let store: RecordStore<RecordsBundle> = RecordStore::open(&cli.data_dir, "records");
    let engine = RecordsEngine::new(client.clone(), config);
    store
        .load_or_compute(cli.refresh, async move { engine.compute().await })
        .await
        .context("Failed to compute league records")
}

async fn load_transactions(
    cli: &Cli,
    client: &SleeperClient,
    config: &LeagueConfig,
) -> Result<TransactionsBundle> {
    let store: RecordStore<TransactionsBundle> = RecordStore::open(&cli.data_dir, "transactions");
    let engine = TransactionsEngine::new(client.clone(), config);
    store
        .load_or_compute(cli.refresh, async move { engine.compute().await })
        .await
        .context("Failed to compute transaction history")
}

fn staleness(stale: bool) -> ColoredString {
    if stale {
        "cached (stale)".yellow()
    } else {
        "fresh".green()
    }
}

fn print_records(records: &RecordsBundle) {
    println!("{} [{}]", "League Records".bold(), staleness(records.stale));
    if let (Some(first), Some(latest)) = (records.last_year, records.current_year) {
        println!("  Seasons: {} through {}", first, latest);
    }
    println!("  Managers: {}", records.current_managers.len());

    if let Some(best) = records.all_time_week_bests.first() {
        println!(
            "  Best week ever: {} with {:.2} ({} week {})",
            best.manager.name.cyan(),
            best.fpts,
            best.year,
            best.week
        );
    }
    if let Some(blowout) = records.all_time_biggest_blowouts.first() {
        println!(
            "  Biggest blowout: {} over {} by {:.2} ({} week {})",
            blowout.winner.manager.name.cyan(),
            blowout.loser.manager.name.cyan(),
            blowout.differential,
            blowout.year,
            blowout.week
        );
    }
    if let Some(closest) = records.all_time_closest_matchups.first() {
        println!(
            "  Closest matchup: {} over {} by {:.2} ({} week {})",
            closest.winner.manager.name.cyan(),
            closest.loser.manager.name.cyan(),
            closest.differential,
            closest.year,
            closest.week
        );
    }
    if let Some(season) = records.all_time_season_bests.first() {
        println!(
            "  Best season: {} with {:.2} in {}",
            season.manager.name.cyan(),
            season.fpts,
            season.year
        );
    }
    println!();
}

fn print_transactions(transactions: &TransactionsBundle) {
    println!(
        "{} [{}]",
        "Transaction History".bold(),
        staleness(transactions.stale)
    );
    println!("  Total transactions: {}", transactions.transactions.len());

    let mut counts: Vec<_> = transactions.totals.all_time.values().collect();
    counts.sort_by_key(|c| std::cmp::Reverse(c.trades + c.waivers));
    for count in counts.iter().take(5) {
        println!(
            "  {}: {} trades, {} waivers",
            count.manager.name.cyan(),
            count.trades,
            count.waivers
        );
    }

    let recent = preview(&transactions.transactions, 3);
    if let Some(trade) = recent.trades.first() {
        println!("  Latest trade: {}", trade.date);
    }
    if let Some(waiver) = recent.waivers.first() {
        println!("  Latest waiver: {}", waiver.date);
    }
    println!();
}
