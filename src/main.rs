// src/main.rs

use clap::Parser;

use cfb_scrape::cli::{Cli, Command};
use cfb_scrape::config::Settings;
use cfb_scrape::core::net::Fetcher;
use cfb_scrape::db::Db;
use cfb_scrape::model::Tier;
use cfb_scrape::progress::ConsoleProgress;
use cfb_scrape::runner;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    let db = Db::connect(&settings);
    let fetcher = Fetcher::new();
    let mut progress = ConsoleProgress::default();

    match cli.command {
        Command::Roster { tier } => {
            let tier = Tier::try_from(tier)?;
            let summary = runner::run_roster(&db, &fetcher, tier, Some(&mut progress))?;
            println!("{summary}");
        }
        Command::Transfers => {
            let summary = runner::run_transfers(&db, &fetcher, Some(&mut progress))?;
            println!("{summary}");
        }
        Command::All => {
            let (roster, transfers) = runner::run_all(&db, &fetcher, Some(&mut progress))?;
            println!("Rosters: {roster}");
            println!("Transfers: {transfers}");
        }
    }
    Ok(())
}
