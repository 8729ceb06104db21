// src/cli.rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cfb_scrape",
    version,
    about = "College football roster, coaching staff and transfer portal scraper"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape rosters and coaching staff for a priority tier
    Roster {
        /// Priority tier to scrape (1=daily, 2=every 3 days, 3=weekly)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
        tier: u8,
    },
    /// Monitor transfer portal sources
    Transfers,
    /// Run the tier-1 roster pass, then the transfer monitor
    All,
}
