use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::footprint::LocalFoodShare;
use crate::core::projection::Scenario;
use crate::report::OutputFormat;

#[derive(Parser)]
#[command(name = "energy-sim")]
#[command(about = "Explore generation mixes, carbon footprints, a mock carbon market and future projections")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding config.json and shell history
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the welcome screen and headline figures
    Home {
        /// Skip the transition animation
        #[arg(long)]
        no_animation: bool,
    },
    /// Carbon intensity of an electricity generation mix (shares in %)
    Mix {
        #[arg(long)]
        coal: Option<i64>,
        #[arg(long)]
        gas: Option<i64>,
        #[arg(long)]
        nuclear: Option<i64>,
        #[arg(long)]
        hydro: Option<i64>,
        #[arg(long)]
        solar: Option<i64>,
        #[arg(long)]
        wind: Option<i64>,
    },
    /// Estimate a personal annual carbon footprint
    Footprint {
        /// Car kilometres per week
        #[arg(long)]
        car: Option<i64>,
        /// Bus kilometres per week
        #[arg(long)]
        bus: Option<i64>,
        /// Train kilometres per week
        #[arg(long)]
        train: Option<i64>,
        /// Electricity kWh per month
        #[arg(long)]
        electricity: Option<i64>,
        /// Gas m³ per month
        #[arg(long)]
        gas: Option<i64>,
        /// Meat meals per week
        #[arg(long)]
        meat_meals: Option<i64>,
        /// Share of locally sourced food (rarely, some, half, mostly, all)
        #[arg(long, default_value = "rarely")]
        local_food: LocalFoodShare,
    },
    /// Buy carbon credits and simulate market years
    Market {
        /// Credits to buy at the listing price
        #[arg(long)]
        buy: Option<i64>,
        /// Number of market years to simulate after buying
        #[arg(long, default_value = "0")]
        years: u32,
        /// Seed for the price draws
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Answer the energy quiz, e.g. --answer 1=2 --answer 2=2
    Quiz {
        /// Question=option pairs, both 1-based
        #[arg(long = "answer")]
        answers: Vec<String>,
    },
    /// Linear projection of the energy transition
    Project {
        /// Target year (2025-2050)
        #[arg(long)]
        year: Option<i64>,
        /// Scenario (baseline, aggressive, breakthrough)
        #[arg(long, default_value = "baseline")]
        scenario: Scenario,
    },
    /// Interactive dashboard session
    Shell,
}
