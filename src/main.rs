// main.rs
use clap::Parser;

use energy_sim::cli::{self, Args, Commands};
use energy_sim::logging;
use energy_sim::shell;

#[tokio::main]
async fn main() {
    logging::init_logging();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let format = args.format;
    let data_dir = args.data_dir;

    match args.command {
        Commands::Home { no_animation } => cli::handle_home(no_animation, format, data_dir).await,
        Commands::Mix { coal, gas, nuclear, hydro, solar, wind } => {
            cli::handle_mix([coal, gas, nuclear, hydro, solar, wind], format)
        }
        Commands::Footprint { car, bus, train, electricity, gas, meat_meals, local_food } => {
            let inputs = cli::build_footprint(car, bus, train, electricity, gas, meat_meals, local_food)?;
            cli::handle_footprint(inputs, format)
        }
        Commands::Market { buy, years, seed } => cli::handle_market(buy, years, seed, format, data_dir),
        Commands::Quiz { answers } => cli::handle_quiz(&answers, format, data_dir),
        Commands::Project { year, scenario } => cli::handle_project(year, scenario, format),
        Commands::Shell => shell::handle_shell(data_dir).await,
    }
}
