use clap::{Parser, Subcommand};
use dice_companion::board::GameRules;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with a custom board and milestone tables
    #[arg(global = true, long)]
    rules: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chance of reaching a score with the dice you have
    Chance(cmd::chance::ChanceArgs),
    /// Dice needed to reach a score at a given confidence
    Dice(cmd::dice::DiceArgs),
    /// Rate a finished run against simulated ones
    Rate(cmd::rate::RateArgs),
    /// Success rate across a range of dice counts
    Sweep(cmd::sweep::SweepArgs),
    /// Show the board
    Board,
    /// Dice still available from quests
    Quests(cmd::quests::QuestsArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let rules = match &cli.rules {
        Some(path) => {
            info!("📂 Loading Rules: {}", path);
            GameRules::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ FATAL ERROR LOADING RULES: {}", e);
                process::exit(1);
            })
        }
        None => GameRules::reference(),
    };
    let rules = Arc::new(rules);

    let result = match cli.command {
        Commands::Chance(args) => cmd::chance::run(args, rules),
        Commands::Dice(args) => cmd::dice::run(args, rules),
        Commands::Rate(args) => cmd::rate::run(args, rules),
        Commands::Sweep(args) => cmd::sweep::run(args, rules),
        Commands::Board => {
            reports::print_board(&rules.board);
            Ok(())
        }
        Commands::Quests(args) => cmd::quests::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
