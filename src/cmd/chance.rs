use crate::reports;
use clap::Args;
use dice_companion::board::GameRules;
use dice_companion::config::Config;
use dice_companion::error::EngineResult;
use dice_companion::simulator::runner::StartingState;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ChanceArgs {
    /// Points you are aiming for
    #[arg(short, long)]
    pub goal: u64,

    /// Dice you still have
    #[arg(short, long)]
    pub dice: u64,

    /// Points already earned
    #[arg(long, default_value_t = 0)]
    pub current: u64,

    /// Rolls already done (see the roll task)
    #[arg(long, default_value_t = 0)]
    pub rolls_done: u64,

    /// Tile you are standing on
    #[arg(short = 't', long, default_value_t = 0)]
    pub tile: usize,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: ChanceArgs, rules: Arc<GameRules>) -> EngineResult<()> {
    let driver = super::build_driver(&args.config, rules)?;
    let start = StartingState {
        current_score: args.current,
        rolls_done: args.rolls_done,
        current_tile: args.tile,
    };

    info!(
        "🎯 Simulating {} runs: {} points with {} dice",
        driver.trials(),
        args.goal,
        args.dice
    );
    let estimate = driver.estimate(args.goal, args.dice, &start)?;

    reports::print_estimate(&estimate, &start);
    println!("Success Rate: {:.2}%", estimate.success_rate);
    Ok(())
}
