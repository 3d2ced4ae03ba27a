use crate::reports;
use clap::Args;
use dice_companion::board::GameRules;
use dice_companion::config::Config;
use dice_companion::error::EngineResult;
use dice_companion::tracker;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct RateArgs {
    /// Points the run finished with
    #[arg(short, long)]
    pub points: u64,

    /// Total rolls made during the run
    #[arg(long)]
    pub rolls: u64,

    /// Dice picked up from board tiles and wheels
    #[arg(long, default_value_t = 0)]
    pub board_dice: u64,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: RateArgs, rules: Arc<GameRules>) -> EngineResult<()> {
    let driver = super::build_driver(&args.config, rules)?;
    let rating = tracker::rate_run(&driver, args.points, args.rolls, args.board_dice)?;

    reports::print_run_rating(&rating);
    println!("Percentile: {:.2}%", rating.percentile);
    Ok(())
}
