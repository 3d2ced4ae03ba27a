use crate::reports;
use clap::Args;
use dice_companion::board::GameRules;
use dice_companion::config::{Config, SolverParams};
use dice_companion::error::EngineResult;
use dice_companion::simulator::runner::StartingState;
use dice_companion::simulator::solver::DiceSolver;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DiceArgs {
    /// Points you are aiming for
    #[arg(short, long)]
    pub goal: u64,

    /// Required success rate in percent
    #[arg(short, long, default_value_t = 98.69)]
    pub rate: f64,

    #[command(flatten)]
    pub solver: SolverParams,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: DiceArgs, rules: Arc<GameRules>) -> EngineResult<()> {
    let driver = super::build_driver(&args.config, rules)?;
    let solver = DiceSolver::new(&driver, &args.solver);

    info!(
        "🔎 Searching dice for {} points at {:.2}%",
        args.goal, args.rate
    );
    let outcome = solver.solve(args.goal, args.rate, &StartingState::default())?;

    reports::print_solver_outcome(&outcome);
    println!("Dice Needed: {}", outcome.dice);
    Ok(())
}
