use crate::config::SolverParams;
use crate::error::{checked_count, EngineError, EngineResult};
use crate::simulator::runner::{MonteCarlo, StartingState};
use crate::simulator::solver::DiceSolver;
use crate::tracker::{self, RunRating};

/// Inputs above this are rejected rather than risking overflow in the budget math.
pub const MAX_INPUT: f64 = 1e12;

fn count(name: &str, value: f64) -> EngineResult<u64> {
    let v = checked_count(name, value)?;
    if value > MAX_INPUT {
        return Err(EngineError::InvalidArgument(format!(
            "{} is too large (got {}, max {})",
            name, value, MAX_INPUT
        )));
    }
    Ok(v)
}

/// Percentage (0..100) of simulated runs that reach `goal` points with
/// `dice` dice left, starting from the given partial progress.
///
/// Uses the reference board, 10,000 trials and a fresh random seed, so
/// repeated calls differ slightly.
pub fn estimate_success_rate(
    goal: f64,
    dice: f64,
    current_score: Option<f64>,
    rolls_done: Option<f64>,
    current_tile: Option<f64>,
) -> EngineResult<f64> {
    let goal = count("goal", goal)?;
    let dice = count("dice", dice)?;
    let start = StartingState {
        current_score: count("current_score", current_score.unwrap_or(0.0))?,
        rolls_done: count("rolls_done", rolls_done.unwrap_or(0.0))?,
        current_tile: count("current_tile", current_tile.unwrap_or(0.0))? as usize,
    };

    MonteCarlo::reference().success_rate(goal, dice, &start)
}

/// Smallest dice count whose estimated success rate for `goal` is at least
/// `required_rate` percent.
pub fn min_dice_for_rate(goal: f64, required_rate: f64) -> EngineResult<u64> {
    let goal = count("goal", goal)?;
    let driver = MonteCarlo::reference();
    let solver = DiceSolver::new(&driver, &SolverParams::default());
    Ok(solver
        .solve(goal, required_rate, &StartingState::default())?
        .dice)
}

/// Net dice used, points per die and percentile for a finished run.
pub fn evaluate_run(
    points_achieved: f64,
    total_rolls: f64,
    dice_from_board: f64,
) -> EngineResult<RunRating> {
    tracker::rate_run(
        &MonteCarlo::reference(),
        count("points_achieved", points_achieved)?,
        count("total_rolls", total_rolls)?,
        count("dice_from_board", dice_from_board)?,
    )
}
