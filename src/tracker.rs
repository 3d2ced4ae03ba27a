use crate::error::{EngineError, EngineResult};
use crate::rules::Milestones;
use crate::simulator::runner::{MonteCarlo, StartingState};
use serde::{Deserialize, Serialize};

/// How a finished run compares with simulated runs on the same dice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRating {
    pub points: u64,
    pub net_dice_used: u64,
    pub points_per_die: f64,
    /// Share of simulated runs on `net_dice_used` dice that fell short of `points`.
    pub percentile: f64,
}

/// Dice paid for out of the player's own pocket: total rolls minus every
/// die handed back by the board and by the roll and score milestones.
pub fn net_dice_used(
    milestones: &Milestones,
    total_rolls: u64,
    points: u64,
    dice_from_board: u64,
) -> i64 {
    let roll_bonus = milestones.rolls.total_reward_at(total_rolls);
    let score_bonus = milestones.score.total_reward_at(points);
    total_rolls as i64 - dice_from_board as i64 - roll_bonus as i64 - score_bonus as i64
}

pub fn rate_run(
    driver: &MonteCarlo,
    points: u64,
    total_rolls: u64,
    dice_from_board: u64,
) -> EngineResult<RunRating> {
    let net = net_dice_used(&driver.rules().milestones, total_rolls, points, dice_from_board);
    if net <= 0 {
        return Err(EngineError::InvalidArgument(format!(
            "{} rolls with {} board dice leaves no dice of your own ({})",
            total_rolls, dice_from_board, net
        )));
    }
    let net = net as u64;

    let success = driver.success_rate(points, net, &StartingState::default())?;
    Ok(RunRating {
        points,
        net_dice_used: net,
        points_per_die: points as f64 / net as f64,
        percentile: 100.0 - success,
    })
}
