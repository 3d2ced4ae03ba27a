use crate::rules::Milestones;
use serde::{Deserialize, Serialize};

/// Per-run accumulator. Created at the start of a trial, mutated by the
/// simulator and tile rewards, then read once for pass/fail.
///
/// Milestone cursors hold the index of the last threshold met (`None` before
/// the first one) and only ever move forward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimResult {
    pub score: u64,
    pub rolls_done: u64,
    pub initial_dice_consumed: u64,
    pub bonus_dice: u64,
    pub gems: u64,
    pub position: usize,
    pub score_cursor: Option<usize>,
    pub roll_cursor: Option<usize>,
}

impl SimResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds score and grants every score milestone now reached.
    #[inline(always)]
    pub fn credit_score(&mut self, milestones: &Milestones, amount: u64) {
        if amount == 0 {
            return;
        }
        self.score += amount;
        self.bonus_dice += milestones.score.advance(&mut self.score_cursor, self.score);
    }

    /// Pays for `amount` rolls (bonus dice first, the rest from the starting
    /// budget) and grants every roll milestone now reached.
    #[inline(always)]
    pub fn credit_rolls(&mut self, milestones: &Milestones, amount: u64) {
        if amount == 0 {
            return;
        }
        self.rolls_done += amount;

        if self.bonus_dice <= amount {
            self.initial_dice_consumed += amount - self.bonus_dice;
        }
        self.bonus_dice = self.bonus_dice.saturating_sub(amount);

        self.bonus_dice += milestones.rolls.advance(&mut self.roll_cursor, self.rolls_done);
    }

    /// Bonus dice that bypass milestones (tile and wheel prizes).
    #[inline(always)]
    pub fn grant_bonus_dice(&mut self, amount: u64) {
        self.bonus_dice += amount;
    }

    /// Turns still affordable out of `starting_dice` plus the bonus balance.
    /// Negative once the starting budget is overdrawn.
    #[inline(always)]
    pub fn turns_left(&self, starting_dice: u64) -> i64 {
        starting_dice as i64 - self.initial_dice_consumed as i64 + self.bonus_dice as i64
    }

    /// True once the starting budget and the bonus balance are both spent.
    #[inline(always)]
    pub fn is_exhausted(&self, starting_dice: u64) -> bool {
        self.initial_dice_consumed >= starting_dice && self.bonus_dice == 0
    }

    /// Seeds a fresh ledger with progress made before the simulation starts.
    ///
    /// Milestones already passed are marked as met, but the dice they paid out
    /// are not put back in the balance: that progress is informational only.
    pub fn seeded(milestones: &Milestones, score: u64, rolls_done: u64, position: usize) -> Self {
        let mut ledger = Self::new();

        ledger.credit_rolls(milestones, rolls_done);
        ledger.bonus_dice = 0;

        ledger.credit_score(milestones, score);
        ledger.bonus_dice = 0;

        ledger.position = position;
        ledger
    }
}
