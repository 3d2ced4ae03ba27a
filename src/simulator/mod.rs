pub mod runner;
pub mod solver;

use crate::board::GameRules;
use crate::error::{EngineError, EngineResult};
use crate::ledger::SimResult;
use crate::random::roll_two_dice;
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// Below `below_turns` turns left, the multiplier may not exceed `cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnBand {
    pub below_turns: i64,
    pub cap: u64,
}

/// Band used while closing in on a roll milestone: applies when either the
/// turns left or the remaining gap to the milestone is under its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapBand {
    pub below_turns: i64,
    pub below_gap: u64,
    pub cap: u64,
}

/// How aggressively to use a tile's multiplier given the remaining budget.
///
/// A heuristic, not a game rule: high multipliers are only worth it when
/// enough turns remain to absorb a bad landing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierPolicy {
    pub turn_bands: Vec<TurnBand>,
    pub gap_bands: Vec<GapBand>,
    pub corrective_pass: bool,
}

impl MultiplierPolicy {
    pub fn new(
        turn_bands: Vec<TurnBand>,
        gap_bands: Vec<GapBand>,
        corrective_pass: bool,
    ) -> EngineResult<Self> {
        let policy = Self {
            turn_bands,
            gap_bands,
            corrective_pass,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn reference() -> Self {
        let bands = [(20, 2, 1), (30, 3, 2), (50, 4, 3), (100, 6, 5)];
        Self {
            turn_bands: bands
                .iter()
                .map(|&(below_turns, _, cap)| TurnBand { below_turns, cap })
                .collect(),
            gap_bands: bands
                .iter()
                .map(|&(below_turns, below_gap, cap)| GapBand {
                    below_turns,
                    below_gap,
                    cap,
                })
                .collect(),
            corrective_pass: true,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.turn_bands.iter().any(|b| b.cap == 0) || self.gap_bands.iter().any(|b| b.cap == 0)
        {
            return Err(EngineError::Config(
                "multiplier band caps must be at least 1".to_string(),
            ));
        }
        if self
            .turn_bands
            .windows(2)
            .any(|w| w[0].below_turns >= w[1].below_turns)
        {
            return Err(EngineError::Config(
                "turn bands must be listed in ascending order".to_string(),
            ));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn multiplier(&self, tile_cap: u64, turns_left: i64) -> u64 {
        for band in &self.turn_bands {
            if turns_left < band.below_turns {
                return tile_cap.min(band.cap);
            }
        }
        tile_cap
    }

    #[inline(always)]
    pub fn multiplier_near_milestone(&self, tile_cap: u64, turns_left: i64, gap: u64) -> u64 {
        for band in &self.gap_bands {
            if turns_left < band.below_turns || gap < band.below_gap {
                return tile_cap.min(band.cap);
            }
        }
        tile_cap
    }
}

impl Default for MultiplierPolicy {
    fn default() -> Self {
        Self::reference()
    }
}

/// Plays single runs against a shared, read-only rule set.
pub struct Simulator<'a> {
    pub rules: &'a GameRules,
    pub policy: &'a MultiplierPolicy,
}

impl<'a> Simulator<'a> {
    pub fn new(rules: &'a GameRules, policy: &'a MultiplierPolicy) -> Self {
        Self { rules, policy }
    }

    /// Rolls at `multiplier` (paying for it), moves, and collects the landed
    /// tile's reward at the same multiplier.
    #[inline(always)]
    fn take_turn(&self, rng: &mut Rng, multiplier: u64, result: &mut SimResult) {
        let board = &self.rules.board;
        let milestones = &self.rules.milestones;

        result.credit_rolls(milestones, multiplier);
        let steps = roll_two_dice(rng);
        result.position = board.advance(result.position, steps);

        board
            .tile(result.position)
            .apply_reward(rng, milestones, multiplier, result);
    }

    /// Advances `result` until it reaches `target` points or runs out of
    /// turns, then (if enabled) spends leftovers on a roll milestone that is
    /// within reach.
    ///
    /// `starting_dice` is the total budget measured against
    /// `initial_dice_consumed`; pass `u64::MAX` as `target` to play until the
    /// budget is gone.
    pub fn run(
        &self,
        rng: &mut Rng,
        starting_dice: u64,
        target: u64,
        mut result: SimResult,
    ) -> SimResult {
        let board = &self.rules.board;

        loop {
            let turns_left = result.turns_left(starting_dice);
            if result.score >= target || turns_left <= 0 {
                break;
            }
            let multiplier = self
                .policy
                .multiplier(board.multiplier_cap(result.position), turns_left);
            self.take_turn(rng, multiplier, &mut result);
        }

        if self.policy.corrective_pass {
            self.close_roll_milestone(rng, starting_dice, &mut result);
        }
        result
    }

    /// If the next roll milestone is closer than the dice it pays out, keep
    /// rolling (at small multipliers as the gap shrinks) until it is crossed
    /// or every die is spent.
    fn close_roll_milestone(&self, rng: &mut Rng, starting_dice: u64, result: &mut SimResult) {
        let board = &self.rules.board;
        let rolls = &self.rules.milestones.rolls;

        let Some((threshold, reward)) = rolls.next_after(result.roll_cursor) else {
            return;
        };
        if threshold.saturating_sub(result.rolls_done) >= reward {
            return;
        }

        let mut gap = threshold.saturating_sub(result.rolls_done);
        while gap > 0 && !result.is_exhausted(starting_dice) {
            let turns_left = result.turns_left(starting_dice);
            let multiplier = self.policy.multiplier_near_milestone(
                board.multiplier_cap(result.position),
                turns_left,
                gap,
            );
            self.take_turn(rng, multiplier, result);
            gap = threshold.saturating_sub(result.rolls_done);
        }
    }
}

/// One trial with the given budget, starting from `prev_run` (or a fresh ledger).
pub fn simulate_single_run(
    rules: &GameRules,
    policy: &MultiplierPolicy,
    rng: &mut Rng,
    starting_dice: u64,
    target: u64,
    prev_run: Option<SimResult>,
) -> SimResult {
    Simulator::new(rules, policy).run(rng, starting_dice, target, prev_run.unwrap_or_default())
}
