use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Score milestones repeat in tiers of this many points.
pub const SCORE_TIER_SIZE: u64 = 20_000;
/// Number of repeating score tiers.
pub const SCORE_TIER_COUNT: u64 = 5;
/// Offsets of the score milestones inside each tier.
pub const SCORE_TIER_OFFSETS: [u64; 6] = [2_000, 5_000, 8_000, 12_000, 16_000, 20_000];
/// Bonus dice granted by every score milestone.
pub const SCORE_MILESTONE_REWARD: u64 = 2;

pub const ROLL_THRESHOLDS: [u64; 17] = [
    5, 10, 20, 30, 40, 60, 80, 100, 150, 200, 250, 300, 350, 400, 450, 500, 600,
];
pub const ROLL_REWARDS: [u64; 17] = [1, 2, 2, 2, 2, 3, 3, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5];

/// A one-shot reward ladder: crossing `thresholds[i]` grants `rewards[i]` bonus dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTable {
    pub thresholds: Vec<u64>,
    pub rewards: Vec<u64>,
}

impl MilestoneTable {
    pub fn new(thresholds: Vec<u64>, rewards: Vec<u64>) -> EngineResult<Self> {
        let table = Self {
            thresholds,
            rewards,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.thresholds.len() != self.rewards.len() {
            return Err(EngineError::Config(format!(
                "milestone table has {} thresholds but {} rewards",
                self.thresholds.len(),
                self.rewards.len()
            )));
        }
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::Config(
                "milestone thresholds must be strictly ascending".to_string(),
            ));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Index of the first milestone after `cursor` (None == nothing met yet).
    #[inline(always)]
    pub fn next_index(cursor: Option<usize>) -> usize {
        cursor.map_or(0, |c| c + 1)
    }

    /// Threshold and reward of the first milestone after `cursor`, if any remain.
    pub fn next_after(&self, cursor: Option<usize>) -> Option<(u64, u64)> {
        let i = Self::next_index(cursor);
        Some((*self.thresholds.get(i)?, self.rewards[i]))
    }

    /// Advances `cursor` over every threshold at or below `value` and returns
    /// the summed reward of the thresholds crossed.
    #[inline(always)]
    pub fn advance(&self, cursor: &mut Option<usize>, value: u64) -> u64 {
        let mut gained = 0;
        for i in Self::next_index(*cursor)..self.thresholds.len() {
            if value < self.thresholds[i] {
                break;
            }
            *cursor = Some(i);
            gained += self.rewards[i];
        }
        gained
    }

    /// Total reward of every threshold at or below `value`, from scratch.
    pub fn total_reward_at(&self, value: u64) -> u64 {
        self.thresholds
            .iter()
            .zip(&self.rewards)
            .take_while(|(t, _)| **t <= value)
            .map(|(_, r)| r)
            .sum()
    }
}

/// The two global milestone ladders: cumulative score and cumulative rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    pub score: MilestoneTable,
    pub rolls: MilestoneTable,
}

impl Milestones {
    pub fn reference() -> Self {
        let thresholds: Vec<u64> = (0..SCORE_TIER_COUNT)
            .flat_map(|tier| {
                SCORE_TIER_OFFSETS
                    .iter()
                    .map(move |offset| tier * SCORE_TIER_SIZE + offset)
            })
            .collect();
        let rewards = vec![SCORE_MILESTONE_REWARD; thresholds.len()];

        Self {
            score: MilestoneTable {
                thresholds,
                rewards,
            },
            rolls: MilestoneTable {
                thresholds: ROLL_THRESHOLDS.to_vec(),
                rewards: ROLL_REWARDS.to_vec(),
            },
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.score.validate()?;
        self.rolls.validate()
    }
}

impl Default for Milestones {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_score_ladder_spans_five_tiers() {
        let m = Milestones::reference();
        assert_eq!(m.score.len(), 30);
        assert_eq!(m.score.thresholds[0], 2_000);
        assert_eq!(m.score.thresholds[6], 22_000);
        assert_eq!(*m.score.thresholds.last().unwrap(), 100_000);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn advance_collects_skipped_thresholds() {
        let m = Milestones::reference();
        let mut cursor = None;
        assert_eq!(m.score.advance(&mut cursor, 8_000), 6);
        assert_eq!(cursor, Some(2));
        assert_eq!(m.score.advance(&mut cursor, 8_000), 0);
    }

    #[test]
    fn rejects_unsorted_thresholds() {
        assert!(MilestoneTable::new(vec![5, 5], vec![1, 1]).is_err());
        assert!(MilestoneTable::new(vec![5, 10], vec![1]).is_err());
    }
}
