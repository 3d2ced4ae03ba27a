use crate::error::{EngineError, EngineResult};
use crate::rules::MilestoneTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Side quests that pay out dice outside the board.
#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Quest {
    IslandPack2,
    IslandPack3,
    DailyLogin,
    GoldCave,
    KillMinions,
    SealBattle,
    KillBosses,
    ClaimAfkRewards,
    Arena,
    Keys,
    UseGems,
    Shovels,
    Wishes,
}

impl Quest {
    pub fn table(&self) -> MilestoneTable {
        let (thresholds, rewards): (Vec<u64>, Vec<u64>) = match self {
            Self::IslandPack2 => ((1..=7).collect(), vec![1; 7]),
            Self::IslandPack3 => ((1..=7).collect(), vec![5; 7]),
            Self::DailyLogin => ((1..=5).collect(), vec![2; 5]),
            Self::GoldCave => ((1..=4).map(|i| i * 2).collect(), vec![2; 4]),
            Self::KillMinions => ((1..=4).map(|i| i * 500).collect(), vec![1; 4]),
            Self::SealBattle => ((1..=5).map(|i| i * 2).collect(), vec![2; 5]),
            Self::KillBosses => (vec![5, 10, 20, 30], vec![1; 4]),
            Self::ClaimAfkRewards => (vec![3, 5, 10, 15, 20], vec![1; 5]),
            Self::Arena => (vec![3, 6, 10, 15, 20, 30], vec![1; 6]),
            Self::Keys => (vec![1, 2, 3, 5, 10, 15, 20], vec![1, 1, 1, 1, 2, 2, 2]),
            Self::UseGems => (
                vec![200, 500, 1000, 2000, 3000, 4000, 6000, 8000, 10000],
                vec![1, 1, 1, 2, 2, 2, 2, 2, 2],
            ),
            Self::Shovels => (vec![2, 4, 6, 10, 20, 30, 40], vec![2; 7]),
            Self::Wishes => (vec![1, 2, 3, 5, 10, 15, 20], vec![2; 7]),
        };
        MilestoneTable {
            thresholds,
            rewards,
        }
    }

    /// Label for the progress counter ("# Killed", "# Days", ...).
    pub fn unit(&self) -> &'static str {
        match self {
            Self::IslandPack2 | Self::IslandPack3 => "bought",
            Self::DailyLogin => "days",
            Self::GoldCave | Self::SealBattle | Self::Arena => "done",
            Self::KillMinions | Self::KillBosses => "killed",
            Self::ClaimAfkRewards => "collected",
            Self::Keys | Self::UseGems | Self::Shovels | Self::Wishes => "used",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStatus {
    pub quest: Quest,
    pub progress: u64,
    pub earned: u64,
    pub remaining: u64,
    /// Progress needed for the next reward, if any are left.
    pub next_threshold: Option<u64>,
}

pub fn quest_status(quest: Quest, progress: u64) -> QuestStatus {
    let table = quest.table();
    let earned = table.total_reward_at(progress);
    let total: u64 = table.rewards.iter().sum();
    let next_threshold = table.thresholds.iter().copied().find(|&t| t > progress);

    QuestStatus {
        quest,
        progress,
        earned,
        remaining: total - earned,
        next_threshold,
    }
}

/// Status of every quest; quests missing from `progress` count as untouched.
pub fn all_quest_status(progress: &HashMap<Quest, u64>) -> Vec<QuestStatus> {
    Quest::iter()
        .map(|q| quest_status(q, progress.get(&q).copied().unwrap_or(0)))
        .collect()
}

/// Parses `"kill_bosses=10,daily_login=3"`.
pub fn parse_progress(s: &str) -> EngineResult<HashMap<Quest, u64>> {
    let mut map = HashMap::new();
    for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, value) = entry.split_once('=').ok_or_else(|| {
            EngineError::InvalidArgument(format!("quest progress '{}' is not 'quest=count'", entry))
        })?;
        let quest = Quest::from_str(name.trim())
            .map_err(|_| EngineError::InvalidArgument(format!("unknown quest '{}'", name)))?;
        let count = value.trim().parse().map_err(|_| {
            EngineError::InvalidArgument(format!("invalid count '{}' for {}", value, quest))
        })?;
        map.insert(quest, count);
    }
    Ok(map)
}
