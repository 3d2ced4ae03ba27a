pub mod chance;
pub mod dice;
pub mod quests;
pub mod rate;
pub mod sweep;

use dice_companion::board::GameRules;
use dice_companion::config::Config;
use dice_companion::error::EngineResult;
use dice_companion::simulator::runner::{MonteCarlo, TrialOptions};
use std::sync::Arc;

pub fn build_driver(config: &Config, rules: Arc<GameRules>) -> EngineResult<MonteCarlo> {
    let policy = config.policy.to_policy()?;
    MonteCarlo::new(rules, policy, TrialOptions::from(config))
}
