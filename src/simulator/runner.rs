use crate::board::GameRules;
use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::ledger::SimResult;
use crate::simulator::{MultiplierPolicy, Simulator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Trials per estimate in the reference configuration.
pub const DEFAULT_TRIALS: usize = 10_000;

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Progress made before the simulated remainder of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingState {
    pub current_score: u64,
    pub rolls_done: u64,
    pub current_tile: usize,
}

pub struct TrialOptions {
    pub trials: usize,
    pub seed: Option<u64>,
    pub num_threads: Option<usize>,
}

impl Default for TrialOptions {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            num_threads: None,
        }
    }
}

impl From<&Config> for TrialOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            trials: cfg.sim.trials,
            seed: cfg.sim.seed,
            num_threads: cfg.sim.threads,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub goal: u64,
    pub dice: u64,
    pub trials: usize,
    pub successes: usize,
    /// Percentage in [0, 100); a clean sweep is reported as (N-1)/N.
    pub success_rate: f64,
}

/// Runs many independent trials from the same starting state and reports
/// how often the goal was reached.
pub struct MonteCarlo {
    rules: Arc<GameRules>,
    policy: MultiplierPolicy,
    trials: usize,
    seed: Option<u64>,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl MonteCarlo {
    pub fn new(
        rules: Arc<GameRules>,
        policy: MultiplierPolicy,
        options: TrialOptions,
    ) -> EngineResult<Self> {
        rules.validate()?;
        policy.validate()?;
        if options.trials < 2 {
            return Err(EngineError::InvalidArgument(format!(
                "at least 2 trials are required (got {})",
                options.trials
            )));
        }

        let pool = match options.num_threads {
            Some(n) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| EngineError::Config(format!("thread pool: {}", e)))?,
            )),
            None => None,
        };

        Ok(Self {
            rules,
            policy,
            trials: options.trials,
            seed: options.seed,
            pool,
        })
    }

    pub fn reference() -> Self {
        Self {
            rules: Arc::new(GameRules::reference()),
            policy: MultiplierPolicy::reference(),
            trials: DEFAULT_TRIALS,
            seed: None,
            pool: None,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Same driver with a different base seed; rules and pool are shared.
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            rules: self.rules.clone(),
            policy: self.policy.clone(),
            trials: self.trials,
            seed,
            pool: self.pool.clone(),
        }
    }

    /// Highest rate this driver can ever report.
    pub fn max_reportable_rate(&self) -> f64 {
        haircut_rate(self.trials, self.trials)
    }

    pub fn estimate(&self, goal: u64, dice: u64, start: &StartingState) -> EngineResult<Estimate> {
        if start.current_tile >= self.rules.board.len() {
            return Err(EngineError::InvalidArgument(format!(
                "current tile {} is off a {}-tile board",
                start.current_tile,
                self.rules.board.len()
            )));
        }

        let started = Instant::now();
        let successes = match &self.pool {
            Some(pool) => pool.install(|| self.count_successes(goal, dice, start)),
            None => self.count_successes(goal, dice, start),
        };
        let success_rate = haircut_rate(successes, self.trials);

        debug!(
            "goal {} | dice {} | {}/{} trials | {:.2}% | {:.1?}",
            goal,
            dice,
            successes,
            self.trials,
            success_rate,
            started.elapsed()
        );

        Ok(Estimate {
            goal,
            dice,
            trials: self.trials,
            successes,
            success_rate,
        })
    }

    pub fn success_rate(&self, goal: u64, dice: u64, start: &StartingState) -> EngineResult<f64> {
        Ok(self.estimate(goal, dice, start)?.success_rate)
    }

    /// Estimates for every dice count in `dice`, in order.
    pub fn sweep(
        &self,
        goal: u64,
        dice: impl IntoIterator<Item = u64>,
        start: &StartingState,
    ) -> EngineResult<Vec<Estimate>> {
        dice.into_iter()
            .map(|d| self.estimate(goal, d, start))
            .collect()
    }

    fn count_successes(&self, goal: u64, dice: u64, start: &StartingState) -> usize {
        let sim = Simulator::new(&self.rules, &self.policy);
        let milestones = &self.rules.milestones;
        let budget = dice.saturating_add(start.rolls_done);
        let seed = self.seed;

        (0..self.trials)
            .into_par_iter()
            .map_init(fastrand::Rng::new, |rng, i| {
                if let Some(s) = seed {
                    rng.seed(trial_seed(s, i));
                }
                let ledger = SimResult::seeded(
                    milestones,
                    start.current_score,
                    start.rolls_done,
                    start.current_tile,
                );
                // Score never decreases, so stopping at the goal cannot flip the outcome.
                let run = sim.run(rng, budget, goal, ledger);
                usize::from(run.score >= goal)
            })
            .sum()
    }
}

#[inline(always)]
fn trial_seed(base: u64, trial: usize) -> u64 {
    base.wrapping_add((trial as u64).wrapping_mul(SEED_STRIDE))
}

/// Success percentage, never claiming certainty from a finite sample.
pub fn haircut_rate(successes: usize, trials: usize) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    let counted = if successes >= trials {
        trials - 1
    } else {
        successes
    };
    counted as f64 / trials as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_sweep_is_haircut() {
        assert!((haircut_rate(10_000, 10_000) - 99.99).abs() < 1e-9);
        assert!((haircut_rate(5_000, 10_000) - 50.0).abs() < 1e-9);
        assert_eq!(haircut_rate(0, 10_000), 0.0);
    }

    #[test]
    fn single_trial_rejected() {
        let opts = TrialOptions {
            trials: 1,
            ..Default::default()
        };
        let mc = MonteCarlo::new(
            Arc::new(GameRules::reference()),
            MultiplierPolicy::reference(),
            opts,
        );
        assert!(matches!(mc, Err(EngineError::InvalidArgument(_))));
    }
}
