use crate::config::SolverParams;
use crate::error::{EngineError, EngineResult};
use crate::simulator::runner::{Estimate, MonteCarlo, StartingState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverOutcome {
    pub goal: u64,
    pub required_rate: f64,
    /// Smallest dice count whose estimated rate meets `required_rate`.
    pub dice: u64,
    pub rate: f64,
    /// Rate at `dice - 1` (absent when `dice` is 0).
    pub rate_below: Option<f64>,
    pub seed: u64,
    pub probes: Vec<Estimate>,
}

/// Finds the minimum starting dice for a target success rate, using the
/// Monte Carlo driver as an oracle.
///
/// Every probe shares one seed, so neighbouring dice counts are compared on
/// the same random streams and the answer is stable for a given seed.
pub struct DiceSolver<'a> {
    driver: &'a MonteCarlo,
    max_dice: u64,
}

impl<'a> DiceSolver<'a> {
    pub fn new(driver: &'a MonteCarlo, params: &SolverParams) -> Self {
        Self {
            driver,
            max_dice: params.max_dice,
        }
    }

    pub fn solve(
        &self,
        goal: u64,
        required_rate: f64,
        start: &StartingState,
    ) -> EngineResult<SolverOutcome> {
        let ceiling = self.driver.max_reportable_rate();
        if !required_rate.is_finite() || required_rate <= 0.0 || required_rate > ceiling {
            return Err(EngineError::InvalidArgument(format!(
                "required rate must be in (0, {:.2}] for {} trials (got {})",
                ceiling,
                self.driver.trials(),
                required_rate
            )));
        }

        let seed = self.driver.seed().unwrap_or_else(|| fastrand::u64(..));
        let oracle = self.driver.with_seed(Some(seed));
        let mut probes: BTreeMap<u64, Estimate> = BTreeMap::new();

        let mut probe = |dice: u64| -> EngineResult<f64> {
            if let Some(e) = probes.get(&dice) {
                return Ok(e.success_rate);
            }
            let e = oracle.estimate(goal, dice, start)?;
            debug!("probe {} dice -> {:.2}%", dice, e.success_rate);
            probes.insert(dice, e);
            Ok(e.success_rate)
        };

        // Bracket: `lo` misses the target, `hi` meets it.
        let (mut lo, mut hi) = if probe(0)? >= required_rate {
            (None, 0)
        } else {
            let mut lo = 0;
            let mut hi = 1u64.min(self.max_dice);
            loop {
                if probe(hi)? >= required_rate {
                    break;
                }
                if hi >= self.max_dice {
                    return Err(EngineError::Unreachable {
                        goal,
                        rate: required_rate,
                        max_dice: self.max_dice,
                    });
                }
                lo = hi;
                hi = hi.saturating_mul(2).min(self.max_dice);
            }
            (Some(lo), hi)
        };

        if let Some(mut low) = lo {
            while hi - low > 1 {
                let mid = low + (hi - low) / 2;
                if probe(mid)? >= required_rate {
                    hi = mid;
                } else {
                    low = mid;
                }
            }
            lo = Some(low);
        }

        let rate = probe(hi)?;
        let rate_below = lo.map(|l| probe(l)).transpose()?;

        info!(
            "🎲 {} points at {:.2}% needs {} dice ({} probes)",
            goal,
            required_rate,
            hi,
            probes.len()
        );

        Ok(SolverOutcome {
            goal,
            required_rate,
            dice: hi,
            rate,
            rate_below,
            seed,
            probes: probes.into_values().collect(),
        })
    }
}
