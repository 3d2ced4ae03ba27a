use crate::error::{EngineError, EngineResult};
use crate::simulator::{GapBand, MultiplierPolicy, TurnBand};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub sim: SimulationParams,
    #[command(flatten)]
    pub policy: PolicyParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Simulated runs per estimate
    #[arg(long, default_value_t = 10_000)]
    pub trials: usize,

    /// Base seed; each trial derives its own stream from it
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to all cores)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: None,
            threads: None,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParams {
    /// "turns:cap" pairs; below `turns` remaining the multiplier is capped at `cap`
    #[arg(long, default_value = "20:1,30:2,50:3,100:5")]
    pub turn_bands: String,

    /// Remaining-gap limits paired with the turn bands for the near-milestone pass
    #[arg(long, default_value = "2,3,4,6")]
    pub gap_bands: String,

    /// Skip the extra pass that spends leftover dice on a nearby roll milestone
    #[arg(long, default_value_t = false)]
    pub no_corrective_pass: bool,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            turn_bands: "20:1,30:2,50:3,100:5".to_string(),
            gap_bands: "2,3,4,6".to_string(),
            no_corrective_pass: false,
        }
    }
}

impl PolicyParams {
    pub fn to_policy(&self) -> EngineResult<MultiplierPolicy> {
        let turn_bands = parse_turn_bands(&self.turn_bands)?;
        let gaps = parse_u64_list(&self.gap_bands, "gap_bands")?;
        if gaps.len() != turn_bands.len() {
            return Err(EngineError::Config(format!(
                "--gap-bands needs {} values (one per turn band), got {}",
                turn_bands.len(),
                gaps.len()
            )));
        }

        let gap_bands = turn_bands
            .iter()
            .zip(gaps)
            .map(|(t, below_gap)| GapBand {
                below_turns: t.below_turns,
                below_gap,
                cap: t.cap,
            })
            .collect();

        MultiplierPolicy::new(turn_bands, gap_bands, !self.no_corrective_pass)
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Give up once the search would need more dice than this
    #[arg(long, default_value_t = 1_000_000)]
    pub max_dice: u64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_dice: 1_000_000,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn parse_turn_bands(s: &str) -> EngineResult<Vec<TurnBand>> {
    s.split(',')
        .filter(|p| !p.trim().is_empty())
        .map(|pair| {
            let (turns, cap) = pair.trim().split_once(':').ok_or_else(|| {
                EngineError::Config(format!("turn band '{}' is not 'turns:cap'", pair))
            })?;
            Ok(TurnBand {
                below_turns: parse_number(turns, "turn_bands")?,
                cap: parse_number(cap, "turn_bands")?,
            })
        })
        .collect()
}

fn parse_u64_list(s: &str, name: &str) -> EngineResult<Vec<u64>> {
    s.split(',')
        .filter(|p| !p.trim().is_empty())
        .map(|p| parse_number(p, name))
        .collect()
}

fn parse_number<T: std::str::FromStr>(s: &str, name: &str) -> EngineResult<T> {
    s.trim()
        .parse()
        .map_err(|_| EngineError::Config(format!("Invalid number '{}' in --{}", s.trim(), name)))
}
