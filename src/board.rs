use crate::error::{EngineError, EngineResult};
use crate::ledger::SimResult;
use crate::random::weighted_choice;
use crate::rules::Milestones;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, IntoStaticStr};

// === GRAND PRIZE ===
// Non-dice prizes (keys, wishes, gems, shovels) are folded into "nothing".
const GRAND_PRIZE_DICE: [u64; 3] = [0, 2, 1];
const GRAND_PRIZE_WEIGHTS: [f64; 3] = [666.0 + 2666.0 + 2666.0 + 666.0, 666.0, 2666.0];

// === POINT WHEEL ===
const POINT_WHEEL_POINTS: [u64; 4] = [100, 200, 500, 1000];
const POINT_WHEEL_POINT_WEIGHTS: [f64; 4] = [3478.0, 3478.0, 2608.0, 434.0];
const POINT_WHEEL_FACTORS: [u64; 3] = [1, 3, 5];
const POINT_WHEEL_FACTOR_WEIGHTS: [f64; 3] = [6153.0, 3076.0, 769.0];

// === FATE WHEEL ===
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FateOutcome {
    Points(u64),
    Dice(u64),
    Nothing,
}

const FATE_OUTCOMES: [FateOutcome; 3] = [
    FateOutcome::Points(500),
    FateOutcome::Dice(1),
    FateOutcome::Nothing,
];
const FATE_WEIGHTS: [f64; 3] = [2500.0, 1500.0, 300.0 + 700.0 + 5000.0];

/// A board square. Tiles carry no per-run state; any randomness is resolved
/// when the reward is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tile {
    Flat {
        #[serde(default)]
        points: u64,
        #[serde(default)]
        gems: u64,
        #[serde(default)]
        dice: u64,
    },
    GrandPrize,
    PointWheel,
    FateWheel,
}

impl Tile {
    pub const fn flat(points: u64, gems: u64, dice: u64) -> Self {
        Tile::Flat { points, gems, dice }
    }

    pub const fn points(points: u64) -> Self {
        Tile::Flat {
            points,
            gems: 0,
            dice: 0,
        }
    }

    /// Credits this tile's reward, scaled by `multiplier`, to the ledger.
    #[inline(always)]
    pub fn apply_reward(
        &self,
        rng: &mut Rng,
        milestones: &Milestones,
        multiplier: u64,
        result: &mut SimResult,
    ) {
        match *self {
            Tile::Flat { points, gems, dice } => {
                result.credit_score(milestones, points * multiplier);
                result.gems += gems * multiplier;
                result.grant_bonus_dice(dice * multiplier);
            }
            Tile::GrandPrize => {
                let dice = weighted_choice(rng, &GRAND_PRIZE_DICE, &GRAND_PRIZE_WEIGHTS);
                result.grant_bonus_dice(dice * multiplier);
            }
            Tile::PointWheel => {
                let base = weighted_choice(rng, &POINT_WHEEL_POINTS, &POINT_WHEEL_POINT_WEIGHTS);
                let factor =
                    weighted_choice(rng, &POINT_WHEEL_FACTORS, &POINT_WHEEL_FACTOR_WEIGHTS);
                result.credit_score(milestones, base * factor * multiplier);
            }
            Tile::FateWheel => match *weighted_choice(rng, &FATE_OUTCOMES, &FATE_WEIGHTS) {
                FateOutcome::Points(p) => result.credit_score(milestones, p * multiplier),
                FateOutcome::Dice(d) => result.grant_bonus_dice(d * multiplier),
                FateOutcome::Nothing => {}
            },
        }
    }

    /// Short human-readable summary of what landing here pays out.
    pub fn describe(&self) -> String {
        match *self {
            Tile::Flat {
                points: 0,
                gems: 0,
                dice: 0,
            } => "-".to_string(),
            Tile::Flat { points, gems, dice } => {
                let mut parts = Vec::new();
                if points > 0 {
                    parts.push(format!("{} pts", points));
                }
                if gems > 0 {
                    parts.push(format!("{} gems", gems));
                }
                if dice > 0 {
                    parts.push(format!("{} dice", dice));
                }
                parts.join(", ")
            }
            Tile::GrandPrize => "0 / +1 / +2 dice".to_string(),
            Tile::PointWheel => "100-1000 pts x1/x3/x5".to_string(),
            Tile::FateWheel => "+500 pts / +1 die".to_string(),
        }
    }
}

/// Fixed ring of tiles with a per-tile multiplier ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub tiles: Vec<Tile>,
    pub multiplier_caps: Vec<u64>,
}

impl Board {
    pub fn new(tiles: Vec<Tile>, multiplier_caps: Vec<u64>) -> EngineResult<Self> {
        let board = Self {
            tiles,
            multiplier_caps,
        };
        board.validate()?;
        Ok(board)
    }

    /// The 24-tile board the reference tables were measured on.
    pub fn reference() -> Self {
        let tiles = vec![
            Tile::points(400),
            Tile::flat(0, 50, 0),
            Tile::points(50),
            Tile::points(400),
            Tile::points(800),
            Tile::points(50),
            Tile::flat(0, 0, 2),
            Tile::flat(0, 50, 0),
            Tile::GrandPrize,
            Tile::points(0),
            Tile::PointWheel,
            Tile::points(50),
            Tile::points(200),
            Tile::points(0),
            Tile::flat(0, 0, 2),
            Tile::points(200),
            Tile::points(800),
            Tile::points(0),
            Tile::points(50),
            Tile::points(200),
            Tile::PointWheel,
            Tile::points(0),
            Tile::FateWheel,
            Tile::points(200),
        ];
        let multiplier_caps = vec![
            1, 1, 1, 1, 1, 1, 1, 1, 10, 10, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 10, 10, 10, 1,
        ];
        Self {
            tiles,
            multiplier_caps,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.tiles.is_empty() {
            return Err(EngineError::Config("board has no tiles".to_string()));
        }
        if self.tiles.len() != self.multiplier_caps.len() {
            return Err(EngineError::Config(format!(
                "board has {} tiles but {} multiplier caps",
                self.tiles.len(),
                self.multiplier_caps.len()
            )));
        }
        if let Some(i) = self.multiplier_caps.iter().position(|&c| c == 0) {
            return Err(EngineError::Config(format!(
                "tile {} has a multiplier cap of 0",
                i
            )));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline(always)]
    pub fn tile(&self, position: usize) -> &Tile {
        &self.tiles[position]
    }

    #[inline(always)]
    pub fn multiplier_cap(&self, position: usize) -> u64 {
        self.multiplier_caps[position]
    }

    /// Position after moving `steps` squares forward, wrapping around.
    #[inline(always)]
    pub fn advance(&self, position: usize, steps: u64) -> usize {
        ((position as u64 + steps) % self.tiles.len() as u64) as usize
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::reference()
    }
}

/// Board plus milestone ladders: everything a trial reads but never mutates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    #[serde(default)]
    pub board: Board,
    #[serde(default)]
    pub milestones: Milestones,
}

impl GameRules {
    pub fn reference() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.board.validate()?;
        self.milestones.validate()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path)?;
        let rules: GameRules = serde_json::from_str(&content)?;
        rules.validate()?;
        Ok(rules)
    }
}
