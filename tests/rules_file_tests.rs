use dice_companion::board::{GameRules, Tile};
use dice_companion::config::Config;
use dice_companion::error::EngineError;
use dice_companion::simulator::runner::{MonteCarlo, StartingState, TrialOptions};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = File::create(&path).unwrap();
    write!(f, "{}", body).unwrap();
    path
}

#[test]
fn test_custom_board_loads_with_reference_milestones() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "rules.json",
        r#"{"board":{"tiles":[{"kind":"flat","points":1000}],"multiplier_caps":[1]}}"#,
    );

    let rules = GameRules::load_from_file(&path).unwrap();
    assert_eq!(rules.board.len(), 1);
    assert_eq!(rules.board.tile(0), &Tile::points(1_000));
    assert_eq!(rules.milestones, GameRules::reference().milestones);

    // 20 rolls at 1,000 points each always reach 20,000.
    let mc = MonteCarlo::new(
        Arc::new(rules),
        Default::default(),
        TrialOptions {
            trials: 200,
            seed: Some(1),
            num_threads: None,
        },
    )
    .unwrap();
    let rate = mc.success_rate(20_000, 20, &StartingState::default()).unwrap();
    assert!((rate - 99.5).abs() < 1e-9, "rate was {}", rate);
}

#[test]
fn test_wheel_tiles_parse_by_kind() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "rules.json",
        r#"{"board":{"tiles":[{"kind":"grand_prize"},{"kind":"point_wheel"},{"kind":"fate_wheel"},{"kind":"flat","dice":2}],"multiplier_caps":[1,10,1,1]}}"#,
    );
    let rules = GameRules::load_from_file(&path).unwrap();
    assert_eq!(rules.board.tile(0), &Tile::GrandPrize);
    assert_eq!(rules.board.tile(1), &Tile::PointWheel);
    assert_eq!(rules.board.tile(2), &Tile::FateWheel);
    assert_eq!(rules.board.tile(3), &Tile::flat(0, 0, 2));
    assert_eq!(rules.board.multiplier_cap(1), 10);
}

#[test]
fn test_mismatched_caps_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "rules.json",
        r#"{"board":{"tiles":[{"kind":"flat","points":100},{"kind":"flat","points":200}],"multiplier_caps":[1]}}"#,
    );
    let err = GameRules::load_from_file(&path).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)), "got {:?}", err);
}

#[test]
fn test_unsorted_milestones_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "rules.json",
        r#"{"milestones":{"score":{"thresholds":[500,100],"rewards":[1,1]},"rolls":{"thresholds":[5],"rewards":[1]}}}"#,
    );
    let err = GameRules::load_from_file(&path).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "rules.json", "{ board: ");
    assert!(matches!(
        GameRules::load_from_file(&path),
        Err(EngineError::Json(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        GameRules::load_from_file(dir.path().join("nope.json")),
        Err(EngineError::Io(_))
    ));
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "config.json",
        r#"{"sim":{"trials":500,"seed":9},"policy":{"no_corrective_pass":true}}"#,
    );
    let cfg = Config::load_from_file(&path).unwrap();
    assert_eq!(cfg.sim.trials, 500);
    assert_eq!(cfg.sim.seed, Some(9));
    assert_eq!(cfg.sim.threads, None);

    let policy = cfg.policy.to_policy().unwrap();
    assert!(!policy.corrective_pass);
    assert_eq!(policy.turn_bands.len(), 4);
}
