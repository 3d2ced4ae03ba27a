use regex::Regex;
use std::fs;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dice-companion"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn parse_percent(stdout: &str, label: &str) -> f64 {
    let re = Regex::new(&format!(r"{}: ([0-9]+\.[0-9]+)%", label)).unwrap();
    let caps = re
        .captures(stdout)
        .unwrap_or_else(|| panic!("no '{}' line in output:\n{}", label, stdout));
    caps[1].parse().unwrap()
}

#[test]
fn test_chance_reports_haircut_rate() {
    let output = run_cli(&[
        "chance", "--goal", "20000", "--dice", "1000", "--trials", "200", "--seed", "1",
    ]);
    assert!(output.status.success(), "{:?}", output);
    let rate = parse_percent(&stdout_of(&output), "Success Rate");
    assert!((rate - 99.5).abs() < 1e-9, "rate was {}", rate);
}

#[test]
fn test_chance_is_reproducible_with_seed() {
    let args = [
        "chance", "--goal", "20000", "--dice", "60", "--trials", "500", "--seed", "42",
    ];
    let a = parse_percent(&stdout_of(&run_cli(&args)), "Success Rate");
    let b = parse_percent(&stdout_of(&run_cli(&args)), "Success Rate");
    assert_eq!(a, b);
}

#[test]
fn test_chance_rejects_tile_off_board() {
    let output = run_cli(&["chance", "--goal", "20000", "--dice", "10", "--tile", "99"]);
    assert!(!output.status.success());
}

#[test]
fn test_dice_finds_a_count() {
    let output = run_cli(&[
        "dice", "--goal", "5000", "--rate", "90", "--trials", "500", "--seed", "3",
    ]);
    assert!(output.status.success(), "{:?}", output);
    let re = Regex::new(r"Dice Needed: (\d+)").unwrap();
    let stdout = stdout_of(&output);
    let dice: u64 = re.captures(&stdout).expect("Dice Needed line")[1]
        .parse()
        .unwrap();
    assert!(dice > 0);
}

#[test]
fn test_dice_rejects_certainty() {
    let output = run_cli(&["dice", "--goal", "20000", "--rate", "100"]);
    assert!(!output.status.success());
}

#[test]
fn test_board_lists_every_tile() {
    let output = run_cli(&["board"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("GrandPrize"));
    assert!(stdout.contains("PointWheel"));
    assert!(stdout.contains("FateWheel"));
}

#[test]
fn test_quests_remaining_dice() {
    let output = run_cli(&["quests", "--progress", "kill_bosses=10"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Dice Remaining: 140"));
}

#[test]
fn test_quests_unknown_name_fails() {
    let output = run_cli(&["quests", "--progress", "fishing=3"]);
    assert!(!output.status.success());
}

#[test]
fn test_rate_prints_percentile() {
    let output = run_cli(&[
        "rate", "--points", "20000", "--rolls", "150", "--board-dice", "10", "--trials", "500",
        "--seed", "7",
    ]);
    assert!(output.status.success(), "{:?}", output);
    let p = parse_percent(&stdout_of(&output), "Percentile");
    assert!((0.0..=100.0).contains(&p));
}

#[test]
fn test_sweep_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("sweep.csv");
    let output = run_cli(&[
        "sweep",
        "--goal",
        "20000",
        "--from",
        "50",
        "--to",
        "150",
        "--step",
        "50",
        "--trials",
        "200",
        "--seed",
        "1",
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);

    let body = fs::read_to_string(&csv_path).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("goal,dice,trials,successes,successRate")
    );
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_custom_rules_file() {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("rules.json");
    fs::write(
        &rules,
        r#"{"board":{"tiles":[{"kind":"flat","points":1000}],"multiplier_caps":[1]}}"#,
    )
    .unwrap();

    let output = run_cli(&[
        "--rules",
        rules.to_str().unwrap(),
        "chance",
        "--goal",
        "20000",
        "--dice",
        "20",
        "--trials",
        "200",
    ]);
    assert!(output.status.success(), "{:?}", output);
    let rate = parse_percent(&stdout_of(&output), "Success Rate");
    assert!((rate - 99.5).abs() < 1e-9);
}
