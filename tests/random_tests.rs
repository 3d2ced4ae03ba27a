use dice_companion::random::{roll_two_dice, uniform_int, weighted_choice};
use fastrand::Rng;
use rstest::rstest;

#[rstest]
#[case(1, 6)]
#[case(0, 0)]
#[case(-3, 3)]
#[case(100, 101)]
fn test_uniform_int_covers_inclusive_range(#[case] min: i64, #[case] max: i64) {
    let mut rng = Rng::with_seed(11);
    let mut seen = vec![false; (max - min + 1) as usize];
    for _ in 0..10_000 {
        let v = uniform_int(&mut rng, min, max);
        assert!(v >= min && v <= max, "{} outside [{}, {}]", v, min, max);
        seen[(v - min) as usize] = true;
    }
    assert!(seen.iter().all(|s| *s), "not every value in [{}, {}] drawn", min, max);
}

#[test]
fn test_two_dice_are_triangular() {
    let mut rng = Rng::with_seed(5);
    let mut counts = [0usize; 13];
    let n = 120_000;
    for _ in 0..n {
        counts[roll_two_dice(&mut rng) as usize] += 1;
    }
    assert_eq!(counts[0] + counts[1], 0);
    // 7 is six times as likely as 2 or 12.
    let p7 = counts[7] as f64 / n as f64;
    let p2 = counts[2] as f64 / n as f64;
    assert!((p7 - 6.0 / 36.0).abs() < 0.01, "p(7) = {}", p7);
    assert!((p2 - 1.0 / 36.0).abs() < 0.005, "p(2) = {}", p2);
}

#[test]
fn test_weighted_choice_never_picks_zero_weight() {
    let mut rng = Rng::with_seed(42);
    let items = ["a", "b", "c"];
    for _ in 0..100_000 {
        assert_eq!(*weighted_choice(&mut rng, &items, &[1.0, 0.0, 0.0]), "a");
    }
}

#[test]
fn test_weighted_choice_follows_weights() {
    let mut rng = Rng::with_seed(9);
    let items = [0usize, 1];
    let mut counts = [0usize; 2];
    let n = 100_000;
    for _ in 0..n {
        counts[*weighted_choice(&mut rng, &items, &[1.0, 3.0])] += 1;
    }
    let share = counts[1] as f64 / n as f64;
    assert!((share - 0.75).abs() < 0.01, "heavy item share {}", share);
}

#[test]
fn test_weighted_choice_single_item() {
    let mut rng = Rng::with_seed(1);
    assert_eq!(*weighted_choice(&mut rng, &[7], &[0.5]), 7);
}

#[test]
#[should_panic]
fn test_weighted_choice_rejects_length_mismatch() {
    let mut rng = Rng::with_seed(1);
    weighted_choice(&mut rng, &[1, 2, 3], &[1.0, 1.0]);
}

#[test]
#[should_panic]
fn test_weighted_choice_rejects_zero_mass() {
    let mut rng = Rng::with_seed(1);
    weighted_choice(&mut rng, &[1, 2, 3], &[0.0, 0.0, 0.0]);
}
