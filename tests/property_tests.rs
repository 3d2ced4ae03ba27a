use dice_companion::board::{Board, GameRules, Tile};
use dice_companion::ledger::SimResult;
use dice_companion::rules::{MilestoneTable, Milestones};
use dice_companion::simulator::{simulate_single_run, MultiplierPolicy};
use fastrand::Rng;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Score(u64),
    Rolls(u64),
    Bonus(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..5_000).prop_map(Op::Score),
        (0u64..30).prop_map(Op::Rolls),
        (0u64..4).prop_map(Op::Bonus),
    ]
}

/// Cursor implied by `value` from scratch: index of the last threshold met.
fn expected_cursor(table: &MilestoneTable, value: u64) -> Option<usize> {
    table.thresholds.iter().rposition(|t| *t <= value)
}

proptest! {
    #[test]
    fn prop_ledger_stays_consistent(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let m = Milestones::reference();
        let mut r = SimResult::new();
        let mut granted = 0u64;
        let mut prev_cursors = (None, None);

        for op in ops {
            match op {
                Op::Score(a) => r.credit_score(&m, a),
                Op::Rolls(a) => r.credit_rolls(&m, a),
                Op::Bonus(a) => {
                    r.grant_bonus_dice(a);
                    granted += a;
                }
            }

            // Cursors never move backwards.
            prop_assert!(r.score_cursor >= prev_cursors.0);
            prop_assert!(r.roll_cursor >= prev_cursors.1);
            prev_cursors = (r.score_cursor, r.roll_cursor);

            // Exactly the thresholds at or below the running totals are met.
            prop_assert_eq!(r.score_cursor, expected_cursor(&m.score, r.score));
            prop_assert_eq!(r.roll_cursor, expected_cursor(&m.rolls, r.rolls_done));

            // Every roll was paid for by the budget or by a bonus die.
            let earned = granted
                + m.score.total_reward_at(r.score)
                + m.rolls.total_reward_at(r.rolls_done);
            prop_assert_eq!(r.rolls_done, r.initial_dice_consumed + (earned - r.bonus_dice));
        }
    }

    #[test]
    fn prop_advance_wraps_onto_board(len in 1usize..40, pos in 0usize..40, steps in 0u64..10_000) {
        let board = Board::new(vec![Tile::points(1); len], vec![1; len]).unwrap();
        let start = pos % len;
        let next = board.advance(start, steps);
        prop_assert!(next < len);
        prop_assert_eq!(next, (start + steps as usize) % len);
    }

    #[test]
    fn prop_run_never_overspends_budget(seed in any::<u64>(), dice in 0u64..400) {
        let rules = GameRules::reference();
        let policy = MultiplierPolicy::reference();
        let mut rng = Rng::with_seed(seed);
        let run = simulate_single_run(&rules, &policy, &mut rng, dice, u64::MAX, None);

        prop_assert_eq!(run.initial_dice_consumed, dice);
        prop_assert!(run.rolls_done >= dice);
        prop_assert!(run.position < rules.board.len());
        prop_assert!(run.score_cursor == expected_cursor(&rules.milestones.score, run.score));
    }
}
