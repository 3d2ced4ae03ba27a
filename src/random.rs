use fastrand::Rng;

/// Returns an integer uniformly distributed over `[min, max]`.
#[inline(always)]
pub fn uniform_int(rng: &mut Rng, min: i64, max: i64) -> i64 {
    rng.i64(min..=max)
}

/// Two six-sided dice summed (2..=12, triangular).
#[inline(always)]
pub fn roll_two_dice(rng: &mut Rng) -> u64 {
    (uniform_int(rng, 1, 6) + uniform_int(rng, 1, 6)) as u64
}

/// Picks one item with probability proportional to its weight.
///
/// Weight tables are hard-coded board data, so a malformed table (length
/// mismatch, negative entries, zero total mass) panics instead of returning
/// an error. If float rounding leaves the draw unmatched, the last item wins.
pub fn weighted_choice<'a, T>(rng: &mut Rng, items: &'a [T], weights: &[f64]) -> &'a T {
    assert!(!items.is_empty(), "weighted_choice called with no items");
    assert_eq!(
        items.len(),
        weights.len(),
        "weighted_choice: {} items but {} weights",
        items.len(),
        weights.len()
    );

    let total: f64 = weights.iter().sum();
    assert!(
        weights.iter().all(|w| *w >= 0.0) && total > 0.0 && total.is_finite(),
        "weighted_choice: weights must be non-negative with positive total, got {:?}",
        weights
    );

    let mut r = rng.f64() * total;
    for (item, &w) in items.iter().zip(weights) {
        if r < w {
            return item;
        }
        r -= w;
    }
    &items[items.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_stays_in_range() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..10_000 {
            let r = roll_two_dice(&mut rng);
            assert!((2..=12).contains(&r));
        }
    }

    #[test]
    #[should_panic]
    fn all_zero_weights_panic() {
        let mut rng = Rng::with_seed(1);
        weighted_choice(&mut rng, &[1, 2], &[0.0, 0.0]);
    }
}
