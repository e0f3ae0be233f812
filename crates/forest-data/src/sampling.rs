//! Small sampling helpers shared by the generators.

use rand::Rng;

/// Picks one option with probability proportional to its weight.
///
/// Weights need not sum to one. Falls back to the last option if rounding
/// leaves the roll past the cumulative total.
pub fn weighted_choice<T: Copy>(options: &[(T, f64)], rng: &mut impl Rng) -> T {
    let total: f64 = options.iter().map(|(_, weight)| weight).sum();
    let roll = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;

    for &(option, weight) in options {
        cumulative += weight;
        if roll < cumulative {
            return option;
        }
    }

    options[options.len() - 1].0
}

/// Rescales values in place so they sum to 100.
///
/// A zero total splits evenly.
pub fn normalize_to_percent(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        for value in values.iter_mut() {
            *value = *value / total * 100.0;
        }
    } else if !values.is_empty() {
        let even = 100.0 / values.len() as f64;
        values.iter_mut().for_each(|value| *value = even);
    }
}

/// Draws from `[low, high)` and scales `base` by it, truncating toward zero.
pub fn scaled_count(base: u32, low: f64, high: f64, rng: &mut impl Rng) -> u32 {
    (base as f64 * rng.gen_range(low..high)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_weighted_choice_respects_weights() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(12345);
        let options = [(1u8, 0.3), (2, 0.4), (3, 0.3)];

        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[(weighted_choice(&options, &mut rng) - 1) as usize] += 1;
        }

        assert!(counts[1] > counts[0], "Medium weight should dominate: {counts:?}");
        assert!(counts[1] > counts[2], "Medium weight should dominate: {counts:?}");
        assert!((3600..4400).contains(&counts[1]), "{counts:?}");
    }

    #[test]
    fn test_zero_weight_never_chosen() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_ne!(weighted_choice(&[('a', 0.0), ('b', 1.0)], &mut rng), 'a');
        }
    }

    #[test]
    fn test_normalize_to_percent() {
        let mut values = [30.0, 40.0, 30.0];
        normalize_to_percent(&mut values);
        assert!((values[1] - 40.0).abs() < 1e-9);

        let mut values = [1.0, 1.0, 2.0];
        normalize_to_percent(&mut values);
        assert!((values.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!((values[2] - 50.0).abs() < 1e-9);

        let mut zeros = [0.0, 0.0, 0.0];
        normalize_to_percent(&mut zeros);
        assert!((zeros.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }
}
