use rand::seq::SliceRandom;
use rand::RngCore;

use crate::quiz::AnswerValue;

/// How far from the correct value the first window reaches on each side.
pub const WINDOW_RADIUS: i64 = 2;

/// Wrong answers drawn from a window around `correct`, never below 1.
///
/// Starts from `[max(1, correct - 2), correct + 2]` and widens the window one step on
/// each side until it holds at least `amount` values other than `correct`, then samples
/// without replacement. Always terminates, even for a correct value of 0 or 1.
pub fn nearby_numbers(correct: i64, amount: usize, rng: &mut dyn RngCore) -> Vec<i64> {
    let mut radius = WINDOW_RADIUS;
    let mut candidates = window(correct, radius);
    while candidates.len() < amount {
        radius += 1;
        candidates = window(correct, radius);
    }

    candidates
        .choose_multiple(rng, amount)
        .copied()
        .collect()
}

/// Same as [`nearby_numbers`], ready to go into answer slots.
pub fn nearby_answers(correct: i64, amount: usize, rng: &mut dyn RngCore) -> Vec<AnswerValue> {
    nearby_numbers(correct, amount, rng)
        .into_iter()
        .map(AnswerValue::Number)
        .collect()
}

fn window(correct: i64, radius: i64) -> Vec<i64> {
    let low = (correct - radius).max(1);
    let high = correct + radius;
    (low..=high).filter(|n| *n != correct).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_distinct(numbers: &[i64]) {
        let mut sorted = numbers.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), numbers.len(), "repeated value in {:?}", numbers);
    }

    #[test]
    fn test_album_count_of_three_stays_in_one_to_five() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let numbers = nearby_numbers(3, 3, &mut rng);
            assert_eq!(numbers.len(), 3);
            assert_distinct(&numbers);
            assert!(numbers.iter().all(|n| (1..=5).contains(n) && *n != 3));
        }
    }

    #[test]
    fn test_years_stay_within_two() {
        let mut rng = StdRng::seed_from_u64(1994);
        for _ in 0..50 {
            let numbers = nearby_numbers(1994, 3, &mut rng);
            assert_distinct(&numbers);
            assert!(numbers.iter().all(|n| (1992..=1996).contains(n) && *n != 1994));
        }
    }

    #[test]
    fn test_small_values_widen_the_window() {
        let mut rng = StdRng::seed_from_u64(0);

        // [1, 3] only holds 2 and 3, so the window grows to [1, 4]
        let mut numbers = nearby_numbers(1, 3, &mut rng);
        numbers.sort();
        assert_eq!(numbers, vec![2, 3, 4]);

        // [1, 2] holds 1 and 2, grows to [1, 3]
        let mut numbers = nearby_numbers(0, 3, &mut rng);
        numbers.sort();
        assert_eq!(numbers, vec![1, 2, 3]);

        let mut numbers = nearby_numbers(2, 3, &mut rng);
        assert_distinct(&numbers);
        numbers.retain(|n| (1..=4).contains(n) && *n != 2);
        assert_eq!(numbers.len(), 3);
    }

    #[test]
    fn test_same_seed_same_numbers() {
        let first = nearby_numbers(2001, 3, &mut StdRng::seed_from_u64(42));
        let second = nearby_numbers(2001, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
