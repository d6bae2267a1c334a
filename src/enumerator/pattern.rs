//! Candidate generation from wildcard patterns.
//!
//! A pattern is a string where `N` or `X` stand for "any decimal digit" and
//! every other character is copied verbatim. A pattern with `k` wildcard
//! positions admits `10^k` distinct substitutions.

use std::collections::HashSet;

use rand::Rng;

use crate::config::PATTERN_WILDCARDS;

/// Total number of distinct substitutions the pattern admits, or `None` when
/// it exceeds `u64` (20+ wildcard positions).
pub fn combination_space(pattern: &str) -> Option<u64> {
    let wildcards = pattern
        .chars()
        .filter(|c| PATTERN_WILDCARDS.contains(c))
        .count();
    10u64.checked_pow(wildcards as u32)
}

/// Generates candidate strings from a wildcard pattern, bounded by
/// `max_count`.
///
/// A pattern without wildcard positions is its own single-candidate set.
/// When the combination space fits the budget, generation is exhaustive in
/// lexicographic digit order, so re-running is reproducible. When the budget
/// is at least half the space, generation is still exhaustive but stops at
/// the budget: reject-sampling near saturation would spin hunting the last
/// few unused tuples. Only genuinely sparse budgets are randomly sampled,
/// without duplicates.
pub fn generate_combinations(pattern: &str, max_count: usize) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let positions: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| PATTERN_WILDCARDS.contains(c))
        .map(|(i, _)| i)
        .collect();

    if positions.is_empty() {
        return vec![pattern.to_string()];
    }

    let budget = max_count as u64;
    match 10u64.checked_pow(positions.len() as u32) {
        Some(total) if total <= budget => exhaustive(&chars, &positions, total),
        Some(total) if budget.saturating_mul(2) >= total => exhaustive(&chars, &positions, budget),
        _ => sample(&chars, &positions, max_count),
    }
}

fn exhaustive(chars: &[char], positions: &[usize], count: u64) -> Vec<String> {
    (0..count).map(|i| substitute(chars, positions, i)).collect()
}

// Writes the base-10 digits of `index`, zero-padded to the wildcard count,
// into the wildcard positions (most significant digit first).
fn substitute(chars: &[char], positions: &[usize], index: u64) -> String {
    let mut out = chars.to_vec();
    let mut rem = index;
    for &pos in positions.iter().rev() {
        out[pos] = (b'0' + (rem % 10) as u8) as char;
        rem /= 10;
    }
    out.into_iter().collect()
}

fn sample(chars: &[char], positions: &[usize], max_count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    let mut seen = HashSet::with_capacity(max_count);
    let mut combinations = Vec::with_capacity(max_count);

    while combinations.len() < max_count {
        let mut candidate = chars.to_vec();
        for &pos in positions {
            candidate[pos] = (b'0' + rng.random_range(0..10u8)) as char;
        }
        let candidate: String = candidate.into_iter().collect();
        if seen.insert(candidate.clone()) {
            combinations.push(candidate);
        }
    }

    combinations
}

/// Generates `count` random numeric labels of the given total length, each
/// starting with `prefix`. Duplicates are possible; this is a quick seed
/// list, not a combinatorial sweep.
pub fn generate_numeric_wordlist(length: usize, prefix: &str, count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    let remaining = length.saturating_sub(prefix.len());

    (0..count)
        .map(|_| {
            let digits: String = (0..remaining)
                .map(|_| (b'0' + rng.random_range(0..10u8)) as char)
                .collect();
            format!("{prefix}{digits}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_without_wildcards_is_single_candidate() {
        assert_eq!(generate_combinations("8613812340007", 100), vec!["8613812340007"]);
    }

    #[test]
    fn exhaustive_generation_is_complete_and_ordered() {
        let combos = generate_combinations("12NN", 100);
        assert_eq!(combos.len(), 100);
        assert_eq!(combos.first().map(String::as_str), Some("1200"));
        assert_eq!(combos.last().map(String::as_str), Some("1299"));
        for (i, combo) in combos.iter().enumerate() {
            assert_eq!(combo, &format!("12{i:02}"));
        }
    }

    #[test]
    fn both_wildcard_markers_are_recognized() {
        let combos = generate_combinations("1X2N", 100);
        assert_eq!(combos.len(), 100);
        assert_eq!(combos.first().map(String::as_str), Some("1020"));
        assert_eq!(combos.last().map(String::as_str), Some("1929"));
    }

    #[test]
    fn near_saturation_budget_truncates_deterministically() {
        // space 10, budget 6: 2*6 >= 10, so take the first six in order
        let combos = generate_combinations("N", 6);
        assert_eq!(combos, vec!["0", "1", "2", "3", "4", "5"]);
    }

    #[test]
    fn sampling_yields_exactly_budget_distinct_matches() {
        let combos = generate_combinations("86NNNNN", 50);
        assert_eq!(combos.len(), 50);

        let distinct: HashSet<&String> = combos.iter().collect();
        assert_eq!(distinct.len(), 50);

        for combo in &combos {
            assert_eq!(combo.len(), 7);
            assert!(combo.starts_with("86"));
            assert!(combo.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn oversized_combination_space_falls_back_to_sampling() {
        // 21 wildcards overflow u64; the sampler must still deliver
        let pattern = "NNNNNNNNNNNNNNNNNNNNN";
        let combos = generate_combinations(pattern, 10);
        assert_eq!(combos.len(), 10);
        for combo in &combos {
            assert_eq!(combo.len(), pattern.len());
        }
    }

    #[test]
    fn numeric_wordlist_has_requested_shape() {
        let words = generate_numeric_wordlist(11, "86", 20);
        assert_eq!(words.len(), 20);
        for word in &words {
            assert_eq!(word.len(), 11);
            assert!(word.starts_with("86"));
            assert!(word.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
