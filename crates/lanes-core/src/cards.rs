//! Cards and the deck builder.
//!
//! A card is an unordered set of 2-4 distinct colors and is immutable once
//! drawn. The deck is the multiset of all 2-, 3-, and 4-color combinations,
//! each bucket replicated up to a weighted share of the target deck size and
//! shuffled with the caller's RNG so a fixed seed reproduces the same deck.

use crate::board::Color;
use crate::rules::Rules;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A card holding 2-4 distinct colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub colors: Vec<Color>,
}

impl Card {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Whether the card carries the given color
    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Compact display code, e.g. "YG" or "ROBV"
    pub fn code(&self) -> String {
        self.colors.iter().map(|c| c.code()).collect()
    }
}

/// All k-element combinations of `items`, in lexicographic order
fn combinations(items: &[Color], k: usize) -> Vec<Vec<Color>> {
    let mut result = Vec::new();
    let mut combo = Vec::with_capacity(k);
    fn backtrack(
        items: &[Color],
        k: usize,
        start: usize,
        combo: &mut Vec<Color>,
        result: &mut Vec<Vec<Color>>,
    ) {
        if combo.len() == k {
            result.push(combo.clone());
            return;
        }
        for i in start..items.len() {
            combo.push(items[i]);
            backtrack(items, k, i + 1, combo, result);
            combo.pop();
        }
    }
    backtrack(items, k, 0, &mut combo, &mut result);
    result
}

/// Cycle through `combos` until `target` cards have been produced
fn repeat_cycling(combos: &[Vec<Color>], target: usize) -> Vec<Card> {
    let mut out = Vec::with_capacity(target);
    let mut i = 0;
    while out.len() < target && !combos.is_empty() {
        out.push(Card::new(combos[i % combos.len()].clone()));
        i += 1;
    }
    out
}

/// Build and shuffle the deck for one game.
///
/// Bucket targets are the configured weights scaled proportionally to
/// `deck_size`; the four-color bucket absorbs the rounding remainder so the
/// total comes out exact. Deterministic for a fixed RNG seed.
pub fn build_deck<R: Rng>(rules: &Rules, rng: &mut R) -> Vec<Card> {
    let pairs = combinations(&Color::ALL, 2);
    let triples = combinations(&Color::ALL, 3);
    let quads = combinations(&Color::ALL, 4);

    let counts = &rules.deck_counts;
    let total_weight = (counts.two_color + counts.three_color + counts.four_color).max(1) as f64;
    let target = rules.deck_size.max(1);

    let t2 = ((counts.two_color as f64 / total_weight) * target as f64).round() as usize;
    let t3 = ((counts.three_color as f64 / total_weight) * target as f64).round() as usize;
    let t4 = target.saturating_sub(t2 + t3);

    let mut deck = Vec::with_capacity(target);
    deck.extend(repeat_cycling(&pairs, t2));
    deck.extend(repeat_cycling(&triples, t3));
    deck.extend(repeat_cycling(&quads, t4));

    deck.shuffle(rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_combination_counts() {
        assert_eq!(combinations(&Color::ALL, 2).len(), 15);
        assert_eq!(combinations(&Color::ALL, 3).len(), 20);
        assert_eq!(combinations(&Color::ALL, 4).len(), 15);
    }

    #[test]
    fn test_combinations_have_distinct_colors() {
        for combo in combinations(&Color::ALL, 3) {
            let mut seen = [false; 6];
            for c in combo {
                assert!(!seen[c as usize]);
                seen[c as usize] = true;
            }
        }
    }

    #[test]
    fn test_deck_matches_target_size() {
        let rules = Rules::hex();
        let mut rng = StdRng::seed_from_u64(7);
        let deck = build_deck(&rules, &mut rng);
        assert_eq!(deck.len(), rules.deck_size);
    }

    #[test]
    fn test_deck_bucket_proportions() {
        // Weights 36/18/6 over a 100-card deck give 60/30/10
        let rules = Rules::hex();
        let mut rng = StdRng::seed_from_u64(7);
        let deck = build_deck(&rules, &mut rng);

        let twos = deck.iter().filter(|c| c.colors.len() == 2).count();
        let threes = deck.iter().filter(|c| c.colors.len() == 3).count();
        let fours = deck.iter().filter(|c| c.colors.len() == 4).count();
        assert_eq!((twos, threes, fours), (60, 30, 10));
    }

    #[test]
    fn test_deck_is_deterministic_for_fixed_seed() {
        let rules = Rules::hex();
        let deck_a = build_deck(&rules, &mut StdRng::seed_from_u64(42));
        let deck_b = build_deck(&rules, &mut StdRng::seed_from_u64(42));
        assert_eq!(deck_a, deck_b);

        let deck_c = build_deck(&rules, &mut StdRng::seed_from_u64(43));
        assert_ne!(deck_a, deck_c);
    }

    #[test]
    fn test_card_code() {
        let card = Card::new(vec![Color::Yellow, Color::Green]);
        assert_eq!(card.code(), "YG");
        assert!(card.has_color(Color::Yellow));
        assert!(!card.has_color(Color::Red));
    }
}
