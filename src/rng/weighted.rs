//! Weighted selection over ordered tables.
//!
//! Selection walks entries in declaration order, so the order of a table is part
//! of its contract: the same seed and the same table always pick the same entry.

use super::sampling::unit;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A candidate and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighted<T> {
    pub item: T,
    pub weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(item: T, weight: f64) -> Self {
        Self { item, weight }
    }
}

/// Sum of all weights in the slice.
pub fn total_weight<T>(entries: &[Weighted<T>]) -> f64 {
    entries.iter().map(|entry| entry.weight).sum()
}

/// Picks the index of one entry with probability proportional to its weight.
///
/// Draws `r` in [0, W) and subtracts weights in order; the first entry that
/// brings the remainder to `<= 0` wins, so `r == weight` resolves to the current
/// entry. If rounding leaves the walk unresolved, the last entry is returned.
/// Empty tables and tables whose total weight is not positive return `None`
/// without drawing.
pub fn weighted_index<T>(entries: &[Weighted<T>], rng: &mut impl Rng) -> Option<usize> {
    let total = total_weight(entries);
    // `!(total > 0.0)` also rejects NaN totals.
    if entries.is_empty() || !(total > 0.0) {
        debug!(
            "weighted selection skipped: {} entries, total weight {}",
            entries.len(),
            total
        );
        return None;
    }

    let mut remaining = unit(rng) * total;
    for (index, entry) in entries.iter().enumerate() {
        remaining -= entry.weight;
        if remaining <= 0.0 {
            return Some(index);
        }
    }

    Some(entries.len() - 1)
}

/// Picks one item with probability proportional to its weight.
pub fn weighted_choice<'a, T>(entries: &'a [Weighted<T>], rng: &mut impl Rng) -> Option<&'a T> {
    weighted_index(entries, rng).map(|index| &entries[index].item)
}

/// Ordered weighted set, used for drop tables and biome task pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedTable<T> {
    entries: Vec<Weighted<T>>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> WeightedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry at the end of the walk order.
    pub fn push(&mut self, item: T, weight: f64) {
        self.entries.push(Weighted::new(item, weight));
    }

    pub fn with(mut self, item: T, weight: f64) -> Self {
        self.push(item, weight);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weighted<T>> {
        self.entries.iter()
    }

    pub fn total_weight(&self) -> f64 {
        total_weight(&self.entries)
    }

    /// Fraction of the total weight held by the entry at `index`.
    ///
    /// Returns `None` for an out-of-range index or a table with no positive weight.
    pub fn share_of(&self, index: usize) -> Option<f64> {
        let total = self.total_weight();
        if !(total > 0.0) {
            return None;
        }
        self.entries.get(index).map(|entry| entry.weight / total)
    }

    pub fn choose(&self, rng: &mut impl Rng) -> Option<&T> {
        weighted_choice(&self.entries, rng)
    }

    pub fn choose_index(&self, rng: &mut impl Rng) -> Option<usize> {
        weighted_index(&self.entries, rng)
    }
}

impl<T> From<Vec<Weighted<T>>> for WeightedTable<T> {
    fn from(entries: Vec<Weighted<T>>) -> Self {
        Self { entries }
    }
}

impl<T> FromIterator<(T, f64)> for WeightedTable<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(item, weight)| Weighted::new(item, weight))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn abc() -> WeightedTable<&'static str> {
        WeightedTable::new().with("a", 1.0).with("b", 1.0).with("c", 2.0)
    }

    #[test]
    fn test_boundary_resolves_to_current_entry() {
        // W = 4. u = 0.25 -> r = 1.0 == weight of "a".
        let mut rng = ScriptedRng::new(vec![0.25]);
        assert_eq!(abc().choose(&mut rng), Some(&"a"));

        // u = 0.5 -> r = 2.0, lands exactly at the end of "b".
        let mut rng = ScriptedRng::new(vec![0.5]);
        assert_eq!(abc().choose(&mut rng), Some(&"b"));
    }

    #[test]
    fn test_just_past_boundary_moves_on() {
        let mut rng = ScriptedRng::new(vec![0.2501]);
        assert_eq!(abc().choose(&mut rng), Some(&"b"));
    }

    #[test]
    fn test_top_of_range_picks_last() {
        let mut rng = ScriptedRng::new(vec![0.999_999]);
        assert_eq!(abc().choose(&mut rng), Some(&"c"));
    }

    #[test]
    fn test_zero_draw_selects_leading_zero_weight_entry() {
        // r = 0 satisfies `<= 0` on the very first subtraction.
        let table = WeightedTable::new().with("never", 0.0).with("always", 5.0);
        let mut rng = ScriptedRng::new(vec![0.0]);
        assert_eq!(table.choose(&mut rng), Some(&"never"));
    }

    #[test]
    fn test_empty_and_weightless_tables_are_none() {
        let mut rng = ScriptedRng::new(vec![0.5]);
        let empty: WeightedTable<u8> = WeightedTable::new();
        assert!(empty.choose(&mut rng).is_none());

        let zeroes = WeightedTable::new().with(1, 0.0).with(2, 0.0);
        assert!(zeroes.choose(&mut rng).is_none());

        let negative = WeightedTable::new().with(1, -3.0);
        assert!(negative.choose(&mut rng).is_none());

        let nan = WeightedTable::new().with(1, f64::NAN);
        assert!(nan.choose(&mut rng).is_none());

        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_rounding_falls_back_to_last_entry() {
        // With the largest possible draw, subtracting these weights in order
        // leaves a remainder of ~2.8e-17 after the last entry.
        let entries = vec![
            Weighted::new('x', 0.2),
            Weighted::new('y', 0.6),
            Weighted::new('z', 0.15),
        ];
        let mut rng = ScriptedRng::new(vec![0.999_999_999_999_999_9]);
        assert_eq!(weighted_choice(&entries, &mut rng), Some(&'z'));
    }

    #[test]
    fn test_share_of() {
        let table = abc();
        assert_eq!(table.share_of(0), Some(0.25));
        assert_eq!(table.share_of(2), Some(0.5));
        assert_eq!(table.share_of(3), None);
        assert_eq!(WeightedTable::<u8>::new().share_of(0), None);
    }

    #[test]
    fn test_single_entry_always_selected() {
        let table = WeightedTable::new().with("only", 0.01);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(table.choose(&mut rng), Some(&"only"));
        }
    }

    #[test]
    fn test_table_serializes_as_list() {
        let table = WeightedTable::new().with("oak".to_string(), 3.0);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"item":"oak","weight":3.0}]"#);
        let back: WeightedTable<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_collects_from_pairs() {
        let table: WeightedTable<char> = vec![('a', 1.0), ('b', 3.0)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_weight(), 4.0);
    }
}
