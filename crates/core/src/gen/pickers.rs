//! Random selection from candidate sets, driven by the run's random source.

use crate::rng::RandSource;

/// Returns one randomly selected item from a candidate set, or `None` when
/// the set is empty.
pub trait Picker<T> {
    fn pick<'a>(&'a self, rand: &mut RandSource) -> Option<&'a T>;
}

/// Weighted candidate set; each pick consumes one draw and lands on an item
/// with probability proportional to its weight. Zero-weight entries are kept
/// but never selected.
#[derive(Clone, Debug, Default)]
pub struct WeightedPicker<T> {
    entries: Vec<(T, u32)>,
    total_weight: u64,
}

impl<T> WeightedPicker<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), total_weight: 0 }
    }

    pub fn push(&mut self, item: T, weight: u32) {
        self.total_weight += u64::from(weight);
        self.entries.push((item, weight));
    }

    pub fn with(mut self, item: T, weight: u32) -> Self {
        self.push(item, weight);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Picker<T> for WeightedPicker<T> {
    fn pick<'a>(&'a self, rand: &mut RandSource) -> Option<&'a T> {
        if self.total_weight == 0 {
            return None;
        }
        let mut roll = rand.next_u64() % self.total_weight;
        for (item, weight) in &self.entries {
            let weight = u64::from(*weight);
            if roll < weight {
                return Some(item);
            }
            roll -= weight;
        }
        // total_weight > 0 guarantees the loop returned.
        None
    }
}

/// Always returns the one preset item, consuming no draws.
#[derive(Clone, Debug)]
pub struct PresetPicker<T> {
    item: T,
}

impl<T> PresetPicker<T> {
    pub fn new(item: T) -> Self {
        Self { item }
    }
}

impl<T> Picker<T> for PresetPicker<T> {
    fn pick<'a>(&'a self, _rand: &mut RandSource) -> Option<&'a T> {
        Some(&self.item)
    }
}
