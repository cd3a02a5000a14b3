//! Per-tick population history.
//!
//! One [`HistorySample`] is appended per tick and never trimmed. Column
//! accessors give plotting front ends one series at a time.

pub use ecosim_data::HistorySample;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct History {
    samples: Vec<HistorySample>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: HistorySample) {
        self.samples.push(sample);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.last()
    }

    #[must_use]
    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    fn column<T>(&self, f: impl Fn(&HistorySample) -> T) -> Vec<T> {
        self.samples.iter().map(f).collect()
    }

    #[must_use]
    pub fn prey_counts(&self) -> Vec<usize> {
        self.column(|s| s.prey)
    }

    #[must_use]
    pub fn predator_counts(&self) -> Vec<usize> {
        self.column(|s| s.predators)
    }

    #[must_use]
    pub fn food_counts(&self) -> Vec<usize> {
        self.column(|s| s.food)
    }

    /// Cumulative prey births after each tick.
    #[must_use]
    pub fn prey_births_total(&self) -> Vec<u64> {
        self.column(|s| s.prey_births_total)
    }

    #[must_use]
    pub fn predator_births_total(&self) -> Vec<u64> {
        self.column(|s| s.predator_births_total)
    }

    /// Prey born during each tick.
    #[must_use]
    pub fn prey_births(&self) -> Vec<u64> {
        self.column(|s| s.prey_births)
    }

    #[must_use]
    pub fn predator_births(&self) -> Vec<u64> {
        self.column(|s| s.predator_births)
    }

    /// Serializes every sample as a JSON array.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.samples)?)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistorySample;
    type IntoIter = std::slice::Iter<'a, HistorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
