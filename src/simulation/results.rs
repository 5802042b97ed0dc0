// src/simulation/results.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome counts from repeated sampling of a state.
///
/// Keys are bitstrings with classical bit 0 rightmost. Every key is
/// `num_bits` characters long and the counts sum to `shots`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementResult {
    counts: BTreeMap<String, usize>,
    shots: usize,
    num_bits: usize,
}

impl MeasurementResult {
    pub(crate) fn new(num_bits: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            shots: 0,
            num_bits,
        }
    }

    /// Tallies one sampled outcome given as the packed classical bits.
    pub(crate) fn record(&mut self, outcome: usize) {
        let key = format!("{:0width$b}", outcome, width = self.num_bits);
        *self.counts.entry(key).or_insert(0) += 1;
        self.shots += 1;
    }

    /// All observed outcomes and their counts, ordered by bitstring.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Total number of shots taken.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Number of classical bits in every outcome string.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Count for `bitstring`, zero if it was never observed.
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Observed frequency of `bitstring`. Zero when no shots were taken.
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / self.shots as f64
    }

    /// The outcome with the highest count; ties go to the smaller bitstring.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// Outcomes sorted by count, descending.
    pub fn sorted_outcomes(&self) -> Vec<(&str, usize)> {
        let mut outcomes: Vec<_> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1));
        outcomes
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Results ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            writeln!(f, "  No outcomes recorded.")?;
        } else {
            for (bits, count) in &self.counts {
                writeln!(f, "    {}: {}", bits, count)?;
            }
        }
        Ok(())
    }
}
