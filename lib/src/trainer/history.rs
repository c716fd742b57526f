use serde::{Deserialize, Serialize};

/// Cost after the update of one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub iteration: usize,
    pub cost: f64,
}

/// Append-only record of the cost per iteration.
///
/// Purely observational: nothing in the training loop reads it back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostHistory {
    entries: Vec<CostEntry>,
}

impl CostHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, iteration: usize, cost: f64) {
        self.entries.push(CostEntry { iteration, cost });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CostEntry] {
        &self.entries
    }

    pub fn first(&self) -> Option<&CostEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&CostEntry> {
        self.entries.last()
    }

    pub fn costs(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.cost)
    }

    /// `true` if no entry exceeds its predecessor by more than `slack`.
    pub fn is_non_increasing(&self, slack: f64) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[1].cost <= w[0].cost + slack)
    }
}
