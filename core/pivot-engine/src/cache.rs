//! FILENAME: core/pivot-engine/src/cache.rs
//! Pivot Cache - Per-group accumulators produced by one aggregation pass.
//!
//! The cache is rebuilt from the full record set on every pivot request; there
//! is no incremental update and nothing survives between requests.
//!
//! Architecture:
//! - One `GroupStats` accumulator per distinct group label
//! - Accumulators only ever grow (sum, count) or widen (min, max)
//! - Aggregation functions are evaluated from the accumulators at render time

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::AggregationType;

// ============================================================================
// GROUP STATS
// ============================================================================

/// Running statistics for one group.
/// A group only exists once a member was folded in, so `count >= 1` and
/// `min <= max` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub sum: f64,
    pub count: u64,
    pub min: f64,
    pub max: f64,
}

impl GroupStats {
    /// Starts a group from its first member.
    pub fn new(value: f64) -> Self {
        GroupStats {
            sum: value,
            count: 1,
            min: value,
            max: value,
        }
    }

    /// Folds one more member into the group.
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Merges the statistics of the same group computed over another chunk.
    pub fn merge(&mut self, other: &GroupStats) {
        self.sum += other.sum;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Computes the displayed value for an aggregation function.
    pub fn value(&self, aggregation: AggregationType) -> f64 {
        match aggregation {
            AggregationType::Sum => self.sum,
            AggregationType::Mean | AggregationType::Average => self.sum / self.count as f64,
            AggregationType::Count => self.count as f64,
            AggregationType::Min => self.min,
            AggregationType::Max => self.max,
        }
    }
}

// ============================================================================
// GRAND TOTAL
// ============================================================================

/// Statistics over every record regardless of group.
/// Unlike `GroupStats` this can be empty, so min/max are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTotals {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PivotTotals {
    fn include(&mut self, stats: &GroupStats) {
        self.sum += stats.sum;
        self.count += stats.count;
        self.min = Some(self.min.map_or(stats.min, |m| m.min(stats.min)));
        self.max = Some(self.max.map_or(stats.max, |m| m.max(stats.max)));
    }

    /// Computes the grand-total figure for an aggregation function.
    /// The mean is `sum / count` over all records, never a mean of group means.
    /// Returns `None` where the figure is undefined for an empty dataset.
    pub fn value(&self, aggregation: AggregationType) -> Option<f64> {
        match aggregation {
            AggregationType::Sum => Some(self.sum),
            AggregationType::Count => Some(self.count as f64),
            AggregationType::Mean | AggregationType::Average => {
                if self.count > 0 {
                    Some(self.sum / self.count as f64)
                } else {
                    None
                }
            }
            AggregationType::Min => self.min,
            AggregationType::Max => self.max,
        }
    }
}

// ============================================================================
// AGGREGATION RESULT
// ============================================================================

/// Output of one aggregation pass: group label → statistics.
/// Iteration order of `groups` is unspecified; the view sorts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationResult {
    pub aggregation: AggregationType,
    pub groups: FxHashMap<String, GroupStats>,
}

impl AggregationResult {
    pub fn new(aggregation: AggregationType) -> Self {
        AggregationResult {
            aggregation,
            groups: FxHashMap::default(),
        }
    }

    /// Folds one cleaned value into its group, creating the group on first use.
    pub fn fold(&mut self, label: String, value: f64) {
        self.groups
            .entry(label)
            .and_modify(|stats| stats.add(value))
            .or_insert_with(|| GroupStats::new(value));
    }

    /// Merges a result computed over another chunk of the same records.
    pub fn merge(&mut self, other: AggregationResult) {
        for (label, stats) in other.groups {
            self.groups
                .entry(label)
                .and_modify(|existing| existing.merge(&stats))
                .or_insert(stats);
        }
    }

    pub fn group(&self, label: &str) -> Option<&GroupStats> {
        self.groups.get(label)
    }

    /// Value of a group under this result's aggregation function.
    pub fn group_value(&self, label: &str) -> Option<f64> {
        self.group(label).map(|stats| stats.value(self.aggregation))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Grand total over all groups.
    pub fn totals(&self) -> PivotTotals {
        let mut totals = PivotTotals::default();
        for stats in self.groups.values() {
            totals.include(stats);
        }
        totals
    }
}
