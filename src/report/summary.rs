//! Aggregate statistics over a benchmark run

use crate::pull::PullResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals plus min/max/mean pull time of the successful pulls.
///
/// The timing statistics are `None` when nothing succeeded; there is no
/// meaningful minimum or mean of an empty set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub min_ms: Option<u64>,
    pub max_ms: Option<u64>,
    pub avg_ms: Option<f64>,
}

impl Summary {
    pub fn from_results(results: &[PullResult]) -> Self {
        let times: Vec<u64> = results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.pull_time_ms)
            .collect();

        let avg_ms = if times.is_empty() {
            None
        } else {
            let sum: u128 = times.iter().map(|&t| u128::from(t)).sum();
            Some(sum as f64 / times.len() as f64)
        };

        Self {
            total: results.len(),
            succeeded: times.len(),
            min_ms: times.iter().copied().min(),
            max_ms: times.iter().copied().max(),
            avg_ms,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Summary: {}/{} succeeded", self.succeeded, self.total)?;
        match (self.min_ms, self.max_ms, self.avg_ms) {
            (Some(min), Some(max), Some(avg)) => {
                write!(f, " | min: {}ms | max: {}ms | avg: {:.2}ms", min, max, avg)
            }
            _ => write!(f, " | min: n/a | max: n/a | avg: n/a"),
        }
    }
}
