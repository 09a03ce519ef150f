//! Numeric distribution summary

use serde::Serialize;
use std::fmt;

/// Quantile used for the upper-tail figure
const UPPER_QUANTILE: f64 = 0.95;

/// Summary of a numeric sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NumericSummary {
    /// No samples were collected
    Empty,
    /// Distribution figures over `count` samples
    Summary {
        count: usize,
        min: f64,
        median: f64,
        p95: f64,
        max: f64,
    },
}

impl NumericSummary {
    /// Summarize a sample set without touching the caller's slice
    ///
    /// The p95 figure is nearest-rank: the sorted sample at index
    /// `floor(0.95 * (n - 1))`, never interpolated.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return NumericSummary::Empty;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mid = n / 2;
        let median = if n % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        let rank = ((UPPER_QUANTILE * (n - 1) as f64) as usize).min(n - 1);

        NumericSummary::Summary {
            count: n,
            min: sorted[0],
            median,
            p95: sorted[rank],
            max: sorted[n - 1],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NumericSummary::Empty)
    }
}

impl fmt::Display for NumericSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericSummary::Empty => write!(f, "(empty)"),
            NumericSummary::Summary {
                min,
                median,
                p95,
                max,
                ..
            } => write!(
                f,
                "min={:.3} median={:.3} p95={:.3} max={:.3}",
                min, median, p95, max
            ),
        }
    }
}
