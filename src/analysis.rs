//! Domain aggregators for dynmap world dumps
//!
//! `players` holds live entity records, `updates` holds map markers. Each
//! aggregator owns its tallies for one pass over its subtree.

pub mod players;
mod sample;
pub mod updates;

pub use players::{PlayerAggregator, PlayerSummary};
pub use sample::MarkerSample;
pub use updates::{MarkerKind, UpdateAggregator, UpdateSummary};

use serde::Serialize;
use serde_json::Value;

use crate::json::{TypeTag, classify};
use crate::stats::{Counted, NumericSummary, Tally};

/// Outcome of running an aggregator over a named subtree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Analysis<T> {
    /// The subtree was a list and was aggregated
    Analyzed(T),
    /// The subtree was absent (`found: None`) or not a list
    Mismatch { found: Option<TypeTag> },
}

impl<T> Analysis<T> {
    pub fn analyzed(&self) -> Option<&T> {
        match self {
            Analysis::Analyzed(summary) => Some(summary),
            Analysis::Mismatch { .. } => None,
        }
    }
}

/// Borrow the records of a subtree that should be a list
pub(crate) fn record_list(value: Option<&Value>) -> Result<&[Value], Option<TypeTag>> {
    match value {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Some(classify(other))),
        None => Err(None),
    }
}

/// Numeric samples gathered for one named field
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    pub name: &'static str,
    pub samples: Vec<f64>,
}

impl NumericField {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.samples.push(v);
        }
    }

    pub fn summarize(&self) -> FieldSummary {
        FieldSummary {
            name: self.name.to_string(),
            summary: NumericSummary::from_samples(&self.samples),
        }
    }
}

/// Numeric summary labelled with the field it describes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub summary: NumericSummary,
}

/// Top entries of a tally plus its number of distinct keys
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTally {
    pub distinct: usize,
    pub top: Vec<Counted>,
}

impl RankedTally {
    pub fn of(tally: &Tally, top_n: usize) -> Self {
        Self {
            distinct: tally.len(),
            top: tally.top_counted(top_n),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }
}
