//! Field presence across a record collection

use serde::Serialize;
use serde_json::Value;

use super::tally::Tally;

/// How many fields of the always-present list are shown before eliding
pub const ALWAYS_PRESENT_SHOWN: usize = 20;

/// Counts, per field name, how many records carry that field
///
/// Every element of the collection counts toward the total, including
/// elements that are not objects and therefore contribute no fields.
#[derive(Debug, Clone, Default)]
pub struct FieldPresence {
    total: usize,
    fields: Tally<String>,
}

impl FieldPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one element of the collection
    pub fn observe(&mut self, element: &Value) {
        self.total += 1;
        if let Value::Object(map) = element {
            for key in map.keys() {
                self.fields.add(key.clone());
            }
        }
    }

    /// Number of elements observed
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, field: &str) -> usize {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Split fields into always present and sometimes present
    pub fn partition(&self) -> PresencePartition {
        let mut always: Vec<String> = self
            .fields
            .iter()
            .filter(|(_, count)| *count == self.total)
            .map(|(name, _)| name.clone())
            .collect();
        always.sort();

        let mut sometimes: Vec<(String, usize)> = self
            .fields
            .iter()
            .filter(|(_, count)| *count < self.total)
            .map(|(name, count)| (name.clone(), count))
            .collect();
        sometimes.sort_by_key(|(_, count)| *count);

        PresencePartition {
            total: self.total,
            always,
            sometimes,
        }
    }
}

/// Presence table split for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresencePartition {
    pub total: usize,
    /// Fields carried by every element, alphabetical
    pub always: Vec<String>,
    /// Remaining fields with their counts, rarest first
    pub sometimes: Vec<(String, usize)>,
}

impl PresencePartition {
    /// Keep only the `n` rarest sometimes-present fields
    pub fn limit_sometimes(mut self, n: usize) -> Self {
        self.sometimes.truncate(n);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.always.is_empty() && self.sometimes.is_empty()
    }
}
