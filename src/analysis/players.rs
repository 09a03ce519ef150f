//! Player aggregator
//!
//! Field presence, world breakdown and numeric distributions over the
//! `players` list.

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::{Analysis, FieldSummary, NumericField, RankedTally, record_list};
use crate::json::{as_number, category_label};
use crate::stats::{FieldPresence, PresencePartition, Tally};

/// Numeric attributes collected from every player record, in report order
pub const PLAYER_METRICS: [&str; 5] = ["health", "armor", "x", "y", "z"];

/// Accumulates statistics over the player records
#[derive(Debug, Clone)]
pub struct PlayerAggregator<'a> {
    pub presence: FieldPresence,
    pub worlds: Tally,
    pub metrics: Vec<NumericField>,
    /// First element that is an object
    pub sample: Option<&'a serde_json::Map<String, Value>>,
}

impl Default for PlayerAggregator<'_> {
    fn default() -> Self {
        Self {
            presence: FieldPresence::new(),
            worlds: Tally::new(),
            metrics: PLAYER_METRICS.into_iter().map(NumericField::new).collect(),
            sample: None,
        }
    }
}

impl<'a> PlayerAggregator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one pass over the records
    pub fn collect(records: &'a [Value]) -> Self {
        let mut aggregator = Self::new();
        for record in records {
            aggregator.observe(record);
        }
        aggregator
    }

    /// Fold a single element into the statistics
    ///
    /// Elements that are not objects only count toward the total.
    pub fn observe(&mut self, element: &'a Value) {
        self.presence.observe(element);

        let Value::Object(record) = element else {
            return;
        };

        if let Some(world) = record.get("world") {
            self.worlds.add(category_label(Some(world)));
        }
        for metric in &mut self.metrics {
            metric.push(as_number(record.get(metric.name)));
        }
        if self.sample.is_none() {
            self.sample = Some(record);
        }
    }

    pub fn metric(&self, name: &str) -> Option<&NumericField> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Reduce the collected data to a report section
    pub fn summary(&self, top_n: usize) -> PlayerSummary {
        let sample_keys = self.sample.map(|record| {
            let mut keys: Vec<String> = record.keys().cloned().collect();
            keys.sort();
            keys
        });

        PlayerSummary {
            count: self.presence.total(),
            worlds: RankedTally::of(&self.worlds, top_n),
            metrics: self.metrics.iter().map(NumericField::summarize).collect(),
            presence: self.presence.partition().limit_sometimes(top_n),
            sample_keys,
        }
    }
}

/// Player section of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub count: usize,
    pub worlds: RankedTally,
    pub metrics: Vec<FieldSummary>,
    pub presence: PresencePartition,
    /// Sorted keys of the first object record
    pub sample_keys: Option<Vec<String>>,
}

/// Analyze the value found at the document's `players` field
pub fn analyze_players(value: Option<&Value>, top_n: usize) -> Analysis<PlayerSummary> {
    match record_list(value) {
        Ok(records) => {
            debug!("Analyzing {} player records", records.len());
            Analysis::Analyzed(PlayerAggregator::collect(records).summary(top_n))
        }
        Err(found) => {
            debug!("players is not a list: {:?}", found);
            Analysis::Mismatch { found }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::TypeTag;
    use crate::stats::{Counted, NumericSummary};
    use serde_json::json;

    fn records(document: &Value) -> &[Value] {
        document["players"].as_array().unwrap()
    }

    #[test]
    fn test_health_world_and_presence() {
        let document = json!({"players": [{"health": 20, "world": "w"}, {"health": 15.5}]});
        let aggregator = PlayerAggregator::collect(records(&document));

        assert_eq!(aggregator.metric("health").unwrap().samples, vec![20.0, 15.5]);
        assert_eq!(aggregator.worlds.get("w"), 1);
        assert_eq!(aggregator.worlds.len(), 1);
        assert_eq!(aggregator.presence.count("world"), 1);
        assert_eq!(aggregator.presence.total(), 2);

        let summary = aggregator.summary(50);
        let health = &summary.metrics[0];
        assert_eq!(health.name, "health");
        match health.summary {
            NumericSummary::Summary { min, max, .. } => {
                assert_eq!(min, 15.5);
                assert_eq!(max, 20.0);
            }
            NumericSummary::Empty => panic!("health should have samples"),
        }
        assert_eq!(summary.presence.always, vec!["health"]);
        assert_eq!(summary.presence.sometimes, vec![("world".to_string(), 1)]);
    }

    #[test]
    fn test_non_numeric_values_skipped() {
        let document = json!({"players": [
            {"health": true, "armor": "5", "x": null, "y": [1], "z": {"v": 1}},
            {"health": 10, "armor": 2}
        ]});
        let aggregator = PlayerAggregator::collect(records(&document));
        assert_eq!(aggregator.metric("health").unwrap().samples, vec![10.0]);
        assert_eq!(aggregator.metric("armor").unwrap().samples, vec![2.0]);
        assert!(aggregator.metric("x").unwrap().samples.is_empty());
        assert!(aggregator.metric("y").unwrap().samples.is_empty());
        assert!(aggregator.metric("z").unwrap().samples.is_empty());
    }

    #[test]
    fn test_world_tally_uses_string_form() {
        let document = json!({"players": [
            {"world": "world"},
            {"world": "world_nether"},
            {"world": "world"},
            {"world": null},
            {"world": 3}
        ]});
        let aggregator = PlayerAggregator::collect(records(&document));
        assert_eq!(aggregator.worlds.get("world"), 2);
        assert_eq!(aggregator.worlds.get("world_nether"), 1);
        assert_eq!(aggregator.worlds.get("null"), 1);
        assert_eq!(aggregator.worlds.get("3"), 1);
    }

    #[test]
    fn test_non_object_elements_skipped() {
        let document = json!({"players": ["stray", 4, {"name": "steve", "x": 1}]});
        let aggregator = PlayerAggregator::collect(records(&document));
        assert_eq!(aggregator.presence.total(), 3);
        assert_eq!(aggregator.metric("x").unwrap().samples, vec![1.0]);

        let summary = aggregator.summary(50);
        assert_eq!(summary.count, 3);
        assert!(summary.presence.always.is_empty());
        assert_eq!(
            summary.sample_keys,
            Some(vec!["name".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_sample_keys_sorted_from_first_object() {
        let document = json!({"players": [{"zeta": 1, "alpha": 2}, {"other": 3}]});
        let summary = PlayerAggregator::collect(records(&document)).summary(50);
        assert_eq!(
            summary.sample_keys,
            Some(vec!["alpha".to_string(), "zeta".to_string()])
        );
    }

    #[test]
    fn test_empty_list() {
        let summary = PlayerAggregator::collect(&[]).summary(50);
        assert_eq!(summary.count, 0);
        assert!(summary.worlds.is_empty());
        assert!(summary.worlds.top.is_empty());
        assert!(summary.metrics.iter().all(|m| m.summary.is_empty()));
        assert!(summary.sample_keys.is_none());
    }

    #[test]
    fn test_world_top_n_cutoff() {
        let document = json!({"players": [
            {"world": "a"}, {"world": "b"}, {"world": "b"}, {"world": "c"}
        ]});
        let summary = PlayerAggregator::collect(records(&document)).summary(2);
        assert_eq!(
            summary.worlds.top,
            vec![Counted::new("b", 2), Counted::new("a", 1)]
        );
        assert_eq!(summary.worlds.distinct, 3);
    }

    #[test]
    fn test_analyze_players_mismatch() {
        let document = json!({"players": {"steve": {}}});
        assert_eq!(
            analyze_players(document.get("players"), 50),
            Analysis::Mismatch {
                found: Some(TypeTag::Object)
            }
        );
        assert_eq!(
            analyze_players(document.get("missing"), 50),
            Analysis::Mismatch { found: None }
        );
    }

    #[test]
    fn test_analyze_players_list() {
        let document = json!({"players": [{"health": 20}]});
        let analysis = analyze_players(document.get("players"), 50);
        assert_eq!(analysis.analyzed().unwrap().count, 1);
    }
}
