//! Marker/update aggregator
//!
//! Splits the `updates` list into area and point markers, tallies their
//! categorical fields and collects geometry distributions.

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use super::sample::MarkerSample;
use super::{Analysis, FieldSummary, NumericField, RankedTally, record_list};
use crate::json::{as_number, category_label};
use crate::stats::{FieldPresence, PresencePartition, Tally, percent};

/// Shape of a map marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// Polygon or vertical extent
    Area,
    /// Single-coordinate icon
    Point,
}

impl MarkerKind {
    /// Classify a marker record
    ///
    /// Area when `x` or `z` is an array, or when both `ytop` and `ybottom`
    /// are present. Everything else is a point.
    pub fn of(record: &Map<String, Value>) -> Self {
        let is_array = |name: &str| matches!(record.get(name), Some(Value::Array(_)));
        let has_extent = record.contains_key("ytop") && record.contains_key("ybottom");

        if is_array("x") || is_array("z") || has_extent {
            MarkerKind::Area
        } else {
            MarkerKind::Point
        }
    }
}

/// Accumulates statistics over the marker records
#[derive(Debug, Clone)]
pub struct UpdateAggregator<'a> {
    pub presence: FieldPresence,
    pub area_count: usize,
    pub point_count: usize,
    pub msg: Tally,
    pub set: Tally,
    pub ctype: Tally,
    pub icon: Tally,
    /// Vertex count of polygons with both coordinate arrays
    pub polygon_points: NumericField,
    pub point_x: NumericField,
    pub point_y: NumericField,
    pub point_z: NumericField,
    pub area_samples: Vec<&'a Map<String, Value>>,
    pub point_samples: Vec<&'a Map<String, Value>>,
    sample_limit: usize,
}

impl<'a> UpdateAggregator<'a> {
    /// Empty aggregator keeping up to `sample_limit` records of each kind
    pub fn new(sample_limit: usize) -> Self {
        Self {
            presence: FieldPresence::new(),
            area_count: 0,
            point_count: 0,
            msg: Tally::new(),
            set: Tally::new(),
            ctype: Tally::new(),
            icon: Tally::new(),
            polygon_points: NumericField::new("polygon points"),
            point_x: NumericField::new("point x"),
            point_y: NumericField::new("point y"),
            point_z: NumericField::new("point z"),
            area_samples: Vec::new(),
            point_samples: Vec::new(),
            sample_limit,
        }
    }

    /// Run one pass over the records
    pub fn collect(records: &'a [Value], sample_limit: usize) -> Self {
        let mut aggregator = Self::new(sample_limit);
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

        // msg and set are tallied even when absent; ctype and icon only when present
        self.msg.add(category_label(record.get("msg")));
        self.set.add(category_label(record.get("set")));
        if let Some(ctype) = record.get("ctype") {
            self.ctype.add(category_label(Some(ctype)));
        }
        if let Some(icon) = record.get("icon") {
            self.icon.add(category_label(Some(icon)));
        }

        match MarkerKind::of(record) {
            MarkerKind::Area => {
                self.area_count += 1;
                if let (Some(Value::Array(xs)), Some(Value::Array(zs))) =
                    (record.get("x"), record.get("z"))
                {
                    self.polygon_points.samples.push(xs.len().min(zs.len()) as f64);
                }
                if self.area_samples.len() < self.sample_limit {
                    self.area_samples.push(record);
                }
            }
            MarkerKind::Point => {
                self.point_count += 1;
                self.point_x.push(as_number(record.get("x")));
                self.point_y.push(as_number(record.get("y")));
                self.point_z.push(as_number(record.get("z")));
                if self.point_samples.len() < self.sample_limit {
                    self.point_samples.push(record);
                }
            }
        }
    }

    /// Reduce the collected data to a report section
    pub fn summary(&self, top_n: usize, desc_len: usize) -> UpdateSummary {
        let total = self.presence.total();

        UpdateSummary {
            count: total,
            area_count: self.area_count,
            area_percent: percent(self.area_count, total),
            point_count: self.point_count,
            point_percent: percent(self.point_count, total),
            msg: RankedTally::of(&self.msg, top_n),
            set: RankedTally::of(&self.set, top_n),
            ctype: RankedTally::of(&self.ctype, top_n),
            icon: RankedTally::of(&self.icon, top_n),
            polygon_points: self.polygon_points.summarize(),
            point_coords: vec![
                self.point_x.summarize(),
                self.point_y.summarize(),
                self.point_z.summarize(),
            ],
            presence: self.presence.partition().limit_sometimes(top_n),
            area_samples: project_samples(&self.area_samples, desc_len),
            point_samples: project_samples(&self.point_samples, desc_len),
        }
    }
}

fn project_samples(records: &[&Map<String, Value>], desc_len: usize) -> Vec<MarkerSample> {
    records
        .iter()
        .map(|record| MarkerSample::project(record, desc_len))
        .collect()
}

/// Update section of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateSummary {
    pub count: usize,
    pub area_count: usize,
    pub area_percent: String,
    pub point_count: usize,
    pub point_percent: String,
    pub msg: RankedTally,
    pub set: RankedTally,
    pub ctype: RankedTally,
    pub icon: RankedTally,
    pub polygon_points: FieldSummary,
    pub point_coords: Vec<FieldSummary>,
    pub presence: PresencePartition,
    pub area_samples: Vec<MarkerSample>,
    pub point_samples: Vec<MarkerSample>,
}

/// Analyze the value found at the document's `updates` field
pub fn analyze_updates(
    value: Option<&Value>,
    top_n: usize,
    sample_limit: usize,
    desc_len: usize,
) -> Analysis<UpdateSummary> {
    match record_list(value) {
        Ok(records) => {
            debug!("Analyzing {} update records", records.len());
            let aggregator = UpdateAggregator::collect(records, sample_limit);
            Analysis::Analyzed(aggregator.summary(top_n, desc_len))
        }
        Err(found) => {
            debug!("updates is not a list: {:?}", found);
            Analysis::Mismatch { found }
        }
    }
}

#[cfg(test)]
#[path = "updates_tests.rs"]
mod updates_tests;
