//! Report assembly
//!
//! Runs the aggregators and the census over one document and collects their
//! summaries. Rendering lives in [`render`].

pub mod render;

pub use render::{render_json, render_missing_input};

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::players::analyze_players;
use crate::analysis::updates::analyze_updates;
use crate::analysis::{Analysis, PlayerSummary, UpdateSummary};
use crate::census::{Census, KeyPath};
use crate::config::InspectOptions;
use crate::json::Shape;
use crate::stats::Counted;

/// Type tags listed per key path
const PATH_TYPE_LIMIT: usize = 5;

/// Complete summary of one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Where the document was read from
    pub source: String,
    pub shape: Shape,
    /// Present only when the root is an object
    pub players: Option<Analysis<PlayerSummary>>,
    /// Present only when the root is an object
    pub updates: Option<Analysis<UpdateSummary>>,
    /// Absent when the census walk is disabled
    pub census: Option<CensusSummary>,
}

/// Ranked view of the key-path census
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CensusSummary {
    pub distinct_paths: usize,
    pub top_paths: Vec<PathRow>,
    /// Occurrences by final field name, across all nesting levels
    pub field_names: Vec<Counted>,
}

/// One ranked key path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRow {
    pub path: KeyPath,
    pub count: usize,
    pub types: Vec<Counted>,
    pub example: Option<String>,
}

impl CensusSummary {
    pub fn of(census: &Census, top_n: usize, field_name_top: usize) -> Self {
        let top_paths = census
            .top_paths(top_n)
            .into_iter()
            .map(|entry| PathRow {
                path: entry.path.clone(),
                count: entry.count,
                types: entry.types.top_counted(PATH_TYPE_LIMIT),
                example: entry.example.clone(),
            })
            .collect();

        CensusSummary {
            distinct_paths: census.len(),
            top_paths,
            field_names: census.last_segment_tally().top_counted(field_name_top),
        }
    }
}

impl Report {
    /// Build the report for `document`
    ///
    /// The document is only read. Each section gets its own fresh state.
    pub fn build(source: impl Into<String>, document: &Value, options: &InspectOptions) -> Self {
        let shape = Shape::of(document);

        let (players, updates) = match document {
            Value::Object(root) => (
                Some(analyze_players(root.get("players"), options.top_n)),
                Some(analyze_updates(
                    root.get("updates"),
                    options.top_n,
                    options.samples,
                    options.desc_len,
                )),
            ),
            _ => (None, None),
        };

        let census = if options.walk {
            let census = Census::of(document, options.example_len);
            Some(CensusSummary::of(
                &census,
                options.top_n,
                options.field_name_top,
            ))
        } else {
            debug!("Census walk skipped");
            None
        };

        Report {
            source: source.into(),
            shape,
            players,
            updates,
            census,
        }
    }
}
