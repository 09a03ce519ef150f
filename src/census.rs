//! Key-path census of a JSON document
//!
//! Walks the whole tree once and records, for every distinct key path, how
//! often it was reached, which value types showed up there and one example
//! value. Array indices collapse into a single wildcard segment.

mod path;
mod walker;

pub use path::{KeyPath, Segment};
pub use walker::{Census, PathEntry};
