//! dynmap-inspect library - structural summaries of dynmap world dumps
//!
//! This library exposes the analysis pipeline of dynmap-inspect for testing purposes.

pub mod analysis;
pub mod census;
pub mod config;
pub mod error;
pub mod input;
pub mod json;
pub mod report;
pub mod stats;

// Re-export commonly used types for convenience
pub use config::{Config, InspectOptions};
pub use error::InspectError;
pub use report::Report;
