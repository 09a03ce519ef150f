//! Stats module for summarizing samples collected from records
//!
//! Numeric distributions, ranked categorical tallies and field presence
//! tables. Every figure in the report is computed through these types.

mod numeric;
mod presence;
mod tally;

pub use numeric::NumericSummary;
pub use presence::{ALWAYS_PRESENT_SHOWN, FieldPresence, PresencePartition};
pub use tally::{Counted, Tally};

/// Format `part` as a percentage of `total` with one decimal
///
/// Returns `"0%"` when `total` is zero, whatever `part` is.
pub fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", (part as f64 / total as f64) * 100.0)
}
