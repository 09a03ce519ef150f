//! Text and JSON rendering of a [`Report`]

use std::fmt::{self, Write};
use std::path::Path;

use super::{CensusSummary, Report};
use crate::analysis::{
    Analysis, FieldSummary, MarkerSample, PlayerSummary, RankedTally, UpdateSummary,
};
use crate::json::Shape;
use crate::stats::{ALWAYS_PRESENT_SHOWN, Counted, PresencePartition};

/// Serialize the report as pretty-printed JSON
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Diagnostic printed instead of a report when the input file is missing
pub fn render_missing_input(path: &Path, cwd: &Path, exe_dir: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    format!(
        "Input file not found: {}\n\
         Current working directory: {}\n\
         Executable directory: {}\n\
         Place {} next to the executable or pass --path.\n",
        path.display(),
        cwd.display(),
        exe_dir.display(),
        file_name
    )
}

fn describe_counts(counts: &[Counted]) -> String {
    if counts.is_empty() {
        return "(none)".to_string();
    }
    counts
        .iter()
        .map(|c| format!("{}={}", c.name, c.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_ranked(f: &mut fmt::Formatter<'_>, label: &str, ranked: &RankedTally) -> fmt::Result {
    writeln!(
        f,
        "  {} (top {}): {}",
        label,
        ranked.top.len(),
        describe_counts(&ranked.top)
    )
}

fn write_numeric(f: &mut fmt::Formatter<'_>, field: &FieldSummary) -> fmt::Result {
    if field.summary.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {}: {}", field.name, field.summary)
}

fn write_presence(f: &mut fmt::Formatter<'_>, presence: &PresencePartition) -> fmt::Result {
    if presence.is_empty() {
        return Ok(());
    }

    let shown: Vec<&str> = presence
        .always
        .iter()
        .take(ALWAYS_PRESENT_SHOWN)
        .map(String::as_str)
        .collect();
    let elided = if presence.always.len() > ALWAYS_PRESENT_SHOWN {
        "..."
    } else {
        ""
    };
    writeln!(
        f,
        "  fields always present ({}): {}{}",
        presence.always.len(),
        shown.join(", "),
        elided
    )?;

    if !presence.sometimes.is_empty() {
        let listed = presence
            .sometimes
            .iter()
            .map(|(name, count)| format!("{}={}", name, count))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            f,
            "  fields not always present (top {}): {}",
            presence.sometimes.len(),
            listed
        )?;
    }
    Ok(())
}

fn write_mismatch<T>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    analysis: &Analysis<T>,
) -> fmt::Result {
    if let Analysis::Mismatch { found } = analysis {
        let found = found.map(|tag| tag.as_str()).unwrap_or("missing");
        writeln!(f)?;
        writeln!(f, "{}: {} (expected list)", name, found)?;
    }
    Ok(())
}

fn write_samples(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    samples: &[MarkerSample],
) -> fmt::Result {
    for sample in samples {
        let rendered = serde_json::to_string_pretty(sample).map_err(|_| fmt::Error)?;
        writeln!(f)?;
        writeln!(f, "  sample {}:", label)?;
        writeln!(f, "{}", rendered)?;
    }
    Ok(())
}

fn write_shape(f: &mut fmt::Formatter<'_>, shape: &Shape) -> fmt::Result {
    writeln!(f, "Top-level type: {}", shape.tag())?;
    match shape {
        Shape::Object { keys } => {
            writeln!(f, "Top-level keys:")?;
            for key in keys {
                writeln!(f, "  - {}", key)?;
            }
        }
        Shape::Array { len } => writeln!(f, "Top-level list length: {}", len)?,
        Shape::Scalar { .. } => {}
    }
    Ok(())
}

fn write_players(f: &mut fmt::Formatter<'_>, players: &PlayerSummary) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "players: list (count={})", players.count)?;
    if !players.worlds.is_empty() {
        write_ranked(f, "worlds", &players.worlds)?;
    }
    for metric in &players.metrics {
        write_numeric(f, metric)?;
    }
    write_presence(f, &players.presence)?;
    if let Some(keys) = &players.sample_keys {
        writeln!(f, "  sample player keys: {}", keys.join(", "))?;
    }
    Ok(())
}

fn write_updates(f: &mut fmt::Formatter<'_>, updates: &UpdateSummary) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "updates: list (count={})", updates.count)?;
    writeln!(
        f,
        "  kind: area/poly={} ({}), point/icon={} ({})",
        updates.area_count, updates.area_percent, updates.point_count, updates.point_percent
    )?;
    write_ranked(f, "msg", &updates.msg)?;
    write_ranked(f, "set", &updates.set)?;
    if !updates.ctype.is_empty() {
        write_ranked(f, "ctype", &updates.ctype)?;
    }
    if !updates.icon.is_empty() {
        write_ranked(f, "icon", &updates.icon)?;
    }
    write_numeric(f, &updates.polygon_points)?;
    for coord in &updates.point_coords {
        write_numeric(f, coord)?;
    }
    write_presence(f, &updates.presence)?;
    write_samples(f, "area/poly", &updates.area_samples)?;
    write_samples(f, "point/icon", &updates.point_samples)
}

fn write_census(f: &mut fmt::Formatter<'_>, census: &CensusSummary) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "Distinct key paths: {}", census.distinct_paths)?;
    writeln!(f)?;
    writeln!(f, "Most frequent key paths (top {}):", census.top_paths.len())?;
    for row in &census.top_paths {
        let types = row
            .types
            .iter()
            .map(|t| format!("{}:{}", t.name, t.count))
            .collect::<Vec<_>>()
            .join(", ");
        let mut line = format!("  - {}  count={}  types={}", row.path, row.count, types);
        if let Some(example) = &row.example {
            write!(line, "  example={}", example)?;
        }
        writeln!(f, "{}", line)?;
    }

    writeln!(f)?;
    writeln!(f, "Global field names (top {}):", census.field_names.len())?;
    for name in &census.field_names {
        writeln!(f, "  - {}: {}", name.name, name.count)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.source)?;
        write_shape(f, &self.shape)?;

        if let Some(players) = &self.players {
            match players {
                Analysis::Analyzed(summary) => write_players(f, summary)?,
                mismatch => write_mismatch(f, "players", mismatch)?,
            }
        }
        if let Some(updates) = &self.updates {
            match updates {
                Analysis::Analyzed(summary) => write_updates(f, summary)?,
                mismatch => write_mismatch(f, "updates", mismatch)?,
            }
        }
        if let Some(census) = &self.census {
            write_census(f, census)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
