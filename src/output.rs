//! Persistence of the rendered page and the chart-ready table.
//!
//! Supports writing the HTML artifact and exporting the long-form table as
//! CSV or pretty JSON.

use anyhow::Result;
use tracing::{debug, info};

use crate::pipeline::ChartTable;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Writes the rendered page, replacing any existing file.
pub fn write_html(path: impl AsRef<Path>, html: &str) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, html)?;
    info!(path = %path.display(), bytes = html.len(), "HTML written");
    Ok(())
}

/// Writes the chart table as CSV with a header row.
pub fn write_table_csv(path: impl AsRef<Path>, table: &ChartTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    debug!(path = %path.display(), rows = table.len(), "Writing chart table CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the chart table as a pretty-printed JSON array.
pub fn write_table_json(path: impl AsRef<Path>, table: &ChartTable) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    debug!(path = %path.display(), rows = table.len(), "Writing chart table JSON");

    fs::write(path, serde_json::to_string_pretty(table)?)?;
    Ok(())
}
