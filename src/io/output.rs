//! Writers for the derived tables and the JSON report.
//!
//! - `write_table_csv`: one CSV per covariate, columns named after the plot
//!   axes so the file can be fed straight to a plotting front-end.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::table::ScoreTable;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const SCORE_COLUMN: &str = "Silhouette coefficient";
pub const LABEL_COLUMN: &str = "Detector+Descriptor";
pub const FOV_COLUMN: &str = "FOV";

/// Write `table` as CSV to `path`, creating parent directories.
pub fn write_table_csv(path: &Path, table: &ScoreTable) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    write_table(&mut writer, table)
        .map_err(|e| format!("Failed to write CSV {}: {e}", path.display()))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to flush {}: {e}", path.display()))
}

/// Render `table` as CSV text.
pub fn table_to_csv_string(table: &ScoreTable) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_table(&mut writer, table).map_err(|e| format!("Failed to render CSV: {e}"))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| format!("Failed to render CSV: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("CSV is not UTF-8: {e}"))
}

fn write_table<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    table: &ScoreTable,
) -> csv::Result<()> {
    writer.write_record([table.axis_label(), SCORE_COLUMN, LABEL_COLUMN, FOV_COLUMN])?;
    for row in &table.rows {
        writer.write_record([
            row.bucket_center.to_string(),
            row.score.to_string(),
            row.label.clone(),
            row.field_of_view.to_string(),
        ])?;
    }
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
