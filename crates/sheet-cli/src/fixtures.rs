//! Built-in sample sheet

use anyhow::Context;
use sheet_session::{Sheet, SnapshotError};
use std::path::Path;

const SAMPLE_SHEET_JSON: &str = include_str!("../data/sample_sheet.json");

/// The bundled React class sheet: three rows (one hidden) and a short chat
///
/// # Errors
/// Only if the bundled document is invalid.
pub fn sample_sheet() -> Result<Sheet, SnapshotError> {
    Sheet::from_json(SAMPLE_SHEET_JSON)
}

/// Load a sheet snapshot from a JSON file
///
/// # Errors
/// I/O failure or an invalid snapshot.
pub fn load_sheet(path: &Path) -> anyhow::Result<Sheet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read sheet {}", path.display()))?;
    Sheet::from_json(&raw).with_context(|| format!("invalid sheet {}", path.display()))
}
