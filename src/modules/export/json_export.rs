//! JSON Export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::ExportRecord;

/// Write orders to a pretty-printed JSON array
pub fn write_orders(path: &Path, records: &[ExportRecord]) -> Result<usize> {
    let json = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    file.write_all(json.as_bytes())?;

    Ok(records.len())
}
