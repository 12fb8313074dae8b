//! CSV Export

use std::path::Path;

use anyhow::{Context, Result};

use super::ExportRecord;

/// Write orders to CSV file
pub fn write_orders(path: &Path, records: &[ExportRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;

    wtr.write_record([
        "id",
        "customer",
        "address",
        "deliverer",
        "created_at",
        "created",
        "status",
        "status_label",
        "status_color",
    ])?;

    for record in records {
        wtr.write_record([
            record.id.to_string(),
            record.customer.clone(),
            record.address.clone(),
            record.deliverer.clone().unwrap_or_default(),
            record.created_at.clone(),
            record.created.clone(),
            record.status.clone(),
            record.status_label.clone(),
            record.status_color.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}
