//! Export Module
//!
//! Writes the orders currently on screen to disk.
//!
//! - 'e' key / `:export csv` → CSV
//! - 'E' key / `:export json` → JSON
//! - Files saved to <data dir>/exports/

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{error, info};

use crate::core::{Action, NotifyLevel};
use crate::domain::Order;
use crate::modules::orders::OrderRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One exported order: raw fields next to what the table shows
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub id: u64,
    pub customer: String,
    pub address: String,
    pub deliverer: Option<String>,
    pub created_at: String,
    pub created: String,
    pub status: String,
    pub status_label: String,
    pub status_color: String,
}

impl From<&Order> for ExportRecord {
    fn from(order: &Order) -> Self {
        let row = OrderRow::from_order(order);
        Self {
            id: order.id,
            customer: order.customer.clone(),
            address: order.address.clone(),
            deliverer: order.deliverer_name().map(str::to_string),
            created_at: order.created_at.clone(),
            created: row.created,
            status: order.status.as_str().to_string(),
            status_label: row.status_label,
            status_color: row.status_color.token().to_string(),
        }
    }
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S-%3f");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// First path in `dir` for `name` that does not exist yet; a numeric
/// suffix is added on collision
fn unused_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, extension) = name.rsplit_once('.').unwrap_or((name, ""));
    (1u32..)
        .map(|n| dir.join(format!("{stem}-{n}.{extension}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Write `orders` into `dir` and report the outcome as a notification
pub fn export_orders(orders: &[Order], format: ExportFormat, dir: &Path) -> Action {
    if orders.is_empty() {
        return Action::Notify("Nenhum pedido para exportar".to_string(), NotifyLevel::Warn);
    }

    if let Err(e) = fs::create_dir_all(dir) {
        error!(dir = %dir.display(), error = %e, "cannot create export directory");
        return Action::Notify(
            format!("Falha ao criar diretório de exportação: {}", e),
            NotifyLevel::Error,
        );
    }

    let records: Vec<ExportRecord> = orders.iter().map(ExportRecord::from).collect();
    let path = unused_path(dir, &generate_filename("orders", format.extension()));

    let result = match format {
        ExportFormat::Csv => csv_export::write_orders(&path, &records),
        ExportFormat::Json => json_export::write_orders(&path, &records),
    };

    match result {
        Ok(count) => {
            info!(count, path = %path.display(), "orders exported");
            Action::Notify(
                format!("{} pedidos exportados para {}", count, path.display()),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "export failed");
            Action::Notify(format!("Falha na exportação: {:#}", e), NotifyLevel::Error)
        }
    }
}
