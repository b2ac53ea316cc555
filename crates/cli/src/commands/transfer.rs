use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use pipeboard_core::config::LoadOptions;
use pipeboard_core::store::ExportPayload;

use crate::commands::{open_store, CommandResult};

pub const DEFAULT_EXPORT_FILE: &str = "customers-export.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSummary {
    path: String,
    customer_count: usize,
    exported_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportSummary {
    path: String,
    customer_count: usize,
}

/// Writes the export payload to `output`, or embeds it in the command data
/// when `to_stdout` is set.
pub fn export(options: &LoadOptions, output: Option<&Path>, to_stdout: bool) -> CommandResult {
    let store = match open_store("export", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };
    let payload = store.export();

    if to_stdout {
        let message = format!("exported {} customers", payload.customers.len());
        return CommandResult::success_with_data("export", message, &payload);
    }

    let path = output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    if let Err(error) = write_payload(&path, &payload) {
        return CommandResult::failure("export", "file_io", format!("{error:#}"), 4);
    }

    let summary = ExportSummary {
        path: path.display().to_string(),
        customer_count: payload.customers.len(),
        exported_at: payload.exported_at,
    };
    CommandResult::success_with_data(
        "export",
        format!("exported {} customers to {}", summary.customer_count, summary.path),
        &summary,
    )
}

/// Replaces the collection with the file contents. A rejected payload
/// leaves stored data untouched.
pub fn import(options: &LoadOptions, path: &Path) -> CommandResult {
    let raw = match read_payload(path) {
        Ok(raw) => raw,
        Err(error) => return CommandResult::failure("import", "file_io", format!("{error:#}"), 5),
    };

    let mut store = match open_store("import", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match store.import_json(&raw) {
        Ok(customer_count) => {
            let summary = ImportSummary { path: path.display().to_string(), customer_count };
            CommandResult::success_with_data(
                "import",
                format!("imported {customer_count} customers"),
                &summary,
            )
        }
        Err(error) => CommandResult::from_import_error("import", &error),
    }
}

fn write_payload(path: &Path, payload: &ExportPayload) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(payload).context("failed to encode export payload")?;
    fs::write(path, body).with_context(|| format!("failed to write `{}`", path.display()))
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))
}
