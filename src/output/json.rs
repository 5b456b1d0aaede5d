// src/output/json.rs

use std::path::Path;

use tracing::info;

use crate::core::models::ScanReport;
use crate::error::ReconError;

pub fn to_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Writes the report as pretty-printed JSON to `path`.
pub fn write_report(report: &ScanReport, path: &Path) -> Result<(), ReconError> {
    let output_error = |source: std::io::Error| ReconError::Output { path: path.to_path_buf(), source };
    let body = to_json(report).map_err(|e| output_error(e.into()))?;
    std::fs::write(path, body).map_err(output_error)?;
    info!(path = %path.display(), "JSON report written.");
    Ok(())
}
