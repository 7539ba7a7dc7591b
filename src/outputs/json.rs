//! JSON output for resolution results.
//!
//! Reports from `resolve-all` are written under a per-day directory:
//! ```text
//! output_dir/
//! └── 2026-10-19/
//!     └── epapers.json
//! ```
//! Re-running on the same day overwrites that day's report.

use crate::models::ResolutionReport;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// File name of the daily report inside its date directory.
pub const REPORT_FILE_NAME: &str = "epapers.json";

/// Pretty-print any serializable value for stdout.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Write a [`ResolutionReport`] to `{output_dir}/{local_date}/epapers.json`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_report(
    report: &ResolutionReport,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let day_dir = output_dir.join(&report.local_date);
    info!(day_dir = %day_dir.display(), "Ensuring report directory exists");
    if let Err(e) = fs::create_dir_all(&day_dir).await {
        error!(day_dir = %day_dir.display(), error = %e, "Failed to create report dir");
        return Err(e.into());
    }

    let path = day_dir.join(REPORT_FILE_NAME);
    fs::write(&path, json).await?;
    info!(path = %path.display(), sources = report.sources.len(), "Wrote resolution report");

    Ok(path)
}
