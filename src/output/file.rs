//! Persisting the report.

use super::Report;
use crate::error::{Error, Result};
use std::path::Path;

/// Fail with [`Error::InsufficientData`] if `report` holds fewer than `min_total` IPs.
pub fn check_total(report: &Report, min_total: usize) -> Result<usize> {
    let total = report.total();
    if total < min_total {
        log::error!("Too few IPs after merge: {total} < {min_total}");
        return Err(Error::InsufficientData {
            total,
            minimum: min_total,
        });
    }
    Ok(total)
}

/// Write `report` to `path`, replacing any previous file.
///
/// The size check runs before anything touches the file system, so a failed
/// check leaves an existing report as it was. Missing parent directories are
/// created.
///
/// # Returns
/// * `Ok(usize)` - Number of IPs written
pub fn write_report(report: &Report, path: &Path, min_total: usize) -> Result<usize> {
    let total = check_total(report, min_total)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, report.render()).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Wrote {total} IPs -> {}", path.display());
    Ok(total)
}
