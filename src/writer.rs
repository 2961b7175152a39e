//! Plan output writer
//!
//! Writes are atomic (tempfile + rename in the target directory) so a failed
//! run never leaves a partially written deployment script behind.

use std::io::Write;
use std::path::Path;

use crate::error::SnowplanResult;
use crate::plan::DeploymentPlan;

/// Write content to a file atomically.
pub fn atomic_write(path: &Path, content: &[u8]) -> SnowplanResult<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent)?;
    }

    let dir = parent.unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Persist the plan verbatim to `path`.
pub fn write_plan(path: &Path, plan: &DeploymentPlan) -> SnowplanResult<()> {
    atomic_write(path, plan.to_sql().as_bytes())
}
