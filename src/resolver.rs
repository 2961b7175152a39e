//! Canonical identifier derivation
//!
//! Maps discovered artifacts to platform-legal object names. App-family
//! artifacts derive `UPPER(repo_branch[_subpath])` from their location under
//! the apps root; notebooks are named by their file stem, matching how the
//! platform addresses notebook objects. Anything outside `[A-Za-z0-9_]`
//! after substitution is a fatal naming error, caught here rather than in
//! the target account.

use std::path::Path;

use crate::config::DeploymentContext;
use crate::error::{SnowplanError, SnowplanResult};

/// Suffix appended to an app identifier to name its container service
const SERVICE_SUFFIX: &str = "_SERVICE";

/// Suffix appended to a lowercased app identifier to name its image
const IMAGE_SUFFIX: &str = "_image";

/// A platform-legal name assigned to an artifact.
///
/// Construction goes through [`resolve_app`] or [`resolve_notebook`], both
/// of which enforce the identifier charset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedIdentifier(String);

impl ResolvedIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derived service object name for a container service deployment
    pub fn service_name(&self) -> String {
        format!("{}{}", self.0, SERVICE_SUFFIX)
    }

    /// Derived container image name for a container service deployment
    pub fn image_name(&self) -> String {
        format!("{}{}", self.0.to_lowercase(), IMAGE_SUFFIX)
    }
}

impl std::fmt::Display for ResolvedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve the identifier for an app-family artifact.
///
/// `rel_dir` is the artifact's directory relative to the apps root: empty
/// for an app at the root itself, a subpath otherwise. Pure function of
/// `(repo_name, branch, rel_dir)`.
pub fn resolve_app(
    context: &DeploymentContext,
    rel_dir: &Path,
) -> SnowplanResult<ResolvedIdentifier> {
    let mut name = format!("{}_{}", context.repo_name, context.branch);
    for component in rel_dir.components() {
        name.push('_');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    let name = name.to_uppercase();
    validate(&name, rel_dir)?;
    Ok(ResolvedIdentifier(name))
}

/// Resolve the identifier for a notebook artifact from its entry file name.
///
/// The stem is used verbatim; the generated statements quote it, so case is
/// preserved.
pub fn resolve_notebook(entry_file: &str, rel_dir: &Path) -> SnowplanResult<ResolvedIdentifier> {
    let stem = entry_file
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(entry_file);
    validate(stem, &rel_dir.join(entry_file))?;
    Ok(ResolvedIdentifier(stem.to_string()))
}

fn validate(name: &str, artifact: &Path) -> SnowplanResult<()> {
    let legal = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if legal {
        Ok(())
    } else {
        Err(SnowplanError::InvalidIdentifier {
            identifier: name.to_string(),
            artifact: artifact.to_path_buf(),
        })
    }
}
