//! Artifact discovery and classification
//!
//! Inspects each scanned directory for marker files and produces [`Artifact`]
//! records with a resolved [`ArtifactKind`]. The decision table:
//!
//! | marker              | Dockerfile | pool + image repo | kind              |
//! |---------------------|------------|-------------------|-------------------|
//! | `*.ipynb`           | n/a        | n/a               | Notebook (each)   |
//! | app entry file      | no         | n/a               | NativeApp, size>0 |
//! | app entry file      | yes        | yes               | ContainerService  |
//! | app entry file      | yes        | no                | NativeApp, size>0 |
//!
//! Zero-byte app entry files without a usable Dockerfile are scaffolding
//! placeholders and produce no artifact. A directory yields at most one app
//! artifact: classification stops at the first entry-file match.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DeploymentContext;
use crate::error::SnowplanResult;

/// Recognized app entry file names, in match priority order.
///
/// `main.py` and `streamlit_app.py` are equivalent aliases; when both exist
/// in one directory only the first is classified.
pub const APP_ENTRY_FILES: &[&str] = &["main.py", "streamlit_app.py"];

/// Container-build descriptor recognized next to an app entry file
pub const CONTAINER_DESCRIPTOR: &str = "Dockerfile";

/// Notebook marker extension
const NOTEBOOK_EXT: &str = ".ipynb";

/// Kind of deployable artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Jupyter notebook deployed as a platform notebook object
    Notebook,
    /// Streamlit app deployed natively on a warehouse
    NativeApp,
    /// Dockerized app deployed as a service on a compute pool
    ContainerService,
}

/// A discovered deployable unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    /// Directory containing the artifact, relative to its family's scan root
    pub dir: PathBuf,
    /// File name of the artifact's main file
    pub entry_file: String,
    /// A sibling container-build descriptor is present
    pub has_dockerfile: bool,
    /// Size of the entry file; zero marks a scaffolding placeholder
    pub size_bytes: u64,
}

/// Classify every notebook file in a visited directory.
///
/// Notebooks are discovered regardless of container context and are never
/// containerized.
pub fn classify_notebooks(
    abs_dir: &Path,
    rel_dir: &Path,
    files: &[String],
) -> SnowplanResult<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for file in files {
        if !file.ends_with(NOTEBOOK_EXT) {
            continue;
        }
        let size_bytes = fs::metadata(abs_dir.join(file))?.len();
        artifacts.push(Artifact {
            kind: ArtifactKind::Notebook,
            dir: rel_dir.to_path_buf(),
            entry_file: file.clone(),
            has_dockerfile: false,
            size_bytes,
        });
    }
    Ok(artifacts)
}

/// Classify the app artifact of a visited directory, if any.
///
/// A Dockerized entry file deploys as a container service only when the
/// context carries both a compute pool and an image repository; otherwise it
/// degrades to a native app. The native branch skips zero-byte entry files;
/// the container branch does not, since the image carries the code.
pub fn classify_app(
    abs_dir: &Path,
    rel_dir: &Path,
    files: &[String],
    context: &DeploymentContext,
) -> SnowplanResult<Option<Artifact>> {
    let Some(entry) = APP_ENTRY_FILES
        .iter()
        .find(|candidate| files.iter().any(|f| f == *candidate))
    else {
        return Ok(None);
    };

    let has_dockerfile = files.iter().any(|f| f == CONTAINER_DESCRIPTOR);
    let size_bytes = fs::metadata(abs_dir.join(entry))?.len();

    let kind = if has_dockerfile && context.container_services_enabled() {
        ArtifactKind::ContainerService
    } else if size_bytes > 0 {
        ArtifactKind::NativeApp
    } else {
        return Ok(None);
    };

    Ok(Some(Artifact {
        kind,
        dir: rel_dir.to_path_buf(),
        entry_file: entry.to_string(),
        has_dockerfile,
        size_bytes,
    }))
}
