//! Deployment-plan assembly
//!
//! Drives the full pipeline: scan → classify → resolve → render → assemble.
//! The plan is built completely in memory before anything is written, so a
//! fatal error (ambiguous identifier, unreadable directory, missing
//! addressing) produces no output at all. Assembly order is fixed: Setup,
//! then notebooks in discovery order, then apps in discovery order (kinds
//! interleaved, not grouped), then configured execute jobs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::classifier::{self, Artifact, ArtifactKind};
use crate::config::DeploymentContext;
use crate::error::{SnowplanError, SnowplanResult};
use crate::render::{
    ExecuteTemplate, NotebookTemplate, ServiceTemplate, SetupTemplate, Statement, StreamlitTemplate,
};
use crate::resolver;
use crate::scanner;

/// Default name of the apps root under the repository root
pub const DEFAULT_APPS_DIR: &str = "apps";

/// The fully ordered, rendered sequence of statements for one run.
///
/// Write-once: built by [`generate`], persisted verbatim by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentPlan {
    statements: Vec<Statement>,
}

impl DeploymentPlan {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Serialize the plan: statements separated by blank lines, trailing
    /// newline, UTF-8.
    pub fn to_sql(&self) -> String {
        let mut sql = self
            .statements
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        sql.push('\n');
        sql
    }
}

/// Tracks claimed identifiers so collisions fail instead of overwriting.
#[derive(Default)]
struct IdentifierRegistry {
    claimed: HashMap<String, PathBuf>,
}

impl IdentifierRegistry {
    fn claim(&mut self, identifier: &str, artifact: &Path) -> SnowplanResult<()> {
        if let Some(first) = self.claimed.get(identifier) {
            return Err(SnowplanError::AmbiguousArtifact {
                identifier: identifier.to_string(),
                first: first.clone(),
                second: artifact.to_path_buf(),
            });
        }
        self.claimed
            .insert(identifier.to_string(), artifact.to_path_buf());
        Ok(())
    }
}

/// Generate the deployment plan for a repository checkout.
///
/// `root` is the notebook root (scanned recursively); `apps_dir` names the
/// app root under it. A missing apps root simply contributes no app
/// artifacts.
pub fn generate(
    root: &Path,
    apps_dir: &str,
    context: &DeploymentContext,
) -> SnowplanResult<DeploymentPlan> {
    let mut registry = IdentifierRegistry::default();
    let mut statements = SetupTemplate {
        database: &context.database,
        schema: &context.schema,
        grant_role: &context.grant_role,
    }
    .render();

    for artifact in discover_notebooks(root)? {
        statements.extend(render_notebook(&artifact, context, &mut registry)?);
    }
    for artifact in discover_apps(&root.join(apps_dir), context)? {
        statements.extend(render_app(&artifact, apps_dir, context, &mut registry)?);
    }
    for job in &context.execute_jobs {
        let qualified = context.qualified(&job.notebook);
        statements.push(
            ExecuteTemplate {
                qualified_name: &qualified,
                job,
            }
            .render(),
        );
    }

    Ok(DeploymentPlan { statements })
}

fn discover_notebooks(root: &Path) -> SnowplanResult<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for listing in scanner::scan(root) {
        let listing = listing?;
        let rel = rel_dir(&listing.dir, root);
        artifacts.extend(classifier::classify_notebooks(
            &listing.dir,
            &rel,
            &listing.files,
        )?);
    }
    Ok(artifacts)
}

fn discover_apps(
    apps_root: &Path,
    context: &DeploymentContext,
) -> SnowplanResult<Vec<Artifact>> {
    let mut artifacts = Vec::new();
    for listing in scanner::scan(apps_root) {
        let listing = listing?;
        let rel = rel_dir(&listing.dir, apps_root);
        if let Some(artifact) =
            classifier::classify_app(&listing.dir, &rel, &listing.files, context)?
        {
            artifacts.push(artifact);
        }
    }
    Ok(artifacts)
}

fn rel_dir(dir: &Path, root: &Path) -> PathBuf {
    dir.strip_prefix(root).unwrap_or(dir).to_path_buf()
}

fn render_notebook(
    artifact: &Artifact,
    context: &DeploymentContext,
    registry: &mut IdentifierRegistry,
) -> SnowplanResult<Vec<Statement>> {
    let identifier = resolver::resolve_notebook(&artifact.entry_file, &artifact.dir)?;
    registry.claim(identifier.as_str(), &artifact.dir.join(&artifact.entry_file))?;

    let qualified = context.qualified(identifier.as_str());
    let location = context.source_location(&artifact.dir)?;
    Ok(NotebookTemplate {
        qualified_name: &qualified,
        source_location: &location,
        main_file: &artifact.entry_file,
        warehouse: &context.warehouse,
        compute_pool: context.compute_pool.as_deref(),
        integrations: &context.notebook_integrations,
    }
    .render())
}

fn render_app(
    artifact: &Artifact,
    apps_dir: &str,
    context: &DeploymentContext,
    registry: &mut IdentifierRegistry,
) -> SnowplanResult<Vec<Statement>> {
    let identifier = resolver::resolve_app(context, &artifact.dir)?;
    registry.claim(identifier.as_str(), &artifact.dir)?;

    match artifact.kind {
        ArtifactKind::ContainerService => {
            let service_name = identifier.service_name();
            registry.claim(&service_name, &artifact.dir)?;

            let qualified = context.qualified(&service_name);
            let image_name = identifier.image_name();
            // Classification guarantees pool and repo are present here
            let (Some(compute_pool), Some(image_repo)) =
                (context.compute_pool.as_deref(), context.image_repo.as_deref())
            else {
                return Err(SnowplanError::MissingConfiguration {
                    field: "COMPUTE_POOL/IMAGE_REPO_NAME".to_string(),
                });
            };
            Ok(ServiceTemplate {
                database: &context.database,
                qualified_name: &qualified,
                service_name: &service_name,
                image_name: &image_name,
                image_repo,
                compute_pool,
                min_instances: &context.min_instances,
                max_instances: &context.max_instances,
                warehouse: &context.warehouse,
                grant_role: &context.grant_role,
            }
            .render())
        }
        ArtifactKind::NativeApp => {
            let qualified = context.qualified(identifier.as_str());
            let location = context.source_location(&Path::new(apps_dir).join(&artifact.dir))?;
            Ok(vec![StreamlitTemplate {
                qualified_name: &qualified,
                source_location: &location,
                main_file: &artifact.entry_file,
                warehouse: &context.warehouse,
            }
            .render()])
        }
        ArtifactKind::Notebook => unreachable!("app roots never classify notebooks"),
    }
}
