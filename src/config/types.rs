//! Core configuration types
//!
//! `DeploymentContext` is the immutable set of target-environment parameters
//! governing one generation run. `ProjectConfig` mirrors the optional
//! `snowplan.toml` file in the scan root.

use std::path::Path;

use serde::Deserialize;

use crate::error::{SnowplanError, SnowplanResult};

/// Default role receiving schema privileges and service endpoint access
pub const DEFAULT_GRANT_ROLE: &str = "GR_AI_ENGINEER";

/// How rendered statements address the artifact source tree on the platform.
///
/// Remote-source addressing points at a git repository stage; workspace
/// addressing points at a platform workspace owned by `owner` (fully
/// qualified, e.g. `USER$JDOE.PUBLIC`). Container services need neither -
/// their code ships inside the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceAddressing {
    GitRepository { utility_db: String, git_schema: String },
    Workspace { owner: String },
}

/// Immutable configuration for one generation run.
///
/// `database`, `schema`, `repo_name`, `branch` and `warehouse` are mandatory;
/// construction fails before any scanning when one is absent. Everything
/// else is optional and only gates specific rendering branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentContext {
    pub database: String,
    pub schema: String,
    pub repo_name: String,
    pub branch: String,
    pub warehouse: String,
    pub utility_db: Option<String>,
    pub git_schema: Option<String>,
    pub workspace_owner: Option<String>,
    pub compute_pool: Option<String>,
    pub min_instances: String,
    pub max_instances: String,
    pub image_repo: Option<String>,
    pub grant_role: String,
    /// External-access integrations applied to every deployed notebook
    pub notebook_integrations: Vec<String>,
    /// Post-deploy notebook invocations (plan epilogue)
    pub execute_jobs: Vec<ExecuteJob>,
}

impl DeploymentContext {
    /// Container-service classification requires both a compute pool and an
    /// image repository; with either missing, Dockerized apps degrade to
    /// native apps.
    pub fn container_services_enabled(&self) -> bool {
        self.compute_pool.is_some() && self.image_repo.is_some()
    }

    /// Resolve the source addressing flavor, if any is configured.
    ///
    /// Git-repository addressing wins when both of its fields are set;
    /// otherwise workspace addressing applies when an owner is configured.
    pub fn source_addressing(&self) -> Option<SourceAddressing> {
        match (&self.utility_db, &self.git_schema) {
            (Some(utility_db), Some(git_schema)) => Some(SourceAddressing::GitRepository {
                utility_db: utility_db.clone(),
                git_schema: git_schema.clone(),
            }),
            _ => self
                .workspace_owner
                .as_ref()
                .map(|owner| SourceAddressing::Workspace { owner: owner.clone() }),
        }
    }

    /// Render the remote source location for an artifact directory given
    /// relative to the repository root.
    ///
    /// Fails when no addressing flavor is configured; only artifacts that
    /// render a `FROM` clause (notebooks, native apps) call this.
    pub fn source_location(&self, repo_relative_dir: &Path) -> SnowplanResult<String> {
        let rel = slash_join(repo_relative_dir);
        let suffix = if rel.is_empty() {
            String::new()
        } else {
            format!("{rel}/")
        };
        match self.source_addressing() {
            Some(SourceAddressing::GitRepository {
                utility_db,
                git_schema,
            }) => Ok(format!(
                "@\"{utility_db}\".\"{git_schema}\".\"{repo}\"/branches/{branch}/{suffix}",
                repo = self.repo_name,
                branch = self.branch,
            )),
            Some(SourceAddressing::Workspace { owner }) => Ok(format!(
                "snow://workspace/{owner}.\"{repo}\"/versions/live/{suffix}",
                repo = self.repo_name,
            )),
            None => Err(SnowplanError::MissingConfiguration {
                field: "UTILITY_DB/GIT_SCHEMA or WORKSPACE_OWNER".to_string(),
            }),
        }
    }

    /// Fully qualified, quoted object name in the target schema
    pub fn qualified(&self, name: &str) -> String {
        format!("\"{}\".\"{}\".\"{}\"", self.database, self.schema, name)
    }
}

/// One configured post-deploy notebook invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecuteJob {
    /// Name of the deployed notebook to execute
    pub notebook: String,
    #[serde(default)]
    pub compute_pool: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub integrations: Vec<String>,
    /// CLI-style argument string passed to the notebook
    #[serde(default)]
    pub arguments: Option<String>,
}

/// Optional project configuration (`snowplan.toml` in the scan root)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub notebooks: NotebookConfig,
    #[serde(default, rename = "execute")]
    pub execute_jobs: Vec<ExecuteJob>,
}

/// Notebook-wide settings from `snowplan.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotebookConfig {
    /// External-access integrations granted to every deployed notebook
    #[serde(default)]
    pub integrations: Vec<String>,
}

/// Join path components with forward slashes regardless of platform
fn slash_join(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
