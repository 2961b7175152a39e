//! Deployment-context loading and project-file parsing
//!
//! Context values come from the pipeline environment (`DEPLOY_DB`,
//! `DEPLOY_SCHEMA`, ...). Mandatory fields are validated here, once, so the
//! rendering code never has to re-check them. The optional `snowplan.toml`
//! file is parsed with unknown-key warnings rather than hard failures.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::types::{DeploymentContext, ProjectConfig, DEFAULT_GRANT_ROLE};
use crate::error::{SnowplanError, SnowplanResult};

/// File name of the optional project configuration in the scan root
pub const PROJECT_CONFIG_FILE: &str = "snowplan.toml";

/// Mandatory environment variables, validated before any scanning
const ENV_DATABASE: &str = "DEPLOY_DB";
const ENV_SCHEMA: &str = "DEPLOY_SCHEMA";
const ENV_REPO_NAME: &str = "REPO_NAME";
const ENV_BRANCH: &str = "BUILD_SOURCEBRANCHNAME";
const ENV_WAREHOUSE: &str = "WAREHOUSE";

/// Optional environment variables
const ENV_UTILITY_DB: &str = "UTILITY_DB";
const ENV_GIT_SCHEMA: &str = "GIT_SCHEMA";
const ENV_WORKSPACE_OWNER: &str = "WORKSPACE_OWNER";
const ENV_COMPUTE_POOL: &str = "COMPUTE_POOL";
const ENV_MIN_INSTANCES: &str = "MIN_INSTANCES";
const ENV_MAX_INSTANCES: &str = "MAX_INSTANCES";
const ENV_IMAGE_REPO: &str = "IMAGE_REPO_NAME";
const ENV_GRANT_ROLE: &str = "SNOWPLAN_GRANT_ROLE";

/// Build the deployment context from the process environment.
///
/// Fails with `MissingConfiguration` when a mandatory variable is unset or
/// blank. The execute epilogue and notebook integrations stay empty until a
/// project config is applied via [`DeploymentContext::with_project_config`].
pub fn context_from_env() -> SnowplanResult<DeploymentContext> {
    context_from_vars(|name| std::env::var(name).ok())
}

/// Build the deployment context from an arbitrary variable lookup.
///
/// Split out from [`context_from_env`] so tests can inject variables without
/// touching the process environment.
pub fn context_from_vars<F>(lookup: F) -> SnowplanResult<DeploymentContext>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &str| -> SnowplanResult<String> {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(SnowplanError::MissingConfiguration {
                field: name.to_string(),
            }),
        }
    };
    let optional = |name: &str| -> Option<String> {
        lookup(name).filter(|value| !value.trim().is_empty())
    };

    Ok(DeploymentContext {
        database: required(ENV_DATABASE)?,
        schema: required(ENV_SCHEMA)?,
        repo_name: required(ENV_REPO_NAME)?,
        branch: required(ENV_BRANCH)?,
        warehouse: required(ENV_WAREHOUSE)?,
        utility_db: optional(ENV_UTILITY_DB),
        git_schema: optional(ENV_GIT_SCHEMA),
        workspace_owner: optional(ENV_WORKSPACE_OWNER),
        compute_pool: optional(ENV_COMPUTE_POOL),
        min_instances: optional(ENV_MIN_INSTANCES).unwrap_or_else(|| "1".to_string()),
        max_instances: optional(ENV_MAX_INSTANCES).unwrap_or_else(|| "1".to_string()),
        image_repo: optional(ENV_IMAGE_REPO),
        grant_role: optional(ENV_GRANT_ROLE).unwrap_or_else(|| DEFAULT_GRANT_ROLE.to_string()),
        notebook_integrations: Vec::new(),
        execute_jobs: Vec::new(),
    })
}

impl DeploymentContext {
    /// Fold project-file settings into the context.
    pub fn with_project_config(mut self, config: ProjectConfig) -> Self {
        self.notebook_integrations = config.notebooks.integrations;
        self.execute_jobs = config.execute_jobs;
        self
    }
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, ". Did you mean '{suggestion}'?")?;
        }
        Ok(())
    }
}

/// Load `snowplan.toml` and collect non-fatal warnings (e.g. unknown keys).
///
/// A missing file is not an error and yields the default (empty) config.
pub fn load_project_config(path: &Path) -> SnowplanResult<(ProjectConfig, Vec<ConfigWarning>)> {
    if !path.exists() {
        return Ok((ProjectConfig::default(), Vec::new()));
    }
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: ProjectConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SnowplanError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "notebooks",
        "integrations",
        "execute",
        "notebook",
        "compute_pool",
        "runtime",
        "arguments",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
