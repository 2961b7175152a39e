//! Deployment-context construction and project configuration
//!
//! The context is built once per run from environment variables (see
//! `loader`), validated up front, and never mutated afterwards. The optional
//! `snowplan.toml` project file contributes the execute epilogue and the
//! notebook integration list.

mod loader;
mod types;

pub use loader::{
    context_from_env, context_from_vars, load_project_config, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{DeploymentContext, ExecuteJob, NotebookConfig, ProjectConfig, SourceAddressing};
