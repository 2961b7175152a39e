//! Snowplan - deployment-plan generator for Snowflake analytics repositories
//!
//! Snowplan walks a repository checkout, discovers deployable artifacts
//! (Jupyter notebooks, Streamlit apps, containerized services), assigns each
//! a canonical platform identifier, and renders an ordered, idempotent SQL
//! deployment script (`deploy.sql`) for promotion into a target account.

pub mod classifier;
pub mod config;
pub mod error;
pub mod plan;
pub mod render;
pub mod resolver;
pub mod scanner;
pub mod writer;

// Re-exports for convenience
pub use classifier::{Artifact, ArtifactKind};
pub use config::{context_from_env, DeploymentContext, ExecuteJob, ProjectConfig};
pub use error::{SnowplanError, SnowplanResult};
pub use plan::{generate, DeploymentPlan};
pub use render::{Statement, StatementKind};
pub use resolver::ResolvedIdentifier;
pub use scanner::{scan, DirListing};
