//! Statement rendering
//!
//! One submodule per statement family, each exposing a typed template struct
//! with a `render()` function. Optional clauses are typed as `Option`/slice
//! parameters and omitted from the output when absent or empty - a clause is
//! never rendered with an empty value. Rendering is byte-for-byte
//! deterministic for identical inputs.

mod app;
mod execute;
mod notebook;
mod service;
mod setup;

pub use app::StreamlitTemplate;
pub use execute::ExecuteTemplate;
pub use notebook::NotebookTemplate;
pub use service::ServiceTemplate;
pub use setup::SetupTemplate;

/// Ordering key of a rendered statement within the deployment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatementKind {
    Setup,
    Notebook,
    App,
    Execute,
}

/// One rendered unit of output text, tagged for plan ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub text: String,
}

impl Statement {
    pub fn new(kind: StatementKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
