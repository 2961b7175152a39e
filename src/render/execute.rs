//! Post-deploy notebook execution statements
//!
//! Rendered only for configured execute jobs (plan epilogue). The compute
//! pool, runtime, and integration clauses are each omitted when unset or
//! empty; an absent argument string renders empty parentheses.

use crate::config::ExecuteJob;
use crate::render::notebook::quoted_list;
use crate::render::{Statement, StatementKind};

#[derive(Debug, Clone, Copy)]
pub struct ExecuteTemplate<'a> {
    /// Fully qualified, quoted notebook name
    pub qualified_name: &'a str,
    pub job: &'a ExecuteJob,
}

impl ExecuteTemplate<'_> {
    pub fn render(&self) -> Statement {
        let arguments = self.job.arguments.as_deref().unwrap_or("");
        let arguments = if arguments.is_empty() {
            String::new()
        } else {
            format!("'{arguments}'")
        };

        let mut lines = vec![format!(
            "EXECUTE NOTEBOOK {}({arguments})",
            self.qualified_name
        )];
        if let Some(pool) = self.job.compute_pool.as_deref() {
            lines.push(format!("COMPUTE_POOL = '{pool}'"));
        }
        if let Some(runtime) = self.job.runtime.as_deref() {
            lines.push(format!("RUNTIME_NAME = '{runtime}'"));
        }
        if !self.job.integrations.is_empty() {
            lines.push(format!(
                "EXTERNAL_ACCESS_INTEGRATIONS = ({})",
                quoted_list(&self.job.integrations)
            ));
        }

        Statement::new(StatementKind::Execute, lines.join("\n") + ";")
    }
}
