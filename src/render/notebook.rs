//! Notebook deployment statements
//!
//! A notebook deploys as an idempotent create-or-replace referencing its
//! remote source location, followed by a promotion of the last uploaded
//! version to live. When external-access integrations are configured, a
//! third statement grants them; with none configured the statement is
//! omitted entirely.

use crate::render::{Statement, StatementKind};

/// Fixed notebook runtime selector
const NOTEBOOK_RUNTIME: &str = "SYSTEM$BASIC_RUNTIME";

#[derive(Debug, Clone, Copy)]
pub struct NotebookTemplate<'a> {
    /// Fully qualified, quoted notebook name
    pub qualified_name: &'a str,
    /// Remote source location (`FROM` clause)
    pub source_location: &'a str,
    pub main_file: &'a str,
    pub warehouse: &'a str,
    pub compute_pool: Option<&'a str>,
    pub integrations: &'a [String],
}

impl NotebookTemplate<'_> {
    pub fn render(&self) -> Vec<Statement> {
        let mut create = format!(
            "CREATE OR REPLACE NOTEBOOK IDENTIFIER('{}')\nFROM {}\n",
            self.qualified_name, self.source_location
        );
        if let Some(pool) = self.compute_pool {
            create.push_str(&format!("COMPUTE_POOL = '{pool}'\n"));
        }
        create.push_str(&format!(
            "QUERY_WAREHOUSE = '{}'\nRUNTIME_NAME = '{NOTEBOOK_RUNTIME}'\nMAIN_FILE = '{}';",
            self.warehouse, self.main_file
        ));

        let mut statements = vec![
            Statement::new(StatementKind::Notebook, create),
            Statement::new(
                StatementKind::Notebook,
                format!(
                    "ALTER NOTEBOOK {} ADD LIVE VERSION FROM LAST;",
                    self.qualified_name
                ),
            ),
        ];

        if !self.integrations.is_empty() {
            statements.push(Statement::new(
                StatementKind::Notebook,
                format!(
                    "ALTER NOTEBOOK {} SET EXTERNAL_ACCESS_INTEGRATIONS = ({});",
                    self.qualified_name,
                    quoted_list(self.integrations)
                ),
            ));
        }

        statements
    }
}

/// Render a SQL list of single-quoted values
pub(crate) fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
