//! Database and schema setup statements
//!
//! Always rendered first, exactly once per run. Every statement is
//! idempotent: the database is assumed to exist, the schema is created only
//! if absent, and grants converge.

use crate::render::{Statement, StatementKind};

/// Prologue template: select database, ensure schema, grant, select schema.
#[derive(Debug, Clone, Copy)]
pub struct SetupTemplate<'a> {
    pub database: &'a str,
    pub schema: &'a str,
    pub grant_role: &'a str,
}

impl SetupTemplate<'_> {
    pub fn render(&self) -> Vec<Statement> {
        let Self {
            database,
            schema,
            grant_role,
        } = self;
        vec![
            Statement::new(StatementKind::Setup, format!("USE DATABASE {database};")),
            Statement::new(
                StatementKind::Setup,
                format!("CREATE SCHEMA IF NOT EXISTS {schema};"),
            ),
            Statement::new(
                StatementKind::Setup,
                format!(
                    "GRANT ALL PRIVILEGES ON SCHEMA {database}.{schema} TO ROLE {grant_role};"
                ),
            ),
            Statement::new(StatementKind::Setup, format!("USE SCHEMA {schema};")),
        ]
    }
}
