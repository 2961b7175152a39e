//! Native Streamlit app statement
//!
//! A non-containerized app deploys as a single idempotent create-or-replace
//! referencing its remote source location, hosted on the query warehouse.

use crate::render::{Statement, StatementKind};

#[derive(Debug, Clone, Copy)]
pub struct StreamlitTemplate<'a> {
    /// Fully qualified, quoted app name
    pub qualified_name: &'a str,
    /// Remote source location (`FROM` clause)
    pub source_location: &'a str,
    pub main_file: &'a str,
    pub warehouse: &'a str,
}

impl StreamlitTemplate<'_> {
    pub fn render(&self) -> Statement {
        Statement::new(
            StatementKind::App,
            format!(
                "CREATE OR REPLACE STREAMLIT IDENTIFIER('{}')\nFROM {}\nMAIN_FILE = '{}'\nQUERY_WAREHOUSE = '{}';",
                self.qualified_name, self.source_location, self.main_file, self.warehouse
            ),
        )
    }
}
