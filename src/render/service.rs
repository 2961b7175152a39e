//! Container service statements
//!
//! A Dockerized app deploys as an unconditional drop-if-exists followed by a
//! create-service embedding the structured specification block: container
//! image reference, exposed endpoint, and a role-scoped endpoint grant.
//! Idempotency comes from the drop/create pair rather than a replace.

use crate::render::{Statement, StatementKind};

/// Port exposed by the app container
const APP_PORT: u16 = 8501;

#[derive(Debug, Clone, Copy)]
pub struct ServiceTemplate<'a> {
    pub database: &'a str,
    /// Fully qualified, quoted service name
    pub qualified_name: &'a str,
    /// Bare service object name (spec comment header)
    pub service_name: &'a str,
    pub image_name: &'a str,
    pub image_repo: &'a str,
    pub compute_pool: &'a str,
    pub min_instances: &'a str,
    pub max_instances: &'a str,
    pub warehouse: &'a str,
    pub grant_role: &'a str,
}

impl ServiceTemplate<'_> {
    pub fn render(&self) -> Vec<Statement> {
        let drop = format!("DROP SERVICE IF EXISTS {};", self.qualified_name);

        let image_path = format!(
            "/{}/IMAGE_REPO/{}/{}:latest",
            self.database, self.image_repo, self.image_name
        );
        let create = format!(
            r#"-- Container Service: {service_name}
CREATE SERVICE {qualified_name}
  IN COMPUTE POOL {compute_pool}
  FROM SPECIFICATION $$
spec:
  containers:
    - name: app
      image: {image_path}
      env:
        SNOWFLAKE_WAREHOUSE: {warehouse}
  endpoints:
    - name: app
      port: {port}
      public: true
serviceRoles:
  - name: {grant_role}
    endpoints:
      - app
$$
  MIN_INSTANCES={min_instances}
  MAX_INSTANCES={max_instances}
  QUERY_WAREHOUSE={warehouse};"#,
            service_name = self.service_name,
            qualified_name = self.qualified_name,
            compute_pool = self.compute_pool,
            port = APP_PORT,
            warehouse = self.warehouse,
            grant_role = self.grant_role,
            min_instances = self.min_instances,
            max_instances = self.max_instances,
        );

        vec![
            Statement::new(StatementKind::App, drop),
            Statement::new(StatementKind::App, create),
        ]
    }
}
