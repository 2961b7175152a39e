//! Common test utilities for Snowplan CLI tests.
//!
//! Provides `TestEnv`, an isolated repository checkout in a temp directory,
//! plus helpers to run the snowplan binary with a controlled environment.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared before every run so the
/// host environment never leaks into a test.
pub const SNOWPLAN_VARS: &[&str] = &[
    "DEPLOY_DB",
    "DEPLOY_SCHEMA",
    "REPO_NAME",
    "BUILD_SOURCEBRANCHNAME",
    "WAREHOUSE",
    "UTILITY_DB",
    "GIT_SCHEMA",
    "WORKSPACE_OWNER",
    "COMPUTE_POOL",
    "MIN_INSTANCES",
    "MAX_INSTANCES",
    "IMAGE_REPO_NAME",
    "SNOWPLAN_GRANT_ROLE",
];

/// Mandatory context variables for a minimal successful run, with git
/// addressing configured.
pub fn base_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("DEPLOY_DB", "DB"),
        ("DEPLOY_SCHEMA", "SC"),
        ("REPO_NAME", "proj"),
        ("BUILD_SOURCEBRANCHNAME", "main"),
        ("WAREHOUSE", "WH"),
        ("UTILITY_DB", "UTIL"),
        ("GIT_SCHEMA", "GIT"),
    ]
}

/// Result of running a snowplan CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated repository checkout in a temp directory.
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("create temp root"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_snowplan")),
        }
    }

    /// Get path relative to the repository root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Create a file (and parent directories) under the repository root
    pub fn write_file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
        self
    }

    /// Run snowplan from the repository root with the given env vars
    pub fn run(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from(self.root.path(), args, env_vars)
    }

    /// Run snowplan from a specific directory with the given env vars
    pub fn run_from(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd).args(args);
        for var in SNOWPLAN_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute snowplan");
        output_to_result(output)
    }

    /// Read the generated deployment script
    pub fn read_deploy_sql(&self) -> String {
        std::fs::read_to_string(self.path("deploy.sql")).expect("deploy.sql should exist")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Build the canonical example checkout: one notebook, one Dockerized app.
pub fn example_checkout() -> TestEnv {
    let env = TestEnv::new();
    env.write_file("notebooks/a.ipynb", "{\"cells\": []}")
        .write_file("apps/svc/main.py", "import streamlit as st")
        .write_file("apps/svc/Dockerfile", "FROM python:3.11-slim");
    env
}
