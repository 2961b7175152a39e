//! End-to-end CLI tests for `snowplan generate`

mod common;

use common::*;

fn container_env() -> Vec<(&'static str, &'static str)> {
    let mut env = base_env();
    env.push(("COMPUTE_POOL", "CP"));
    env.push(("IMAGE_REPO_NAME", "REPO"));
    env
}

#[test]
fn generate_empty_tree_is_setup_only() {
    let env = TestEnv::new();
    let result = env.run(&["generate"], &base_env());

    assert!(result.success, "generate failed:\n{}", result.combined_output());

    let sql = env.read_deploy_sql();
    assert_eq!(
        sql,
        "USE DATABASE DB;\n\n\
         CREATE SCHEMA IF NOT EXISTS SC;\n\n\
         GRANT ALL PRIVILEGES ON SCHEMA DB.SC TO ROLE GR_AI_ENGINEER;\n\n\
         USE SCHEMA SC;\n"
    );
}

#[test]
fn generate_example_checkout_full_plan() {
    let env = example_checkout();
    let result = env.run(&["generate"], &container_env());

    assert!(result.success, "generate failed:\n{}", result.combined_output());

    let sql = env.read_deploy_sql();
    // Notebook create + live promotion
    assert!(sql.contains("CREATE OR REPLACE NOTEBOOK IDENTIFIER('\"DB\".\"SC\".\"a\"')"));
    assert!(sql.contains("FROM @\"UTIL\".\"GIT\".\"proj\"/branches/main/notebooks/"));
    assert!(sql.contains("ALTER NOTEBOOK \"DB\".\"SC\".\"a\" ADD LIVE VERSION FROM LAST;"));
    // Container service drop + create
    assert!(sql.contains("DROP SERVICE IF EXISTS \"DB\".\"SC\".\"PROJ_MAIN_SVC_SERVICE\";"));
    assert!(sql.contains("image: /DB/IMAGE_REPO/REPO/proj_main_svc_image:latest"));
    // No native-app statement for the Dockerized app
    assert!(!sql.contains("CREATE OR REPLACE STREAMLIT"));
}

#[test]
fn generate_degrades_to_streamlit_without_image_repo() {
    let env = example_checkout();
    let mut vars = base_env();
    vars.push(("COMPUTE_POOL", "CP"));
    let result = env.run(&["generate"], &vars);

    assert!(result.success, "generate failed:\n{}", result.combined_output());

    let sql = env.read_deploy_sql();
    assert!(sql.contains(
        "CREATE OR REPLACE STREAMLIT IDENTIFIER('\"DB\".\"SC\".\"PROJ_MAIN_SVC\"')"
    ));
    assert!(sql.contains("FROM @\"UTIL\".\"GIT\".\"proj\"/branches/main/apps/svc/"));
    assert!(!sql.contains("CREATE SERVICE"));
}

#[test]
fn generate_echoes_plan_to_stdout() {
    let env = example_checkout();
    let result = env.run(&["generate"], &container_env());

    assert!(result.success);
    assert!(result.stdout.contains("Generated SQL statements:"));
    assert!(result.stdout.contains("USE DATABASE DB;"));
    assert!(result.stdout.contains("PROJ_MAIN_SVC_SERVICE"));
}

#[test]
fn generate_dry_run_writes_nothing() {
    let env = example_checkout();
    let result = env.run(&["generate", "--dry-run"], &container_env());

    assert!(result.success, "dry run failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("USE DATABASE DB;"));
    assert!(!env.path("deploy.sql").exists());
}

#[test]
fn generate_twice_is_byte_identical() {
    let env = example_checkout();

    let first = env.run(&["generate"], &container_env());
    assert!(first.success);
    let first_sql = env.read_deploy_sql();

    let second = env.run(&["generate"], &container_env());
    assert!(second.success);
    let second_sql = env.read_deploy_sql();

    assert_eq!(first_sql, second_sql);
}

#[test]
fn generate_zero_byte_entry_file_skipped() {
    let env = TestEnv::new();
    env.write_file("apps/stub/main.py", "");
    let result = env.run(&["generate"], &base_env());

    assert!(result.success, "generate failed:\n{}", result.combined_output());
    let sql = env.read_deploy_sql();
    assert!(!sql.contains("STREAMLIT"));
    assert!(!sql.contains("stub"));
}

#[test]
fn generate_custom_output_path() {
    let env = example_checkout();
    let out = env.path("out/custom.sql");
    let result = env.run(
        &["generate", "--output", out.to_str().unwrap()],
        &container_env(),
    );

    assert!(result.success, "generate failed:\n{}", result.combined_output());
    assert!(out.exists());
    assert!(!env.path("deploy.sql").exists());
}

#[test]
fn generate_project_config_execute_epilogue() {
    let env = example_checkout();
    env.write_file(
        "snowplan.toml",
        "[[execute]]\nnotebook = \"a\"\narguments = \"--full-refresh\"\n",
    );
    let result = env.run(&["generate"], &container_env());

    assert!(result.success, "generate failed:\n{}", result.combined_output());
    let sql = env.read_deploy_sql();
    assert!(sql.ends_with("EXECUTE NOTEBOOK \"DB\".\"SC\".\"a\"('--full-refresh');\n"));
}

#[test]
fn generate_project_config_notebook_integrations() {
    let env = example_checkout();
    env.write_file(
        "snowplan.toml",
        "[notebooks]\nintegrations = [\"EXT_XS_INT_PYPI\"]\n",
    );
    let result = env.run(&["generate"], &container_env());

    assert!(result.success);
    let sql = env.read_deploy_sql();
    assert!(sql.contains(
        "ALTER NOTEBOOK \"DB\".\"SC\".\"a\" SET EXTERNAL_ACCESS_INTEGRATIONS = ('EXT_XS_INT_PYPI');"
    ));
}

#[test]
fn generate_unknown_config_key_warns_but_succeeds() {
    let env = TestEnv::new();
    env.write_file("snowplan.toml", "[notebooks]\nintegartions = []\n");
    let result = env.run(&["generate"], &base_env());

    assert!(result.success, "generate failed:\n{}", result.combined_output());
    assert!(result.stderr.contains("unknown key 'integartions'"));
    assert!(result.stderr.contains("Did you mean 'integrations'?"));
}

#[test]
fn generate_workspace_addressing() {
    let env = TestEnv::new();
    env.write_file("notebooks/a.ipynb", "{}");
    let vars = vec![
        ("DEPLOY_DB", "DB"),
        ("DEPLOY_SCHEMA", "SC"),
        ("REPO_NAME", "proj"),
        ("BUILD_SOURCEBRANCHNAME", "main"),
        ("WAREHOUSE", "WH"),
        ("WORKSPACE_OWNER", "USER$JDOE.PUBLIC"),
    ];
    let result = env.run(&["generate"], &vars);

    assert!(result.success, "generate failed:\n{}", result.combined_output());
    let sql = env.read_deploy_sql();
    assert!(sql.contains(
        "FROM snow://workspace/USER$JDOE.PUBLIC.\"proj\"/versions/live/notebooks/"
    ));
}

#[test]
fn generate_grant_role_override() {
    let env = TestEnv::new();
    let mut vars = base_env();
    vars.push(("SNOWPLAN_GRANT_ROLE", "GR_ANALYTICS"));
    let result = env.run(&["generate"], &vars);

    assert!(result.success);
    let sql = env.read_deploy_sql();
    assert!(sql.contains("GRANT ALL PRIVILEGES ON SCHEMA DB.SC TO ROLE GR_ANALYTICS;"));
}
