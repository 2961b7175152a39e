//! Snowplan CLI - deployment-plan generator
//!
//! Usage: snowplan <COMMAND>
//!
//! Commands:
//!   generate  Scan the repository and render the deployment script

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use snowplan::config::{self, PROJECT_CONFIG_FILE};
use snowplan::plan::{self, DEFAULT_APPS_DIR};
use snowplan::writer;

/// Snowplan - deployment-plan generator for Snowflake analytics repositories
#[derive(Parser, Debug)]
#[command(name = "snowplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the repository and render the deployment script
    Generate {
        /// Repository root to scan for notebooks
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Name of the apps directory under the root
        #[arg(long, default_value = DEFAULT_APPS_DIR)]
        apps_dir: String,

        /// Output file (defaults to <root>/deploy.sql)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the plan without writing the output file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            root,
            apps_dir,
            output,
            dry_run,
        } => cmd_generate(&root, &apps_dir, output, dry_run),
    }
}

fn cmd_generate(
    root: &std::path::Path,
    apps_dir: &str,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let config_path = root.join(PROJECT_CONFIG_FILE);
    let (project_config, warnings) = config::load_project_config(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }

    let context = config::context_from_env()
        .context("deployment context incomplete - set the DEPLOY_* pipeline variables")?
        .with_project_config(project_config);

    let plan = plan::generate(root, apps_dir, &context)
        .with_context(|| format!("failed to generate plan for {}", root.display()))?;
    let sql = plan.to_sql();

    // Echo for operator review
    println!();
    println!("{}", "=".repeat(80));
    println!("Generated SQL statements:");
    println!("{}", "=".repeat(80));
    println!("{sql}");

    if dry_run {
        return Ok(());
    }

    let output = output.unwrap_or_else(|| root.join("deploy.sql"));
    writer::write_plan(&output, &plan)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}
