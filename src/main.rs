mod cli;

use hunters::{config, exerciser::Exerciser, report};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hunters=trace,hunters_db=debug".to_string()
        } else {
            "hunters=info,hunters_db=info".to_string()
        }
    });

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Values already in the environment take precedence over .env
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let db_config = config::db_config_from_env()?;
    let plan = config::load_plan_or_default(config::plan_path_from_env().as_deref())?;

    let mut exerciser = Exerciser::connect(&db_config).with_context(|| {
        format!(
            "Failed to connect to {}",
            db_config.database_path().display()
        )
    })?;

    let run_report = exerciser.run(&plan).context("Exercise run aborted")?;
    exerciser.close()?;

    let stdout = std::io::stdout();
    report::write_report(&mut stdout.lock(), &run_report)?;

    Ok(())
}
