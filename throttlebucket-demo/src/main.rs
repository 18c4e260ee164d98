mod config;
mod subjects;

use anyhow::Result;
use std::io::Write;

use crate::config::{Config, OutputFormat};
use crate::subjects::Subject;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from environment variables and CLI arguments
    let config = Config::from_env_and_args()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("throttlebucket={}", config.log_level).parse()?)
                .add_directive(format!("throttlebucket_demo={}", config.log_level).parse()?),
        )
        .init();

    let subjects = subjects::default_subjects()?;

    tracing::info!(
        "Running {} iterations every {}ms over {} subjects",
        config.iterations,
        config.tick_ms,
        subjects.len()
    );

    run(&config, &subjects, &mut std::io::stdout().lock()).await?;

    tracing::info!("Demo finished");
    Ok(())
}

/// Attempt one action per subject per iteration and print each outcome
async fn run<W: Write>(config: &Config, subjects: &[Subject], out: &mut W) -> Result<()> {
    for iteration in 0..config.iterations {
        for subject in subjects {
            let outcome = subject.attempt(iteration);
            match config.format {
                OutputFormat::Text => writeln!(out, "{}", subject.describe(&outcome))?,
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&outcome)?)?,
            }
        }
        out.flush()?;

        if iteration + 1 < config.iterations {
            tokio::time::sleep(config.tick()).await;
        }
    }

    Ok(())
}
