//! Demo configuration and CLI argument parsing
//!
//! Settings come from command-line arguments with environment variable
//! fallbacks (THROTTLEBUCKET_ prefix).
//!
//! # Configuration Priority
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Default values (lowest priority)
//!
//! # Example Usage
//!
//! ```bash
//! # Five fast iterations as JSON lines
//! throttlebucket-demo --iterations 5 --tick-ms 100 --format json
//!
//! # Using environment variables
//! export THROTTLEBUCKET_ITERATIONS=30
//! export THROTTLEBUCKET_LOG_LEVEL=debug
//! throttlebucket-demo
//! ```

use anyhow::{Result, anyhow};
use clap::Parser;
use serde::Deserialize;
use std::time::Duration;

/// Demo configuration built from CLI arguments and environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Number of loop iterations
    pub iterations: u32,
    /// Pause between iterations in milliseconds
    pub tick_ms: u64,
    /// How outcomes are printed
    pub format: OutputFormat,
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// Output format for consume outcomes
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable `[True]`/`[False]` lines
    Text,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Invalid output format: {}. Valid options are: text, json",
                s
            )),
        }
    }
}

/// Command-line arguments for the demo
///
/// All arguments can also be set via environment variables with the
/// THROTTLEBUCKET_ prefix. CLI arguments take precedence over environment variables.
#[derive(Parser, Debug)]
#[command(
    name = "throttlebucket-demo",
    about = "Token bucket rate limiting demo",
    long_about = "Consumes one token per iteration from three independent buckets \
    (1 message per second, 3 failed card transactions per day, 20 account creations per day) \
    and prints whether each action was allowed.\n\nEnvironment variables with THROTTLEBUCKET_ \
    prefix are supported. CLI arguments take precedence over environment variables."
)]
pub struct Args {
    #[arg(
        long,
        value_name = "N",
        help = "Number of iterations",
        default_value_t = 21,
        env = "THROTTLEBUCKET_ITERATIONS"
    )]
    pub iterations: u32,
    #[arg(
        long,
        value_name = "MS",
        help = "Pause between iterations (milliseconds)",
        default_value_t = 1000,
        env = "THROTTLEBUCKET_TICK_MS"
    )]
    pub tick_ms: u64,
    #[arg(
        long,
        value_name = "FORMAT",
        help = "Output format: text, json",
        default_value = "text",
        env = "THROTTLEBUCKET_FORMAT"
    )]
    pub format: OutputFormat,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level: error, warn, info, debug, trace",
        default_value = "info",
        env = "THROTTLEBUCKET_LOG_LEVEL"
    )]
    pub log_level: String,

    // Utility options
    #[arg(
        long,
        help = "List all environment variables and exit",
        action = clap::ArgAction::SetTrue
    )]
    pub list_env_vars: bool,
}

impl Config {
    /// Build configuration from environment variables and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn from_env_and_args() -> Result<Self> {
        let args = Args::parse();

        if args.list_env_vars {
            Self::print_env_vars();
            std::process::exit(0);
        }

        let config = Self::from_args(args);
        config.validate()?;

        Ok(config)
    }

    fn from_args(args: Args) -> Self {
        Config {
            iterations: args.iterations,
            tick_ms: args.tick_ms,
            format: args.format,
            log_level: args.log_level,
        }
    }

    /// Pause between iterations
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(anyhow!("--iterations must be at least 1"));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!(
                "Invalid log level: {}. Valid options are: error, warn, info, debug, trace",
                other
            )),
        }
    }

    fn print_env_vars() {
        println!("ThrottleBucket Demo Environment Variables");
        println!("=========================================");
        println!();
        println!("All environment variables use the THROTTLEBUCKET_ prefix.");
        println!("CLI arguments take precedence over environment variables.");
        println!();
        println!("  THROTTLEBUCKET_ITERATIONS=<n>         Number of iterations [default: 21]");
        println!(
            "  THROTTLEBUCKET_TICK_MS=<ms>           Pause between iterations [default: 1000]"
        );
        println!("  THROTTLEBUCKET_FORMAT=<format>        Output format: text, json [default: text]");
        println!(
            "  THROTTLEBUCKET_LOG_LEVEL=<level>      Log level: error, warn, info, debug, trace [default: info]"
        );
        println!();
        println!("Examples:");
        println!("  export THROTTLEBUCKET_ITERATIONS=5");
        println!("  throttlebucket-demo --tick-ms 200  # Five iterations, 200ms apart");
    }
}
