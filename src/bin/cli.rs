//! OpenEdu course collector CLI.
//!
//! Local execution entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use openedu_crawler::{error::Result, models::Config, pipeline};

/// openedu-crawler - OpenEdu Course Detail Collector
#[derive(Parser, Debug)]
#[command(
    name = "openedu-crawler",
    version,
    about = "Collects OpenEdu course catalog details into CSV datasets"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch detail pages for every course in the input table
    Collect {
        /// Input table with course stubs (overrides the configured path)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory for the output tables (overrides the configured path)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Check the configuration and input table without fetching
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Collect { input, output_dir } => {
            if let Some(input) = input {
                config.paths.input_csv = input;
            }
            if let Some(output_dir) = output_dir {
                config.paths.output_dir = output_dir;
            }
            config.validate()?;

            pipeline::run_collector(&config).await?;
            log::info!("Collection complete!");
        }

        Command::Validate => {
            pipeline::run_validate(&config).await?;
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
