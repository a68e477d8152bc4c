//! vidchunk CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidchunk::cli::{commands, Cli, Commands};
use vidchunk::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("vidchunk={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Split { input, job_id, manifest, overrides } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_split(input, job_id.clone(), manifest.clone(), overrides, settings)
                .await?;
        }

        Commands::Plan { input, json, overrides } => {
            commands::run_plan(input, *json, overrides, settings).await?;
        }

        Commands::Info { input } => {
            commands::run_info(input, settings).await?;
        }

        Commands::Frame { input, timecode, output } => {
            commands::run_frame(input, timecode, output, settings).await?;
        }

        Commands::Clean { job_id } => {
            commands::run_clean(job_id, settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
