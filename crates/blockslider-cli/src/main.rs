use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blockslider_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "blockslider")]
#[command(author, version, about = "Terminal viewer for article block sliders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a deck in the slider viewer
    Run {
        /// Deck file (TOML)
        deck: PathBuf,
    },
    /// Print how a deck's slider resolves, as JSON
    Inspect {
        /// Deck file (TOML)
        deck: PathBuf,
        /// Terminal width to classify the screen size against
        #[arg(short, long, default_value_t = 120)]
        width: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Run { deck } => {
            // The terminal belongs to the viewer, so logs go to a file
            init_file_logging(&config)?;
            commands::run::run(config, &deck).await
        }
        Commands::Inspect { deck, width } => {
            init_logging(&config);
            commands::inspect::run(&config, &deck, width)
        }
    }
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()))
}

fn init_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn init_file_logging(config: &AppConfig) -> Result<()> {
    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let log_path = config.log_path();
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
