use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use log::info;
use std::path::Path;

use vivigen::config::GeneratorConfig;

mod cli;
use cli::{Commands, VivigenCli};

/// Config file picked up from the working directory when --config is absent
const DEFAULT_CONFIG_FILE: &str = "vivigen.yml";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = VivigenCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    // Pick up a .env file if one is present
    if dotenv().is_ok() {
        info!("Loaded environment variables from .env file");
    }

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Generate {
            spec,
            docs_dir,
            out,
            model,
            mode,
            interactive,
        } => {
            cli::commands::generate::execute(
                &config,
                spec,
                docs_dir.as_deref(),
                out.as_deref(),
                model.as_deref(),
                mode.as_deref(),
                *interactive,
            )
            .await?;
        }

        Commands::Check => {
            cli::commands::check::execute(&config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(p) => {
            info!("Loading configuration from {}", p.display());
            Ok(GeneratorConfig::from_file(p)?)
        }
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                info!("Loading configuration from {}", fallback.display());
                Ok(GeneratorConfig::from_file(fallback)?)
            } else {
                Ok(GeneratorConfig::default())
            }
        }
    }
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
