// Sara
// Main entry point for the sara binary

use clap::Parser;
use sara_engine::cli::{Cli, Command};
use sara_engine::config::Config;
use sara_engine::handlers::{handle_ask, handle_doctor, handle_serve, OutputFormat};
use sara_engine::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine output format
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Load configuration (or use custom path if provided)
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // --log wins over the config file; RUST_LOG wins over both
    let log_level = cli.log.as_deref().unwrap_or(config.core.log_level.as_str());
    init_telemetry(log_level, config.core.log_format);

    tracing::info!("Sara v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve { host, port } => {
            tracing::info!("Starting server...");
            handle_serve(host, port, &config).await
        }

        Command::Ask { text } => {
            tracing::debug!("Answering: {}", text);
            handle_ask(text, &config, format).await
        }

        Command::Doctor => {
            tracing::info!("Running diagnostics...");
            handle_doctor(&config, format).await
        }
    }
}
