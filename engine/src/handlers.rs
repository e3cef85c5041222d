//! Command handlers for CLI operations
//!
//! - serve: Run the HTTP endpoint until Ctrl-C
//! - ask: Answer one utterance and exit
//! - doctor: Validate configuration and check the external services

use anyhow::{Context, Result};
use sdk::{EngineError, SaraErrorExt};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::llm::{self, TextGenerator};
use crate::memory::MemoryBuffer;
use crate::pipeline::ResponsePipeline;
use crate::search::google::GoogleSearch;
use crate::search::SearchProvider;
use crate::server;

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Wire the pipeline from configuration
pub fn build_pipeline(config: &Config) -> Result<Arc<ResponsePipeline>> {
    let generator =
        llm::build_generator(&config.llm).context("Failed to build generation provider")?;

    let search = GoogleSearch::from_config(&config.search);
    if !search.is_configured() {
        tracing::warn!("Search credentials are not configured; web lookups will fail");
    }

    let pipeline = ResponsePipeline::new(
        MemoryBuffer::with_capacity(config.memory.capacity),
        generator,
        Arc::new(search),
    );

    Ok(Arc::new(pipeline))
}

/// Query sent by `doctor` to exercise the search credentials
const SEARCH_CHECK_QUERY: &str = "weather";

/// Run one real search and count the items that came back
pub async fn check_search(provider: &dyn SearchProvider) -> Result<usize, EngineError> {
    let response = provider.search(SEARCH_CHECK_QUERY).await?;
    Ok(response.items.len())
}

/// Log which generator is configured and whether it answers
async fn log_startup_diagnostics(generator: &dyn TextGenerator) {
    tracing::info!(
        "Generation provider: {} (model {})",
        generator.name(),
        generator.model()
    );

    if generator.check_health().await {
        tracing::info!("Generation provider is reachable");
    } else {
        tracing::warn!(
            "Generation provider {} is not reachable; answers will fail until it is",
            generator.name()
        );
    }
}

/// Start the HTTP endpoint
///
/// `host` and `port` override the `[server]` section when given.
pub async fn handle_serve(
    host: Option<String>,
    port: Option<u16>,
    config: &Config,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let pipeline = build_pipeline(config)?;
    log_startup_diagnostics(pipeline.generation().generator().as_ref()).await;

    server::serve(pipeline, addr, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    })
    .await?;

    Ok(())
}

/// Answer a single utterance
pub async fn handle_ask(text: String, config: &Config, format: OutputFormat) -> Result<()> {
    let pipeline = build_pipeline(config)?;

    let reply = server::answer(&pipeline, &text).await;

    match (reply, format) {
        (Ok(reply), OutputFormat::Text) => {
            println!("{}", reply);
            Ok(())
        }
        (Ok(reply), OutputFormat::Json) => {
            let output = json!({
                "status": "ok",
                "query": text,
                "reply": reply
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        (Err(e), OutputFormat::Text) => {
            println!("{}", e.user_hint());
            Err(e.into())
        }
        (Err(e), OutputFormat::Json) => {
            let output = json!({
                "status": "failed",
                "query": text,
                "reply": e.user_hint(),
                "error": e.to_string()
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Err(e.into())
        }
    }
}

/// Validate configuration and probe the external services
pub async fn handle_doctor(config: &Config, format: OutputFormat) -> Result<()> {
    let mut issues = Vec::new();
    let mut checks: Vec<(&str, String)> = Vec::new();

    // Config is already validated when loaded
    checks.push(("Configuration", "Valid".to_string()));
    checks.push(("Memory capacity", config.memory.capacity.to_string()));

    match llm::build_generator(&config.llm) {
        Ok(generator) => {
            checks.push((
                "Generation provider",
                format!("{} ({})", generator.name(), generator.model()),
            ));

            if generator.check_health().await {
                checks.push(("Generation service", "Reachable".to_string()));
            } else {
                checks.push(("Generation service", "Unreachable".to_string()));
                issues.push(format!(
                    "{} is not reachable. Start it or switch [llm] provider.",
                    generator.name()
                ));
            }
        }
        Err(e) => {
            checks.push(("Generation provider", "Invalid".to_string()));
            issues.push(format!("Cannot build generation provider: {}", e));
        }
    }

    if config.llm.provider == "huggingface" && config.llm.huggingface.api_token.is_none() {
        checks.push(("Hugging Face token", "Not configured".to_string()));
    }

    let search = GoogleSearch::from_config(&config.search);
    if search.is_configured() {
        checks.push(("Search credentials", "Configured".to_string()));

        match check_search(&search).await {
            Ok(0) => {
                checks.push(("Search request", "No results".to_string()));
                issues.push(format!(
                    "Search for {:?} returned nothing. Check the API key and engine id.",
                    SEARCH_CHECK_QUERY
                ));
            }
            Ok(n) => checks.push(("Search request", format!("OK ({} results)", n))),
            Err(e) => {
                checks.push(("Search request", "Failed".to_string()));
                issues.push(format!("{}: {}", e.user_hint(), e));
            }
        }
    } else {
        checks.push(("Search credentials", "Not configured".to_string()));
        issues.push(format!(
            "Search is not configured. Set {} and {} or the [search] section.",
            crate::config::ENV_SEARCH_API_KEY,
            crate::config::ENV_SEARCH_ENGINE_ID
        ));
    }
    checks.push(("Search provider", search.name().to_string()));

    match format {
        OutputFormat::Text => {
            println!("Sara System Diagnostics");
            println!("=======================");
            println!();

            println!("System Checks:");
            for (check, status) in &checks {
                println!("  {:<25} {}", format!("{}:", check), status);
            }

            println!();

            if issues.is_empty() {
                println!("✓ All checks passed!");
            } else {
                println!("⚠ Issues found:");
                println!();
                for (i, issue) in issues.iter().enumerate() {
                    println!("  {}. {}", i + 1, issue);
                }
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "checks": checks.iter().map(|(name, status)| {
                    json!({
                        "name": name,
                        "status": status
                    })
                }).collect::<Vec<_>>(),
                "issues": issues,
                "healthy": issues.is_empty()
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
