mod config;
mod dispatcher;
mod error;
mod handlers;
mod llm;
mod prompt;
mod tools;

use anyhow::{Context, Result};
use config::Config;
use handlers::AppState;
use llm::GroqClient;
use std::sync::Arc;

/// Config file used when `PANKH_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Load configuration
    let config_path =
        std::env::var("PANKH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::from_file(&config_path)?;

    // Initialize logging; RUST_LOG wins over the configured level
    init_logging(&config.logging.level);
    log::info!("Starting PankhAI agent...");
    log::info!("Configuration loaded from {}", config_path);

    let api_key = Config::api_key()?;
    let llm = GroqClient::new(&config.ai_model, api_key)?;
    log::info!(
        "LLM provider: {} ({}, temperature {}, max {} tokens)",
        config.ai_model.provider,
        config.ai_model.model,
        config.ai_model.temperature,
        config.ai_model.max_tokens
    );

    let state = AppState {
        llm: Arc::new(llm),
        ai_model: Arc::new(config.ai_model.clone()),
    };
    let app = handlers::router(state).layer(handlers::cors_layer(&config.server)?);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    println!("🌸 PankhAI agent is running!");
    println!("   Listening on http://{}", address);
    println!("   Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("PankhAI agent stopped");
    Ok(())
}

fn init_logging(level: &str) {
    if std::env::var("RUST_LOG").is_ok() {
        pretty_env_logger::init();
    } else {
        pretty_env_logger::formatted_builder()
            .parse_filters(level)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
    }
    log::info!("Shutdown signal received");
}
