//! wordsvc-pr - Pronunciation Resolver microservice
//!
//! Serves `GET /words/{word}`: looks the word up on Wiktionary and returns
//! its IPA transcription and a direct audio URL when available.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wordsvc_common::config::{ConfigOverrides, ServiceConfig, TomlConfig};
use wordsvc_pr::services::{PronunciationResolver, WiktionaryClient};
use wordsvc_pr::{build_router, AppState};

/// Command-line arguments for wordsvc-pr
#[derive(Parser, Debug)]
#[command(name = "wordsvc-pr")]
#[command(about = "Pronunciation Resolver microservice for WordSvc")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "WORDSVC_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "WORDSVC_BIND")]
    bind: Option<String>,

    /// MediaWiki API endpoint
    #[arg(long, env = "WORDSVC_WIKTIONARY_URL")]
    wiktionary_url: Option<String>,

    /// TOML config file (defaults to <config_dir>/wordsvc/config.toml)
    #[arg(short, long, env = "WORDSVC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WORDSVC_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            bind_address: self.bind.clone(),
            wiktionary_api_url: self.wiktionary_url.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration file")?;
    let config = ServiceConfig::resolve(&args.overrides(), &toml_config)
        .context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "wordsvc_pr={level},wordsvc_common={level},tower_http={level}",
                level = config.log_level
            )
            .into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting WordSvc Pronunciation Resolver (wordsvc-pr) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Wiktionary API: {}", config.wiktionary_api_url);
    info!("Upstream timeout: {:?}", config.request_timeout);
    if config.cors_allowed_origins.is_empty() {
        info!("CORS disabled (no allowed origins configured)");
    } else {
        info!("CORS origins: {}", config.cors_allowed_origins.join(", "));
    }

    let client = WiktionaryClient::new(
        config.wiktionary_api_url.clone(),
        &config.user_agent,
        config.request_timeout,
    )
    .context("Failed to create Wiktionary client")?;

    let state = AppState::new(PronunciationResolver::new(client));
    let app = build_router(state, &config.cors_allowed_origins);

    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("wordsvc-pr listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
