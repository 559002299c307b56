//! pinguinos - Penguin sighting classifier web demo
//!
//! Ties a hosted vision-language model, a pre-trained ONNX species
//! classifier, and an append-only community store behind a small axum
//! service. Both the classifier artifact and the store are optional at
//! startup: missing pieces degrade the service instead of killing it.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pinguinos::classifier::SpeciesClassifier;
use pinguinos::config::{Config, DEFAULT_CONFIG_PATH};
use pinguinos::vision::{VisionClient, DEFAULT_BASE_URL};
use pinguinos::{build_router, db, AppState};

/// Command-line arguments for pinguinos
#[derive(Parser, Debug)]
#[command(name = "pinguinos")]
#[command(about = "Penguin sighting classifier web demo")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PINGUINOS_PORT")]
    port: Option<u16>,

    /// Path to the TOML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "PINGUINOS_CONFIG")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinguinos=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification immediately after tracing init
    info!(
        "Starting pinguinos v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = Config::resolve(&args.config, args.port)
        .map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;

    let vision = VisionClient::new(
        config.cohere_api_key.clone(),
        DEFAULT_BASE_URL.to_string(),
        config.upstream_timeout,
    )
    .map_err(|e| anyhow::anyhow!("failed to build vision client: {e}"))?;
    info!(
        "Vision client ready (timeout {}s)",
        config.upstream_timeout.as_secs()
    );

    // Classifier artifact: load failure disables classification only
    let classifier = match SpeciesClassifier::load(&config.model_path) {
        Ok(classifier) => {
            info!("Classifier artifact loaded: {}", config.model_path.display());
            Some(classifier)
        }
        Err(e) => {
            warn!(
                "Classifier artifact unavailable ({}): {e} - classification disabled",
                config.model_path.display()
            );
            None
        }
    };

    // Result store: missing URL or failed connect degrades to no-store mode
    let pool = match &config.database_url {
        Some(url) => match db::init_pool(url).await {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("Result store unavailable ({url}): {e} - persistence disabled");
                None
            }
        },
        None => {
            warn!("No database URL configured - persistence disabled");
            None
        }
    };

    let state = AppState::new(vision, classifier, pool, config.rng_seed);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("pinguinos listening on http://{addr}");
    info!("Health check: http://{addr}/health");

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
