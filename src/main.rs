//!
//! Congestion tax REST service for the Gothenburg toll zone.
//! Reads configuration from TOML file (~/.config/congestion-tax/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use congestion_tax::{create_api_router, default_config_path, AppConfig, TaxCalculator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CONGESTION_TAX_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Congestion Tax Service...");

    let policy = app_cfg.tax.policy();
    info!(
        "Tax policy: daily maximum {}, single-charge window {} min",
        policy.daily_maximum, policy.single_charge_window_minutes
    );

    let calculator = Arc::new(TaxCalculator::with_policy(policy));
    let app = create_api_router(calculator);

    let address = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("REST API listening on http://{}", address);
    info!("Swagger UI available at http://{}/docs", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Congestion Tax Service shutdown complete");
    Ok(())
}

/// Resolve on ctrl-c or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install ctrl-c handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
