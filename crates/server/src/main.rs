use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use page_zen_core::Extractor;
use page_zen_server::config::Config;
use page_zen_server::{AppState, logging, router};
use tokio::net::TcpListener;
use tokio::sync::Notify;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init_tracing(&config);
    config.validate()?;

    let extractor = Extractor::with_config(config.extractor_config()).context("Failed to initialize extractor")?;
    let app = router(AppState::new(extractor), config.request_timeout());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, environment = %config.environment, "Starting server");

    let stop = Arc::new(Notify::new());
    let stop_signal = stop.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { stop_signal.notified().await })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result.context("Server task failed")?.context("Server error")?;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutting down server...");
    stop.notify_one();

    match tokio::time::timeout(config.shutdown_grace(), server).await {
        Ok(joined) => {
            joined.context("Server task failed")?.context("Server error")?;
            tracing::info!("Server exited");
        }
        Err(_) => {
            tracing::warn!(grace_seconds = config.shutdown_grace, "Server forced to shutdown");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
