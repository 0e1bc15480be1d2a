use tokio::signal;
use tracing::{error, info};

use proofpass_api::services::seed_data;
use proofpass_api::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proofpass_api=debug,tower_http=debug".into())
        )
        .init();

    info!("Starting ProofPass API server...");

    let config = Config::from_env()?;
    info!("Configuration loaded (data dir: {})", config.data_dir.display());

    let state = AppState::new(config);
    state.store.ensure_data_dir().await?;

    // Fail fast on a corrupt events file instead of serving an empty catalogue
    let existing = state.store.count().await?;
    info!("Event store ready at {} ({} events)", state.store.path().display(), existing);

    if state.config.seed_sample_events {
        let created = seed_data::seed_sample_events(&state.store, &state.config, false).await?;
        info!("Seeded {} sample events", created);
    }

    let port = state.config.port;
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    info!("Shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
