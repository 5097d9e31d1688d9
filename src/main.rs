use std::sync::Arc;

use portfolio::{
    build_router,
    database::{connect_with_retry, DocumentStore, MemoryStore, MongoStore},
    load_config, AppState, Config,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::info!("Loaded configuration:\n{}", config);

    let store = open_store(&config).await?;
    let state = AppState::new(store);
    let app = build_router(state, &config)?;

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects the configured document store.
///
/// Strict mode refuses to start without a reachable store. Tolerant mode
/// starts anyway and lets data routes answer 503 until the store is back.
async fn open_store(
    config: &Config,
) -> Result<Option<Arc<dyn DocumentStore>>, Box<dyn std::error::Error>> {
    let database = &config.database;

    let Some(uri) = database.uri.as_ref() else {
        if database.strict {
            tracing::error!("No database connection string configured (set MONGODB_URI)");
            return Err("database.uri is required in strict mode".into());
        }
        tracing::warn!("No database connection string configured; data routes will answer 503");
        return Ok(None);
    };

    if database.uses_memory_store() {
        tracing::warn!("Using the in-memory document store; data is lost on exit");
        return Ok(Some(Arc::new(MemoryStore::new())));
    }

    let store = match MongoStore::new(uri, database).await {
        Ok(store) => store,
        Err(e) if !database.strict => {
            tracing::error!(error = %e, "Invalid database configuration; data routes will answer 503");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = connect_with_retry(&store, database.retry_policy()).await {
        if database.strict {
            return Err(e.into());
        }
        tracing::warn!("Starting without a reachable database; requests will be retried against it");
    }

    Ok(Some(Arc::new(store)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
