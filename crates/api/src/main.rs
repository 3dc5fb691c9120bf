use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todolist_api::config::ServerConfig;
use todolist_api::router::build_app_router;
use todolist_api::state::AppState;
use todolist_db::{Store, DATABASE_FILE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todolist_api=debug,tower_http=debug,sqlx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let store = Store::initialize(DATABASE_FILE)
        .await
        .with_context(|| format!("Failed to initialize database at {DATABASE_FILE}"))?;
    tracing::info!(path = DATABASE_FILE, "Database ready");

    let state = AppState {
        store: store.clone(),
    };

    let app = build_app_router(state, &config);

    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address {:?}", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.pool().close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down, draining in-flight requests");
}
