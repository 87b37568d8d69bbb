use nhl_scores::{router, AppState, HttpNhlApi, Settings};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    let api = HttpNhlApi::new(settings.api_base_url.clone(), settings.api_timeout)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!(upstream = %settings.api_base_url, "using NHL API");

    let state = AppState::new(Arc::new(api), settings);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
