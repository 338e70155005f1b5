//! repotagger server binary.

use std::net::SocketAddr;

use clap::Parser;
use repotagger::{GitHubClient, connect_and_migrate};
use repotagger_server::{AppState, Args, Config, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("repotagger=info,repotagger_server=info,tower_http=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = Config::load();
    config.apply_args(&args);

    let database_url = config.database_url();
    let db = connect_and_migrate(&database_url).await?;
    tracing::info!(database_url, "Database ready");

    let github = GitHubClient::new(&config.api_url, config.request_timeout())?
        .with_page_concurrency(config.page_concurrency);

    let app = create_router(AppState::new(db, github));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, api_url = %config.api_url, "repotagger listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C; in-flight requests are allowed to finish.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::warn!("Shutdown requested, finishing in-flight requests");
}
