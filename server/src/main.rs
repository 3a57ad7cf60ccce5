use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prayer_tracker::backend::{config::Config, create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let port = config.port;

    let app_state = initialize_backend(config).await?;
    let router = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("starting prayer tracker REST API server at {addr}");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, router).await?;

    Ok(())
}
