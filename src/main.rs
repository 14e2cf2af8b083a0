use std::sync::Arc;

use helius_cors_proxy::{ProxyConfig, ReqwestTransport, server};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProxyConfig::from_env()?;
    tracing::info!(policy = ?config.policy, "CORS policy loaded");
    if config.allows_all_origins() {
        tracing::warn!("CORS_ALLOW_ORIGIN is empty; every origin is accepted without Access-Control-Allow-Origin");
    }

    let proxy = Arc::new(config.build_proxy(ReqwestTransport::new()?)?);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("helius-cors-proxy listening on {}", config.bind_addr);

    server::serve(listener, proxy, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
