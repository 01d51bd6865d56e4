use anyhow::Context;

use souk_infra::{CatalogConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    souk_observability::init();

    let server = ServerConfig::from_env().context("invalid server configuration")?;
    let catalog = CatalogConfig::from_env().context("invalid catalog configuration")?;

    let services = souk_api::app::services::build_services(&server, catalog).await?;
    let app = souk_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
