use anyhow::Context;

use prodgate_api::config::{AuthConfig, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prodgate_observability::init();

    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    if config.auth == AuthConfig::Disabled {
        tracing::warn!("AUTH_ENFORCED is off; all requests run unrestricted");
    }

    let app = prodgate_api::app::build_app(&config).context("failed to build product backend")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        backend = config.backend.kind(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("could not install ctrl-c handler; shutdown only on process kill");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
