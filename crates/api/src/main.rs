use std::sync::Arc;

use anyhow::Context;

use userhub_api::config::ServerConfig;
use userhub_users::{InMemoryUserStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    userhub_observability::init();

    let config = ServerConfig::from_env()?;

    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::seeded());
    let app = userhub_api::app::build_app(users);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(port = config.port, "server starting");
    tracing::info!("health check available at http://localhost:{}/health", config.port);
    tracing::info!("API endpoints available at http://localhost:{}/api/users", config.port);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
