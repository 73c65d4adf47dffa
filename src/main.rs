mod api_doc;
mod config;
mod error;
mod forwarder;
mod handlers;
mod models;
mod route_table;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::Config;
use forwarder::Forwarder;
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("space-relay starting");
    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env()?;
    config.log_startup();

    let state = AppState::new(&config, Forwarder::new()?);
    for route in state.routes.iter() {
        tracing::debug!("  {} -> {:?} {} ({:?})",
            route.inbound_path, route.upstream, route.upstream_template, route.mode);
    }
    let app = routes::router(state);

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
