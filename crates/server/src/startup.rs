use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::HttpUpstream;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Build the application router from validated configuration.
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let upstream = HttpUpstream::new(&cfg.upstream.base_url)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = ServerState::from_upstream(Arc::new(upstream), cfg.session.clone());
    Ok(routes::build_router(state, build_cors()))
}

/// Serve until `shutdown` resolves; in-flight requests are allowed to finish.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg)?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, upstream = %cfg.upstream.base_url, "starting portal");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Bind { addr: addr.to_string(), reason: e.to_string() })?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("portal stopped");
    Ok(())
}
