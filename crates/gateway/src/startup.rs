use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{
    client::DataServiceClient,
    routes::{self, AppState},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Serve the business service until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let client = DataServiceClient::new(&cfg.data_service)?;
    info!(data_service = %client.base_url(), "data service client ready");

    let state = AppState::new(client, cfg.inventory.low_stock_threshold);
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "business service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("business service stopped accepting connections");
    Ok(())
}
