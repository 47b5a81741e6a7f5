use axum::{middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::{http, observability};

pub mod categories;
pub mod inventory;
pub mod products;

pub const SERVICE_NAME: &str = "data-service";

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Build the data-service router: `/data/*` resources plus health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let data = Router::new()
        .nest("/data/categories", categories::router())
        .nest("/data/products", products::router())
        .nest("/data/inventory", inventory::router())
        .with_state(state);

    Router::new()
        .route("/health", get(observability::health))
        .route("/metrics", get(observability::metrics))
        .merge(data)
        .fallback(http::not_found)
        .layer(middleware::from_fn(http::render_errors))
        .layer(middleware::from_fn_with_state(SERVICE_NAME, observability::track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
