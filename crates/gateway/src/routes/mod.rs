use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{http, observability, types::Health};

use crate::{
    client::{CategoryClient, DataServiceClient, InventoryClient, ProductClient},
    openapi::ApiDoc,
    services::{CategoryService, InventoryService, ProductService},
};

pub mod categories;
pub mod inventory;
pub mod products;

pub const SERVICE_NAME: &str = "business-service";

#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub products: ProductService,
    pub inventory: InventoryService,
}

impl AppState {
    pub fn new(client: DataServiceClient, low_stock_threshold: i64) -> Self {
        Self {
            categories: CategoryService::new(CategoryClient::new(client.clone())),
            products: ProductService::new(
                ProductClient::new(client.clone()),
                InventoryClient::new(client.clone()),
                low_stock_threshold,
            ),
            inventory: InventoryService::new(InventoryClient::new(client)),
        }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    observability::health().await
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the business-service router: `/api/*` resources, health, metrics and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .nest("/api/categories", categories::router())
        .nest("/api/products", products::router())
        .nest("/api/inventory", inventory::router())
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
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
