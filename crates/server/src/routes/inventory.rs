use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use common::types::InventoryDto;
use serde::Deserialize;
use service::inventory_service;

use crate::{errors::JsonApiError, routes::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityRange {
    pub min_quantity: i32,
    pub max_quantity: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/out-of-stock", get(out_of_stock))
        .route("/product/:product_id", get(by_product))
        .route("/product/name/:product_name", get(by_product_name))
        .route("/location/:location", get(by_location))
        .route("/quantity/less/:quantity", get(quantity_less))
        .route("/quantity/greater/:quantity", get(quantity_greater))
        .route("/quantity/range", get(quantity_range))
        .route("/category/:category_id", get(by_category))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/quantity/:quantity", patch(set_quantity))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::list_inventory(&state.db).await?))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<InventoryDto>, JsonApiError> {
    Ok(Json(inventory_service::get_inventory(&state.db, id).await?))
}

pub async fn by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::inventory_by_product(&state.db, product_id).await?))
}

pub async fn by_product_name(
    State(state): State<AppState>,
    Path(product_name): Path<String>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::inventory_by_product_name(&state.db, &product_name).await?))
}

pub async fn by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::inventory_by_location(&state.db, &location).await?))
}

pub async fn quantity_less(
    State(state): State<AppState>,
    Path(quantity): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::inventory_quantity_less_than(&state.db, quantity).await?))
}

pub async fn quantity_greater(
    State(state): State<AppState>,
    Path(quantity): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::inventory_quantity_greater_than(&state.db, quantity).await?))
}

pub async fn quantity_range(
    State(state): State<AppState>,
    Query(q): Query<QuantityRange>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(
        inventory_service::inventory_quantity_range(&state.db, q.min_quantity, q.max_quantity).await?,
    ))
}

pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::inventory_by_category(&state.db, category_id).await?))
}

pub async fn out_of_stock(State(state): State<AppState>) -> Result<Json<Vec<InventoryDto>>, JsonApiError> {
    Ok(Json(inventory_service::out_of_stock(&state.db).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<InventoryDto>,
) -> Result<(StatusCode, Json<InventoryDto>), JsonApiError> {
    let created = inventory_service::create_inventory(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<InventoryDto>,
) -> Result<Json<InventoryDto>, JsonApiError> {
    Ok(Json(inventory_service::update_inventory(&state.db, id, &input).await?))
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path((id, quantity)): Path<(i32, i32)>,
) -> Result<Json<InventoryDto>, JsonApiError> {
    Ok(Json(inventory_service::set_quantity(&state.db, id, quantity).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    inventory_service::delete_inventory(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
