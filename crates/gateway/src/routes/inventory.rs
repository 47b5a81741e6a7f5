use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use common::types::{ErrorBody, InventoryDto};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{errors::GatewayError, routes::AppState};

#[derive(Debug, Deserialize, IntoParams)]
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

#[utoipa::path(
    get, path = "/api/inventory", tag = "inventory",
    responses((status = 200, description = "All inventory rows", body = [InventoryDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.list().await?))
}

#[utoipa::path(
    get, path = "/api/inventory/{id}", tag = "inventory",
    params(("id" = i32, Path, description = "Inventory id")),
    responses(
        (status = 200, description = "OK", body = InventoryDto),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<InventoryDto>, GatewayError> {
    Ok(Json(state.inventory.get(id).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/product/{product_id}", tag = "inventory",
    params(("product_id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Stock of the product", body = [InventoryDto]),
        (status = 404, description = "Product not found", body = ErrorBody)
    )
)]
pub async fn by_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.by_product(product_id).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/product/name/{product_name}", tag = "inventory",
    params(("product_name" = String, Path, description = "Substring of the product name")),
    responses((status = 200, description = "Matching rows", body = [InventoryDto]))
)]
pub async fn by_product_name(
    State(state): State<AppState>,
    Path(product_name): Path<String>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.by_product_name(&product_name).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/location/{location}", tag = "inventory",
    params(("location" = String, Path, description = "Location, case-insensitive")),
    responses((status = 200, description = "Rows at the location", body = [InventoryDto]))
)]
pub async fn by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.by_location(&location).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/quantity/less/{quantity}", tag = "inventory",
    params(("quantity" = i32, Path, description = "Exclusive upper bound")),
    responses((status = 200, description = "Rows below the quantity", body = [InventoryDto]))
)]
pub async fn quantity_less(
    State(state): State<AppState>,
    Path(quantity): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.quantity_less_than(quantity).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/quantity/greater/{quantity}", tag = "inventory",
    params(("quantity" = i32, Path, description = "Exclusive lower bound")),
    responses((status = 200, description = "Rows above the quantity", body = [InventoryDto]))
)]
pub async fn quantity_greater(
    State(state): State<AppState>,
    Path(quantity): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.quantity_greater_than(quantity).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/quantity/range", tag = "inventory",
    params(QuantityRange),
    responses(
        (status = 200, description = "Rows within the range", body = [InventoryDto]),
        (status = 400, description = "Invalid range", body = ErrorBody)
    )
)]
pub async fn quantity_range(
    State(state): State<AppState>,
    Query(q): Query<QuantityRange>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.quantity_range(q.min_quantity, q.max_quantity).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/category/{category_id}", tag = "inventory",
    params(("category_id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Rows whose product is in the category", body = [InventoryDto]))
)]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.by_category(category_id).await?))
}

#[utoipa::path(
    get, path = "/api/inventory/out-of-stock", tag = "inventory",
    responses((status = 200, description = "Rows with zero quantity", body = [InventoryDto]))
)]
pub async fn out_of_stock(State(state): State<AppState>) -> Result<Json<Vec<InventoryDto>>, GatewayError> {
    Ok(Json(state.inventory.out_of_stock().await?))
}

#[utoipa::path(
    post, path = "/api/inventory", tag = "inventory",
    request_body = InventoryDto,
    responses(
        (status = 201, description = "Created", body = InventoryDto),
        (status = 400, description = "Validation Error", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<InventoryDto>,
) -> Result<(StatusCode, Json<InventoryDto>), GatewayError> {
    let created = state.inventory.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/inventory/{id}", tag = "inventory",
    params(("id" = i32, Path, description = "Inventory id")),
    request_body = InventoryDto,
    responses(
        (status = 200, description = "Updated", body = InventoryDto),
        (status = 400, description = "Validation Error", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<InventoryDto>,
) -> Result<Json<InventoryDto>, GatewayError> {
    Ok(Json(state.inventory.update(id, &input).await?))
}

#[utoipa::path(
    patch, path = "/api/inventory/{id}/quantity/{quantity}", tag = "inventory",
    params(
        ("id" = i32, Path, description = "Inventory id"),
        ("quantity" = i32, Path, description = "New quantity, zero or more")
    ),
    responses(
        (status = 200, description = "Quantity set", body = InventoryDto),
        (status = 400, description = "Negative quantity", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn set_quantity(
    State(state): State<AppState>,
    Path((id, quantity)): Path<(i32, i32)>,
) -> Result<Json<InventoryDto>, GatewayError> {
    Ok(Json(state.inventory.set_quantity(id, quantity).await?))
}

#[utoipa::path(
    delete, path = "/api/inventory/{id}", tag = "inventory",
    params(("id" = i32, Path, description = "Inventory id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, GatewayError> {
    state.inventory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
