use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use common::types::{ErrorBody, ProductDetails, ProductDto};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{errors::GatewayError, routes::AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_price: String,
    pub max_price: String,
}

fn parse_price(field: &str, raw: &str) -> Result<Decimal, GatewayError> {
    Decimal::from_str(raw.trim()).map_err(|_| GatewayError::bad_request(format!("Invalid {field}: {raw}")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/search", get(search))
        .route("/category/:category_id", get(by_category))
        .route("/category/name/:category_name", get(by_category_name))
        .route("/price/max/:max_price", get(by_max_price))
        .route("/price/min/:min_price", get(by_min_price))
        .route("/price/range", get(by_price_range))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/details", get(details))
        .route("/:id/category/:category_id", put(assign_category))
        .route("/:id/category", delete(remove_category))
}

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    responses((status = 200, description = "All products", body = [ProductDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    Ok(Json(state.products.list().await?))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK", body = ProductDto),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ProductDto>, GatewayError> {
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    get, path = "/api/products/{id}/details", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with stock summary", body = ProductDetails),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetails>, GatewayError> {
    Ok(Json(state.products.details(id).await?))
}

#[utoipa::path(
    get, path = "/api/products/search", tag = "products",
    params(NameQuery),
    responses(
        (status = 200, description = "Matching products", body = [ProductDto]),
        (status = 400, description = "Empty search term", body = ErrorBody)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<NameQuery>,
) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    Ok(Json(state.products.search(&q.name).await?))
}

#[utoipa::path(
    get, path = "/api/products/category/{category_id}", tag = "products",
    params(("category_id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Products in the category", body = [ProductDto]),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    Ok(Json(state.products.by_category(category_id).await?))
}

#[utoipa::path(
    get, path = "/api/products/category/name/{category_name}", tag = "products",
    params(("category_name" = String, Path, description = "Category name, case-insensitive")),
    responses((status = 200, description = "Products in the category", body = [ProductDto]))
)]
pub async fn by_category_name(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    Ok(Json(state.products.by_category_name(&category_name).await?))
}

#[utoipa::path(
    get, path = "/api/products/price/max/{max_price}", tag = "products",
    params(("max_price" = String, Path, description = "Inclusive upper bound")),
    responses(
        (status = 200, description = "Products at or below the price", body = [ProductDto]),
        (status = 400, description = "Unparseable price", body = ErrorBody)
    )
)]
pub async fn by_max_price(
    State(state): State<AppState>,
    Path(max_price): Path<String>,
) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    let max = parse_price("maxPrice", &max_price)?;
    Ok(Json(state.products.by_max_price(max).await?))
}

#[utoipa::path(
    get, path = "/api/products/price/min/{min_price}", tag = "products",
    params(("min_price" = String, Path, description = "Inclusive lower bound")),
    responses(
        (status = 200, description = "Products at or above the price", body = [ProductDto]),
        (status = 400, description = "Unparseable price", body = ErrorBody)
    )
)]
pub async fn by_min_price(
    State(state): State<AppState>,
    Path(min_price): Path<String>,
) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    let min = parse_price("minPrice", &min_price)?;
    Ok(Json(state.products.by_min_price(min).await?))
}

#[utoipa::path(
    get, path = "/api/products/price/range", tag = "products",
    params(PriceRange),
    responses(
        (status = 200, description = "Products within the range", body = [ProductDto]),
        (status = 400, description = "Invalid range", body = ErrorBody)
    )
)]
pub async fn by_price_range(
    State(state): State<AppState>,
    Query(q): Query<PriceRange>,
) -> Result<Json<Vec<ProductDto>>, GatewayError> {
    let min = parse_price("minPrice", &q.min_price)?;
    let max = parse_price("maxPrice", &q.max_price)?;
    Ok(Json(state.products.by_price_range(min, max).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = ProductDto,
    responses(
        (status = 201, description = "Created", body = ProductDto),
        (status = 400, description = "Validation Error", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductDto>,
) -> Result<(StatusCode, Json<ProductDto>), GatewayError> {
    let created = state.products.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductDto,
    responses(
        (status = 200, description = "Updated", body = ProductDto),
        (status = 400, description = "Validation Error", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductDto>,
) -> Result<Json<ProductDto>, GatewayError> {
    Ok(Json(state.products.update(id, &input).await?))
}

#[utoipa::path(
    put, path = "/api/products/{id}/category/{category_id}", tag = "products",
    params(
        ("id" = i32, Path, description = "Product id"),
        ("category_id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category assigned", body = ProductDto),
        (status = 404, description = "Product or category not found", body = ErrorBody)
    )
)]
pub async fn assign_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(i32, i32)>,
) -> Result<Json<ProductDto>, GatewayError> {
    Ok(Json(state.products.assign_category(id, category_id).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}/category", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Category removed", body = ProductDto),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn remove_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDto>, GatewayError> {
    Ok(Json(state.products.remove_category(id).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted along with its inventory"),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, GatewayError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
