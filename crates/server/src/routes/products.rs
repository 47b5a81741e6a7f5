use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use common::{http::ApiError, types::ProductDto};
use rust_decimal::Decimal;
use serde::Deserialize;
use service::product_service;

use crate::{errors::JsonApiError, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_price: String,
    pub max_price: String,
}

fn parse_price(field: &str, raw: &str) -> Result<Decimal, JsonApiError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| ApiError::bad_request(format!("Invalid {field}: {raw}")).into())
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
        .route("/:id/category/:category_id", put(assign_category))
        .route("/:id/category", delete(remove_category))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    Ok(Json(product_service::list_products(&state.db).await?))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(product_service::get_product(&state.db, id).await?))
}

pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<NameQuery>,
) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    Ok(Json(product_service::search_products(&state.db, &q.name).await?))
}

pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    Ok(Json(product_service::products_by_category(&state.db, category_id).await?))
}

pub async fn by_category_name(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    Ok(Json(product_service::products_by_category_name(&state.db, &category_name).await?))
}

pub async fn by_max_price(
    State(state): State<AppState>,
    Path(max_price): Path<String>,
) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    let max = parse_price("maxPrice", &max_price)?;
    Ok(Json(product_service::products_by_max_price(&state.db, max).await?))
}

pub async fn by_min_price(
    State(state): State<AppState>,
    Path(min_price): Path<String>,
) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    let min = parse_price("minPrice", &min_price)?;
    Ok(Json(product_service::products_by_min_price(&state.db, min).await?))
}

pub async fn by_price_range(
    State(state): State<AppState>,
    Query(q): Query<PriceRange>,
) -> Result<Json<Vec<ProductDto>>, JsonApiError> {
    let min = parse_price("minPrice", &q.min_price)?;
    let max = parse_price("maxPrice", &q.max_price)?;
    Ok(Json(product_service::products_by_price_range(&state.db, min, max).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductDto>,
) -> Result<(StatusCode, Json<ProductDto>), JsonApiError> {
    let created = product_service::create_product(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductDto>,
) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(product_service::update_product(&state.db, id, &input).await?))
}

pub async fn assign_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(i32, i32)>,
) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(product_service::assign_category(&state.db, id, category_id).await?))
}

pub async fn remove_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDto>, JsonApiError> {
    Ok(Json(product_service::remove_category(&state.db, id).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    product_service::delete_product(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
