use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use common::types::{CategoryDto, ErrorBody};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{errors::GatewayError, routes::AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct NameQuery {
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/search", get(search))
        .route("/name/:name", get(get_by_name))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[utoipa::path(
    get, path = "/api/categories", tag = "categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryDto]),
        (status = 503, description = "Data service unavailable", body = ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryDto>>, GatewayError> {
    Ok(Json(state.categories.list().await?))
}

#[utoipa::path(
    get, path = "/api/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "OK", body = CategoryDto),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CategoryDto>, GatewayError> {
    Ok(Json(state.categories.get(id).await?))
}

#[utoipa::path(
    get, path = "/api/categories/name/{name}", tag = "categories",
    params(("name" = String, Path, description = "Category name, case-insensitive")),
    responses(
        (status = 200, description = "OK", body = CategoryDto),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CategoryDto>, GatewayError> {
    Ok(Json(state.categories.get_by_name(&name).await?))
}

#[utoipa::path(
    get, path = "/api/categories/search", tag = "categories",
    params(NameQuery),
    responses(
        (status = 200, description = "Matching categories", body = [CategoryDto]),
        (status = 400, description = "Empty search term", body = ErrorBody)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<NameQuery>,
) -> Result<Json<Vec<CategoryDto>>, GatewayError> {
    Ok(Json(state.categories.search(&q.name).await?))
}

#[utoipa::path(
    post, path = "/api/categories", tag = "categories",
    request_body = CategoryDto,
    responses(
        (status = 201, description = "Created", body = CategoryDto),
        (status = 400, description = "Validation Error", body = ErrorBody),
        (status = 409, description = "Duplicate name", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), GatewayError> {
    let created = state.categories.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Updated", body = CategoryDto),
        (status = 400, description = "Validation Error", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 409, description = "Duplicate name", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoryDto>,
) -> Result<Json<CategoryDto>, GatewayError> {
    Ok(Json(state.categories.update(id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = ErrorBody)
    )
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, GatewayError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
