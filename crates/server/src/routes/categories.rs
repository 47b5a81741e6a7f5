use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use common::types::CategoryDto;
use serde::Deserialize;
use service::category_service;

use crate::{errors::JsonApiError, routes::AppState};

#[derive(Debug, Deserialize)]
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

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryDto>>, JsonApiError> {
    Ok(Json(category_service::list_categories(&state.db).await?))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(category_service::get_category(&state.db, id).await?))
}

pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(category_service::get_category_by_name(&state.db, &name).await?))
}

pub async fn search(
    State(state): State<AppState>,
    Query(q): Query<NameQuery>,
) -> Result<Json<Vec<CategoryDto>>, JsonApiError> {
    Ok(Json(category_service::search_categories(&state.db, &q.name).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), JsonApiError> {
    let created = category_service::create_category(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoryDto>,
) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(category_service::update_category(&state.db, id, &input).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    category_service::delete_category(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
