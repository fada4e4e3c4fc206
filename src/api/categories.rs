use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::validation::CategoryInput;
use crate::domain::{DomainError, Validate};
use crate::infrastructure::AppState;

/// GET /api/:store_id/categories - each category carries its billboard
pub async fn list_categories(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let categories = state.category_repo.find_by_store(&store_id).await?;
    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    let category = state
        .category_repo
        .find_by_id(&store_id, &category_id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(category))
}

pub async fn create_category(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Json(payload): Json<CategoryInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let category = state.category_repo.create(&store_id, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, category_id)): Path<(String, String)>,
    Json(payload): Json<CategoryInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let category = state
        .category_repo
        .update(&store_id, &category_id, payload)
        .await?;
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, category_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let category = state.category_repo.delete(&store_id, &category_id).await?;
    Ok(Json(category))
}
