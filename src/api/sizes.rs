use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::validation::SizeInput;
use crate::domain::{DomainError, Validate};
use crate::infrastructure::AppState;

pub async fn list_sizes(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let sizes = state.size_repo.find_by_store(&store_id).await?;
    Ok(Json(sizes))
}

pub async fn get_size(
    State(state): State<AppState>,
    Path((store_id, size_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    match state.size_repo.find_by_id(&store_id, &size_id).await? {
        Some(size) => Ok(Json(size)),
        None => Err(DomainError::NotFound),
    }
}

pub async fn create_size(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Json(payload): Json<SizeInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let size = state.size_repo.create(&store_id, payload).await?;
    Ok((StatusCode::CREATED, Json(size)))
}

pub async fn update_size(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, size_id)): Path<(String, String)>,
    Json(payload): Json<SizeInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let size = state.size_repo.update(&store_id, &size_id, payload).await?;
    Ok(Json(size))
}

pub async fn delete_size(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, size_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let size = state.size_repo.delete(&store_id, &size_id).await?;
    Ok(Json(size))
}
