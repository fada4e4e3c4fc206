use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::validation::StoreInput;
use crate::domain::{DomainError, Validate};
use crate::infrastructure::AppState;

/// GET /api/stores - stores owned by the caller
pub async fn list_stores(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse, DomainError> {
    let stores = state.store_repo.find_by_user(&claims.sub).await?;
    Ok(Json(stores))
}

pub async fn create_store(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<StoreInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    let store = state.store_repo.create(&claims.sub, payload).await?;
    tracing::info!("Store {} created by {}", store.id, claims.username);
    Ok((StatusCode::CREATED, Json(store)))
}

pub async fn get_store(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let store = require_store_owner(&state, &claims, &store_id).await?;
    Ok(Json(store))
}

pub async fn update_store(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Json(payload): Json<StoreInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;
    let store = state.store_repo.update(&store_id, payload).await?;
    Ok(Json(store))
}

pub async fn delete_store(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;
    state.store_repo.delete(&store_id).await?;
    tracing::info!("Store {} deleted", store_id);
    Ok(Json(json!({ "message": "Store deleted" })))
}
