use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::validation::BillboardInput;
use crate::domain::{DomainError, Validate};
use crate::infrastructure::AppState;

pub async fn list_billboards(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let billboards = state.billboard_repo.find_by_store(&store_id).await?;
    Ok(Json(billboards))
}

pub async fn get_billboard(
    State(state): State<AppState>,
    Path((store_id, billboard_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    let billboard = state
        .billboard_repo
        .find_by_id(&store_id, &billboard_id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(billboard))
}

pub async fn create_billboard(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Json(payload): Json<BillboardInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let billboard = state.billboard_repo.create(&store_id, payload).await?;
    tracing::info!("Billboard {} created in store {}", billboard.id, store_id);
    Ok((StatusCode::CREATED, Json(billboard)))
}

pub async fn update_billboard(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, billboard_id)): Path<(String, String)>,
    Json(payload): Json<BillboardInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let billboard = state
        .billboard_repo
        .update(&store_id, &billboard_id, payload)
        .await?;
    Ok(Json(billboard))
}

/// DELETE refuses with 409 while a category still shows the billboard
pub async fn delete_billboard(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, billboard_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let billboard = state.billboard_repo.delete(&store_id, &billboard_id).await?;
    Ok(Json(billboard))
}
