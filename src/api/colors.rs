use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::validation::ColorInput;
use crate::domain::{DomainError, Validate};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/{store_id}/colors",
    params(("store_id" = String, Path, description = "Store id")),
    responses((status = 200, description = "Colors of the store, newest first"))
)]
pub async fn list_colors(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let colors = state.color_repo.find_by_store(&store_id).await?;
    Ok(Json(colors))
}

pub async fn get_color(
    State(state): State<AppState>,
    Path((store_id, color_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    let color = state
        .color_repo
        .find_by_id(&store_id, &color_id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(color))
}

#[utoipa::path(
    post,
    path = "/api/{store_id}/colors",
    params(("store_id" = String, Path, description = "Store id")),
    responses(
        (status = 201, description = "Color created"),
        (status = 400, description = "Name missing or value not a hexcode"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Store owned by another user")
    )
)]
pub async fn create_color(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Json(payload): Json<ColorInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let color = state.color_repo.create(&store_id, payload).await?;
    tracing::info!("Color {} created in store {}", color.id, store_id);
    Ok((StatusCode::CREATED, Json(color)))
}

#[utoipa::path(
    patch,
    path = "/api/{store_id}/colors/{color_id}",
    params(
        ("store_id" = String, Path, description = "Store id"),
        ("color_id" = String, Path, description = "Color id")
    ),
    responses(
        (status = 200, description = "Updated color"),
        (status = 404, description = "No such color in this store")
    )
)]
pub async fn update_color(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, color_id)): Path<(String, String)>,
    Json(payload): Json<ColorInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let color = state.color_repo.update(&store_id, &color_id, payload).await?;
    Ok(Json(color))
}

#[utoipa::path(
    delete,
    path = "/api/{store_id}/colors/{color_id}",
    params(
        ("store_id" = String, Path, description = "Store id"),
        ("color_id" = String, Path, description = "Color id")
    ),
    responses(
        (status = 200, description = "Deleted color"),
        (status = 409, description = "Products still use this color")
    )
)]
pub async fn delete_color(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, color_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let color = state.color_repo.delete(&store_id, &color_id).await?;
    tracing::info!("Color {} deleted from store {}", color.id, store_id);
    Ok(Json(color))
}
