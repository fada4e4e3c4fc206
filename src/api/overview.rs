use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::overview_service;

/// GET /api/:store_id/overview - revenue, sales and stock figures
pub async fn get_overview(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let overview = overview_service::store_overview(state.db(), &store_id).await?;
    Ok(Json(overview))
}
