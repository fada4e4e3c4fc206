use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::modules::dashboard::columns::{TableRow, render_csv};
use crate::services::view_service;

fn respond<R: TableRow>(table: &str, rows: Vec<R>, as_csv: bool) -> Result<Response, DomainError> {
    if !as_csv {
        return Ok(Json(rows).into_response());
    }

    let body = render_csv(&rows)?;
    let filename = format!(
        "{}_{}.csv",
        table,
        chrono::Utc::now().format("%Y-%m-%d")
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok((StatusCode::OK, headers, body).into_response())
}

/// GET /api/:store_id/views/:table - dashboard table rows, `.csv` suffix for export
pub async fn get_view(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, table)): Path<(String, String)>,
) -> Result<Response, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let (name, as_csv) = match table.strip_suffix(".csv") {
        Some(name) => (name, true),
        None => (table.as_str(), false),
    };

    match name {
        "billboards" => respond(name, view_service::billboard_rows(&state, &store_id).await?, as_csv),
        "categories" => respond(name, view_service::category_rows(&state, &store_id).await?, as_csv),
        "sizes" => respond(name, view_service::size_rows(&state, &store_id).await?, as_csv),
        "colors" => respond(name, view_service::color_rows(&state, &store_id).await?, as_csv),
        "products" => respond(name, view_service::product_rows(&state, &store_id).await?, as_csv),
        "orders" => respond(name, view_service::order_rows(&state, &store_id).await?, as_csv),
        _ => Err(DomainError::NotFound),
    }
}
