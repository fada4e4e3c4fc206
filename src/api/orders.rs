use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::order_service::{self, CheckoutRequest, OrderFilter, PaymentDetails};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub is_paid: Option<bool>,
}

/// GET /api/:store_id/orders - orders with their items, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Query(params): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let filter = OrderFilter {
        is_paid: params.is_paid,
    };
    let orders = order_service::list_orders(state.db(), &store_id, filter).await?;
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, order_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let order = order_service::get_order(state.db(), &store_id, &order_id).await?;
    Ok(Json(order))
}

/// POST /api/:store_id/checkout - public; creates an unpaid order
pub async fn checkout(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, DomainError> {
    state
        .store_repo
        .find_by_id(&store_id)
        .await?
        .ok_or(DomainError::NotFound)?;

    let order = order_service::checkout(state.db(), &store_id, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /api/:store_id/orders/:order_id/pay - record payment and archive sold products
pub async fn pay_order(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, order_id)): Path<(String, String)>,
    Json(payload): Json<PaymentDetails>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    let order = order_service::mark_paid(state.db(), &store_id, &order_id, payload).await?;
    tracing::info!("Order {} paid", order_id);
    Ok(Json(order))
}
