pub mod auth;
pub mod billboards;
pub mod categories;
pub mod colors;
pub mod health;
pub mod orders;
pub mod overview;
pub mod products;
pub mod sizes;
pub mod storefront;
pub mod stores;
pub mod views;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::auth::Claims;
use crate::domain::{DomainError, Store};
use crate::infrastructure::AppState;

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match self {
            DomainError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
            }
            DomainError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Validation failed", "fields": fields })),
            )
                .into_response(),
            DomainError::Conflict(detail) => {
                tracing::warn!("Conflict: {}", detail);
                (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "The record is still in use or already exists",
                        "detail": detail
                    })),
                )
                    .into_response()
            }
            DomainError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthenticated" })),
            )
                .into_response(),
            DomainError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            DomainError::Database(msg) | DomainError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Load the store and check the caller owns it
pub async fn require_store_owner(
    state: &AppState,
    claims: &Claims,
    store_id: &str,
) -> Result<Store, DomainError> {
    let store = state
        .store_repo
        .find_by_id(store_id)
        .await?
        .ok_or(DomainError::NotFound)?;

    if store.user_id != claims.sub {
        tracing::warn!(
            "User {} tried to access store {} owned by someone else",
            claims.username,
            store_id
        );
        return Err(DomainError::Forbidden);
    }

    Ok(store)
}

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // Stores
        .route("/stores", get(stores::list_stores).post(stores::create_store))
        .route(
            "/stores/:store_id",
            get(stores::get_store)
                .patch(stores::update_store)
                .delete(stores::delete_store),
        )
        // Billboards
        .route(
            "/:store_id/billboards",
            get(billboards::list_billboards).post(billboards::create_billboard),
        )
        .route(
            "/:store_id/billboards/:billboard_id",
            get(billboards::get_billboard)
                .patch(billboards::update_billboard)
                .delete(billboards::delete_billboard),
        )
        // Categories
        .route(
            "/:store_id/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/:store_id/categories/:category_id",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        // Sizes
        .route(
            "/:store_id/sizes",
            get(sizes::list_sizes).post(sizes::create_size),
        )
        .route(
            "/:store_id/sizes/:size_id",
            get(sizes::get_size)
                .patch(sizes::update_size)
                .delete(sizes::delete_size),
        )
        // Colors
        .route(
            "/:store_id/colors",
            get(colors::list_colors).post(colors::create_color),
        )
        .route(
            "/:store_id/colors/:color_id",
            get(colors::get_color)
                .patch(colors::update_color)
                .delete(colors::delete_color),
        )
        // Products
        .route(
            "/:store_id/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/:store_id/products/:product_id",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        // Orders
        .route("/:store_id/orders", get(orders::list_orders))
        .route("/:store_id/orders/:order_id", get(orders::get_order))
        .route("/:store_id/orders/:order_id/pay", post(orders::pay_order))
        .route("/:store_id/checkout", post(orders::checkout))
        // Dashboard
        .route("/:store_id/overview", get(overview::get_overview))
        .route("/:store_id/views/:table", get(views::get_view))
        // Storefront
        .route("/storefront/footer", get(storefront::footer))
        .with_state(state)
}
