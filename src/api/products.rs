use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use super::require_store_owner;
use crate::auth::Claims;
use crate::domain::validation::ProductInput;
use crate::domain::{DomainError, ProductFilter, Validate};
use crate::infrastructure::AppState;

/// Query parameters for the storefront product listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    /// Kept as text: anything other than `true` means "no featured filter"
    pub is_featured: Option<String>,
}

impl From<ListProductsQuery> for ProductFilter {
    fn from(query: ListProductsQuery) -> Self {
        ProductFilter {
            category_id: query.category_id,
            color_id: query.color_id,
            size_id: query.size_id,
            is_featured: query.is_featured.map(|v| v == "true"),
            include_archived: false,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/{store_id}/products",
    params(
        ("store_id" = String, Path, description = "Store id"),
        ("categoryId" = Option<String>, Query, description = "Only this category"),
        ("colorId" = Option<String>, Query, description = "Only this color"),
        ("sizeId" = Option<String>, Query, description = "Only this size"),
        ("isFeatured" = Option<bool>, Query, description = "Only featured products when true")
    ),
    responses((status = 200, description = "Unarchived products, newest first"))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(params): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, DomainError> {
    let products = state
        .product_repo
        .find_all(&store_id, ProductFilter::from(params))
        .await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    let product = state
        .product_repo
        .find_by_id(&store_id, &product_id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    claims: Claims,
    Path(store_id): Path<String>,
    Json(payload): Json<ProductInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let product = state.product_repo.create(&store_id, payload).await?;
    tracing::info!("Product {} created in store {}", product.product.id, store_id);
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, product_id)): Path<(String, String)>,
    Json(payload): Json<ProductInput>,
) -> Result<impl IntoResponse, DomainError> {
    payload.validate()?;
    require_store_owner(&state, &claims, &store_id).await?;

    let product = state
        .product_repo
        .update(&store_id, &product_id, payload)
        .await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    claims: Claims,
    Path((store_id, product_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, DomainError> {
    require_store_owner(&state, &claims, &store_id).await?;

    state.product_repo.delete(&store_id, &product_id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}
