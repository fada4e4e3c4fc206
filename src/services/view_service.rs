//! Listing rows for the dashboard tables: newest first, display-formatted.

use super::order_service::{self, OrderFilter};
use crate::domain::{DomainError, ProductFilter};
use crate::infrastructure::AppState;
use crate::modules::dashboard::columns::{
    BillboardColumn, CategoryColumn, ColorColumn, OrderColumn, ProductColumn, SizeColumn,
};
use crate::utils::money::format_usd;
use crate::utils::time::format_timestamp;

pub async fn billboard_rows(
    state: &AppState,
    store_id: &str,
) -> Result<Vec<BillboardColumn>, DomainError> {
    let billboards = state.billboard_repo.find_by_store(store_id).await?;

    Ok(billboards
        .into_iter()
        .map(|item| BillboardColumn {
            created_at: format_timestamp(&item.created_at),
            id: item.id,
            label: item.label,
        })
        .collect())
}

pub async fn category_rows(
    state: &AppState,
    store_id: &str,
) -> Result<Vec<CategoryColumn>, DomainError> {
    let categories = state.category_repo.find_by_store(store_id).await?;

    Ok(categories
        .into_iter()
        .map(|item| CategoryColumn {
            created_at: format_timestamp(&item.category.created_at),
            id: item.category.id,
            name: item.category.name,
            billboard_label: item.billboard.label,
        })
        .collect())
}

pub async fn size_rows(state: &AppState, store_id: &str) -> Result<Vec<SizeColumn>, DomainError> {
    let sizes = state.size_repo.find_by_store(store_id).await?;

    Ok(sizes
        .into_iter()
        .map(|item| SizeColumn {
            created_at: format_timestamp(&item.created_at),
            id: item.id,
            name: item.name,
            value: item.value,
        })
        .collect())
}

pub async fn color_rows(state: &AppState, store_id: &str) -> Result<Vec<ColorColumn>, DomainError> {
    let colors = state.color_repo.find_by_store(store_id).await?;

    Ok(colors
        .into_iter()
        .map(|item| ColorColumn {
            created_at: format_timestamp(&item.created_at),
            id: item.id,
            name: item.name,
            value: item.value,
        })
        .collect())
}

/// Every product of the store, archived ones included
pub async fn product_rows(
    state: &AppState,
    store_id: &str,
) -> Result<Vec<ProductColumn>, DomainError> {
    let filter = ProductFilter {
        include_archived: true,
        ..Default::default()
    };
    let products = state.product_repo.find_all(store_id, filter).await?;

    Ok(products
        .into_iter()
        .map(|item| ProductColumn {
            created_at: format_timestamp(&item.product.created_at),
            price: format_usd(item.product.price),
            id: item.product.id,
            name: item.product.name,
            is_featured: item.product.is_featured,
            is_archived: item.product.is_archived,
            category: item.category.name,
            size: item.size.name,
            color: item.color.value,
        })
        .collect())
}

pub async fn order_rows(state: &AppState, store_id: &str) -> Result<Vec<OrderColumn>, DomainError> {
    let orders = order_service::list_orders(state.db(), store_id, OrderFilter::default()).await?;

    Ok(orders
        .into_iter()
        .map(|item| OrderColumn {
            products: item.product_names().join(", "),
            total_price: format_usd(item.total_price()),
            created_at: format_timestamp(&item.order.created_at),
            id: item.order.id,
            phoneno: item.order.phone,
            address: item.order.address,
            is_paid: item.order.is_paid,
        })
        .collect())
}
