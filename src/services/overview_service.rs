//! Overview Service - dashboard statistics for one store

use chrono::{DateTime, Datelike};
use sea_orm::*;
use serde::Serialize;

use super::order_service::{self, OrderFilter, OrderWithItems};
use crate::domain::DomainError;
use crate::models::product::{self, Entity as Product};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPoint {
    pub name: &'static str,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOverview {
    pub total_revenue: f64,
    pub sales_count: u64,
    pub stock_count: u64,
    pub graph_revenue: Vec<GraphPoint>,
}

/// Revenue of paid orders bucketed by calendar month of order creation
pub fn revenue_by_month(orders: &[OrderWithItems]) -> Vec<GraphPoint> {
    let mut totals = [0.0_f64; 12];

    for order in orders.iter().filter(|o| o.order.is_paid) {
        match DateTime::parse_from_rfc3339(&order.order.created_at) {
            Ok(created) => totals[created.month0() as usize] += order.total_price(),
            Err(e) => tracing::warn!("Order {} has bad timestamp: {}", order.order.id, e),
        }
    }

    MONTHS
        .into_iter()
        .zip(totals)
        .map(|(name, total)| GraphPoint { name, total })
        .collect()
}

/// Total revenue over paid orders
pub fn total_revenue(orders: &[OrderWithItems]) -> f64 {
    orders
        .iter()
        .filter(|o| o.order.is_paid)
        .map(OrderWithItems::total_price)
        .sum()
}

/// Products still for sale
pub async fn count_stock(db: &DatabaseConnection, store_id: &str) -> Result<u64, DomainError> {
    let count = Product::find()
        .filter(product::Column::StoreId.eq(store_id))
        .filter(product::Column::IsArchived.eq(false))
        .count(db)
        .await?;
    Ok(count)
}

pub async fn store_overview(
    db: &DatabaseConnection,
    store_id: &str,
) -> Result<StoreOverview, DomainError> {
    let paid = order_service::list_orders(
        db,
        store_id,
        OrderFilter {
            is_paid: Some(true),
        },
    )
    .await?;

    Ok(StoreOverview {
        total_revenue: total_revenue(&paid),
        sales_count: paid.len() as u64,
        stock_count: count_stock(db, store_id).await?,
        graph_revenue: revenue_by_month(&paid),
    })
}
