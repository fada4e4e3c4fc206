//! Order Service - checkout, payment and order listings

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FieldError};
use crate::models::order::{self, Entity as Order};
use crate::models::order_item::{self, Entity as OrderItem};
use crate::models::product::{self, Entity as Product};
use crate::utils::time::now_timestamp;

/// Order with the products it contains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: order::Model,
    pub items: Vec<OrderItemDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetails {
    pub id: String,
    pub product: product::Model,
}

impl OrderWithItems {
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|i| i.product.price).sum()
    }

    pub fn product_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.product.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Filter parameters for listing orders
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub is_paid: Option<bool>,
}

async fn attach_items(
    db: &DatabaseConnection,
    orders: Vec<order::Model>,
) -> Result<Vec<OrderWithItems>, DomainError> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
    let items_with_products = OrderItem::find()
        .filter(order_item::Column::OrderId.is_in(order_ids))
        .find_also_related(Product)
        .all(db)
        .await?;

    let mut by_order: HashMap<String, Vec<OrderItemDetails>> = HashMap::new();
    for (item, product) in items_with_products {
        match product {
            Some(product) => by_order.entry(item.order_id).or_default().push(OrderItemDetails {
                id: item.id,
                product,
            }),
            None => tracing::warn!("Order item {} lost its product", item.id),
        }
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderWithItems {
            items: by_order.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect())
}

/// Orders of a store, newest first
pub async fn list_orders(
    db: &DatabaseConnection,
    store_id: &str,
    filter: OrderFilter,
) -> Result<Vec<OrderWithItems>, DomainError> {
    let mut condition = Condition::all().add(order::Column::StoreId.eq(store_id));

    if let Some(is_paid) = filter.is_paid {
        condition = condition.add(order::Column::IsPaid.eq(is_paid));
    }

    let orders = Order::find()
        .filter(condition)
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await?;

    attach_items(db, orders).await
}

pub async fn get_order(
    db: &DatabaseConnection,
    store_id: &str,
    order_id: &str,
) -> Result<OrderWithItems, DomainError> {
    let order = Order::find_by_id(order_id)
        .filter(order::Column::StoreId.eq(store_id))
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    attach_items(db, vec![order])
        .await?
        .into_iter()
        .next()
        .ok_or(DomainError::NotFound)
}

/// Create an unpaid order with one item per requested product
pub async fn checkout(
    db: &DatabaseConnection,
    store_id: &str,
    request: CheckoutRequest,
) -> Result<OrderWithItems, DomainError> {
    if request.product_ids.is_empty() {
        return Err(DomainError::invalid("productIds", "Product ids are required"));
    }

    let now = now_timestamp();
    let order_id = uuid::Uuid::new_v4().to_string();

    // Availability is read in the same transaction that writes the order
    let txn = db.begin().await?;

    let available: Vec<String> = Product::find()
        .filter(product::Column::StoreId.eq(store_id))
        .filter(product::Column::IsArchived.eq(false))
        .filter(product::Column::Id.is_in(request.product_ids.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    let missing: Vec<FieldError> = request
        .product_ids
        .iter()
        .filter(|id| !available.contains(id))
        .map(|id| FieldError::new("productIds", format!("Product {} is not available", id)))
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::Validation(missing));
    }

    order::ActiveModel {
        id: Set(order_id.clone()),
        store_id: Set(store_id.to_string()),
        is_paid: Set(false),
        phone: Set(String::new()),
        address: Set(String::new()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let items = request
        .product_ids
        .into_iter()
        .map(|product_id| order_item::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            order_id: Set(order_id.clone()),
            product_id: Set(product_id),
        });
    OrderItem::insert_many(items).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Order {} created for store {}", order_id, store_id);
    get_order(db, store_id, &order_id).await
}

/// Mark an order paid, record the buyer's contact details and archive the sold products
pub async fn mark_paid(
    db: &DatabaseConnection,
    store_id: &str,
    order_id: &str,
    details: PaymentDetails,
) -> Result<OrderWithItems, DomainError> {
    let existing = get_order(db, store_id, order_id).await?;
    let product_ids: Vec<String> = existing.items.iter().map(|i| i.product.id.clone()).collect();
    let now = now_timestamp();

    let txn = db.begin().await?;

    // Only one payment can flip the flag
    let paid = Order::update_many()
        .col_expr(order::Column::IsPaid, Expr::value(true))
        .col_expr(order::Column::Phone, Expr::value(details.phone))
        .col_expr(order::Column::Address, Expr::value(details.address))
        .col_expr(order::Column::UpdatedAt, Expr::value(now.clone()))
        .filter(order::Column::Id.eq(order_id))
        .filter(order::Column::StoreId.eq(store_id))
        .filter(order::Column::IsPaid.eq(false))
        .exec(&txn)
        .await?;
    if paid.rows_affected == 0 {
        return Err(DomainError::Conflict("Order is already paid".to_string()));
    }

    if !product_ids.is_empty() {
        Product::update_many()
            .col_expr(product::Column::IsArchived, Expr::value(true))
            .col_expr(product::Column::UpdatedAt, Expr::value(now))
            .filter(product::Column::Id.is_in(product_ids))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    get_order(db, store_id, order_id).await
}
