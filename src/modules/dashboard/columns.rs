//! Column declarations for the dashboard data tables.
//!
//! Rows are flat, display-ready projections: dates and prices are already
//! formatted strings by the time they reach a table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub accessor_key: &'static str,
    pub header: &'static str,
}

const fn col(accessor_key: &'static str, header: &'static str) -> ColumnDef {
    ColumnDef {
        accessor_key,
        header,
    }
}

pub trait TableRow: Serialize {
    const COLUMNS: &'static [ColumnDef];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillboardColumn {
    pub id: String,
    pub label: String,
    pub created_at: String,
}

impl TableRow for BillboardColumn {
    const COLUMNS: &'static [ColumnDef] = &[col("label", "Label"), col("createdAt", "Date")];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColumn {
    pub id: String,
    pub name: String,
    pub billboard_label: String,
    pub created_at: String,
}

impl TableRow for CategoryColumn {
    const COLUMNS: &'static [ColumnDef] = &[
        col("name", "Name"),
        col("billboardLabel", "Billboard"),
        col("createdAt", "Date"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeColumn {
    pub id: String,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl TableRow for SizeColumn {
    const COLUMNS: &'static [ColumnDef] = &[
        col("name", "Name"),
        col("value", "Value"),
        col("createdAt", "Date"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorColumn {
    pub id: String,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl TableRow for ColorColumn {
    const COLUMNS: &'static [ColumnDef] = &[
        col("name", "Name"),
        col("value", "Color"),
        col("createdAt", "Date"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductColumn {
    pub id: String,
    pub name: String,
    pub is_featured: bool,
    pub is_archived: bool,
    pub price: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub created_at: String,
}

impl TableRow for ProductColumn {
    const COLUMNS: &'static [ColumnDef] = &[
        col("name", "Name"),
        col("isArchived", "Archived"),
        col("isFeatured", "Featured"),
        col("price", "Price"),
        col("category", "Category"),
        col("size", "Size"),
        col("color", "Color"),
        col("createdAt", "Date"),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderColumn {
    pub id: String,
    pub phoneno: String,
    pub address: String,
    pub is_paid: bool,
    pub products: String,
    pub total_price: String,
    pub created_at: String,
}

impl TableRow for OrderColumn {
    const COLUMNS: &'static [ColumnDef] = &[
        col("products", "Products"),
        col("phoneno", "Mobile.No"),
        col("address", "Address"),
        col("totalPrice", "Total Price"),
        col("isPaid", "Paid"),
    ];
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render rows as CSV: one header row, then one line per row in column order.
pub fn render_csv<R: TableRow>(rows: &[R]) -> Result<String, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(R::COLUMNS.iter().map(|c| c.header))
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    for row in rows {
        let json = serde_json::to_value(row).map_err(|e| DomainError::Internal(e.to_string()))?;
        let record: Vec<String> = R::COLUMNS
            .iter()
            .map(|c| cell(json.get(c.accessor_key)))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DomainError::Internal(e.to_string()))
}
