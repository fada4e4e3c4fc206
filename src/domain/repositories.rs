//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::DomainError;
use super::validation::{
    BillboardInput, CategoryInput, ColorInput, ProductInput, SizeInput, StoreInput,
};
use crate::models;

pub type Store = models::store::Model;
pub type Billboard = models::billboard::Model;
pub type Category = models::category::Model;
pub type Size = models::size::Model;
pub type Color = models::color::Model;
pub type Image = models::image::Model;

/// Product with the records the storefront renders alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: models::product::Model,
    pub images: Vec<Image>,
    pub category: Category,
    pub size: Size,
    pub color: Color,
}

/// Filter criteria for product queries
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    /// Only `Some(true)` narrows the result
    pub is_featured: Option<bool>,
    pub include_archived: bool,
}

/// Category joined with its billboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithBillboard {
    #[serde(flatten)]
    pub category: Category,
    pub billboard: Billboard,
}

#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Stores owned by a user, oldest first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Store>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Store>, DomainError>;

    async fn create(&self, user_id: &str, input: StoreInput) -> Result<Store, DomainError>;

    async fn update(&self, id: &str, input: StoreInput) -> Result<Store, DomainError>;

    /// Delete a store and, by cascade, its whole catalog
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait]
pub trait BillboardRepository: Send + Sync {
    /// Billboards of a store, newest first
    async fn find_by_store(&self, store_id: &str) -> Result<Vec<Billboard>, DomainError>;

    async fn find_by_id(&self, store_id: &str, id: &str)
    -> Result<Option<Billboard>, DomainError>;

    async fn create(&self, store_id: &str, input: BillboardInput)
    -> Result<Billboard, DomainError>;

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: BillboardInput,
    ) -> Result<Billboard, DomainError>;

    /// Fails with `Conflict` while a category still uses the billboard
    async fn delete(&self, store_id: &str, id: &str) -> Result<Billboard, DomainError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_store(&self, store_id: &str)
    -> Result<Vec<CategoryWithBillboard>, DomainError>;

    async fn find_by_id(
        &self,
        store_id: &str,
        id: &str,
    ) -> Result<Option<CategoryWithBillboard>, DomainError>;

    async fn create(&self, store_id: &str, input: CategoryInput) -> Result<Category, DomainError>;

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: CategoryInput,
    ) -> Result<Category, DomainError>;

    async fn delete(&self, store_id: &str, id: &str) -> Result<Category, DomainError>;
}

#[async_trait]
pub trait SizeRepository: Send + Sync {
    async fn find_by_store(&self, store_id: &str) -> Result<Vec<Size>, DomainError>;

    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Size>, DomainError>;

    async fn create(&self, store_id: &str, input: SizeInput) -> Result<Size, DomainError>;

    async fn update(&self, store_id: &str, id: &str, input: SizeInput)
    -> Result<Size, DomainError>;

    async fn delete(&self, store_id: &str, id: &str) -> Result<Size, DomainError>;
}

#[async_trait]
pub trait ColorRepository: Send + Sync {
    async fn find_by_store(&self, store_id: &str) -> Result<Vec<Color>, DomainError>;

    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Color>, DomainError>;

    async fn create(&self, store_id: &str, input: ColorInput) -> Result<Color, DomainError>;

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: ColorInput,
    ) -> Result<Color, DomainError>;

    async fn delete(&self, store_id: &str, id: &str) -> Result<Color, DomainError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products of a store matching the filter, newest first
    async fn find_all(
        &self,
        store_id: &str,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetails>, DomainError>;

    async fn find_by_id(
        &self,
        store_id: &str,
        id: &str,
    ) -> Result<Option<ProductDetails>, DomainError>;

    async fn create(&self, store_id: &str, input: ProductInput)
    -> Result<ProductDetails, DomainError>;

    /// Replaces the product's fields and its whole image set
    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: ProductInput,
    ) -> Result<ProductDetails, DomainError>;

    async fn delete(&self, store_id: &str, id: &str) -> Result<(), DomainError>;
}
