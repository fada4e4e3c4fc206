//! SeaORM implementation of ProductRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::validation::{ImageInput, ProductInput};
use crate::domain::{DomainError, FieldError, ProductDetails, ProductFilter, ProductRepository};
use crate::models::product::{ActiveModel, Column, Entity as ProductEntity, Model};
use crate::models::{category, color, image, size};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of ProductRepository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

async fn insert_images<C: ConnectionTrait>(
    conn: &C,
    product_id: &str,
    images: Vec<ImageInput>,
) -> Result<(), DomainError> {
    if images.is_empty() {
        return Ok(());
    }

    let now = now_timestamp();
    let rows = images.into_iter().map(|img| image::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        product_id: Set(product_id.to_string()),
        url: Set(img.url),
        created_at: Set(now.clone()),
    });

    image::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Category, size and color must all belong to the product's store
    async fn ensure_references(
        &self,
        store_id: &str,
        input: &ProductInput,
    ) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        let category = category::Entity::find_by_id(input.category_id.as_str())
            .filter(category::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?;
        if category.is_none() {
            errors.push(FieldError::new("categoryId", "Category not found in this store"));
        }

        let size = size::Entity::find_by_id(input.size_id.as_str())
            .filter(size::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?;
        if size.is_none() {
            errors.push(FieldError::new("sizeId", "Size not found in this store"));
        }

        let color = color::Entity::find_by_id(input.color_id.as_str())
            .filter(color::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?;
        if color.is_none() {
            errors.push(FieldError::new("colorId", "Color not found in this store"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    async fn find_model(&self, store_id: &str, id: &str) -> Result<Model, DomainError> {
        ProductEntity::find_by_id(id)
            .filter(Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Attach images, category, size and color with one query per table
    async fn load_details(&self, products: Vec<Model>) -> Result<Vec<ProductDetails>, DomainError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        let category_ids: Vec<String> = products.iter().map(|p| p.category_id.clone()).collect();
        let size_ids: Vec<String> = products.iter().map(|p| p.size_id.clone()).collect();
        let color_ids: Vec<String> = products.iter().map(|p| p.color_id.clone()).collect();

        let categories: HashMap<String, category::Model> = category::Entity::find()
            .filter(category::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let sizes: HashMap<String, size::Model> = size::Entity::find()
            .filter(size::Column::Id.is_in(size_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        let colors: HashMap<String, color::Model> = color::Entity::find()
            .filter(color::Column::Id.is_in(color_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut images: HashMap<String, Vec<image::Model>> = HashMap::new();
        for img in image::Entity::find()
            .filter(image::Column::ProductId.is_in(product_ids))
            .order_by_asc(image::Column::CreatedAt)
            .all(&self.db)
            .await?
        {
            images.entry(img.product_id.clone()).or_default().push(img);
        }

        let mut details = Vec::with_capacity(products.len());
        for product in products {
            let (Some(category), Some(size), Some(color)) = (
                categories.get(&product.category_id),
                sizes.get(&product.size_id),
                colors.get(&product.color_id),
            ) else {
                tracing::warn!("Product {} has dangling references, skipped", product.id);
                continue;
            };

            details.push(ProductDetails {
                images: images.remove(&product.id).unwrap_or_default(),
                category: category.clone(),
                size: size.clone(),
                color: color.clone(),
                product,
            });
        }

        Ok(details)
    }

    async fn details_by_id(&self, store_id: &str, id: &str) -> Result<ProductDetails, DomainError> {
        let product = self.find_model(store_id, id).await?;
        self.load_details(vec![product])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Internal(format!("Product {} is incomplete", id)))
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(
        &self,
        store_id: &str,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetails>, DomainError> {
        let mut query = ProductEntity::find().filter(Column::StoreId.eq(store_id));

        if let Some(category_id) = non_empty(&filter.category_id) {
            query = query.filter(Column::CategoryId.eq(category_id));
        }
        if let Some(color_id) = non_empty(&filter.color_id) {
            query = query.filter(Column::ColorId.eq(color_id));
        }
        if let Some(size_id) = non_empty(&filter.size_id) {
            query = query.filter(Column::SizeId.eq(size_id));
        }
        if filter.is_featured == Some(true) {
            query = query.filter(Column::IsFeatured.eq(true));
        }
        if !filter.include_archived {
            query = query.filter(Column::IsArchived.eq(false));
        }

        let products = query
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.load_details(products).await
    }

    async fn find_by_id(
        &self,
        store_id: &str,
        id: &str,
    ) -> Result<Option<ProductDetails>, DomainError> {
        match self.details_by_id(store_id, id).await {
            Ok(details) => Ok(Some(details)),
            Err(DomainError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(
        &self,
        store_id: &str,
        input: ProductInput,
    ) -> Result<ProductDetails, DomainError> {
        self.ensure_references(store_id, &input).await?;

        let now = now_timestamp();
        let id = uuid::Uuid::new_v4().to_string();

        let product = ActiveModel {
            id: Set(id.clone()),
            store_id: Set(store_id.to_string()),
            category_id: Set(input.category_id),
            name: Set(input.name),
            price: Set(input.price),
            is_featured: Set(input.is_featured),
            is_archived: Set(input.is_archived),
            size_id: Set(input.size_id),
            color_id: Set(input.color_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let txn = self.db.begin().await?;
        product.insert(&txn).await?;
        insert_images(&txn, &id, input.images).await?;
        txn.commit().await?;

        self.details_by_id(store_id, &id).await
    }

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: ProductInput,
    ) -> Result<ProductDetails, DomainError> {
        let existing = self.find_model(store_id, id).await?;
        self.ensure_references(store_id, &input).await?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.price = Set(input.price);
        active.category_id = Set(input.category_id);
        active.size_id = Set(input.size_id);
        active.color_id = Set(input.color_id);
        active.is_featured = Set(input.is_featured);
        active.is_archived = Set(input.is_archived);
        active.updated_at = Set(now_timestamp());

        let txn = self.db.begin().await?;
        active.update(&txn).await?;
        image::Entity::delete_many()
            .filter(image::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        insert_images(&txn, id, input.images).await?;
        txn.commit().await?;

        self.details_by_id(store_id, id).await
    }

    async fn delete(&self, store_id: &str, id: &str) -> Result<(), DomainError> {
        let result = ProductEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::StoreId.eq(store_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
