//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::validation::CategoryInput;
use crate::domain::{Category, CategoryRepository, CategoryWithBillboard, DomainError};
use crate::models::billboard::{self, Entity as BillboardEntity};
use crate::models::category::{ActiveModel, Column, Entity as CategoryEntity};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of CategoryRepository
pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The billboard must exist and belong to the same store
    async fn ensure_billboard(&self, store_id: &str, billboard_id: &str) -> Result<(), DomainError> {
        let found = BillboardEntity::find_by_id(billboard_id)
            .filter(billboard::Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::invalid(
                "billboardId",
                "Billboard not found in this store",
            )),
        }
    }

    async fn find_model(&self, store_id: &str, id: &str) -> Result<Category, DomainError> {
        CategoryEntity::find_by_id(id)
            .filter(Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)
    }
}

fn join(pairs: Vec<(Category, Option<billboard::Model>)>) -> Vec<CategoryWithBillboard> {
    pairs
        .into_iter()
        .filter_map(|(category, billboard)| match billboard {
            Some(billboard) => Some(CategoryWithBillboard { category, billboard }),
            None => {
                tracing::warn!("Category {} has no billboard", category.id);
                None
            }
        })
        .collect()
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_store(
        &self,
        store_id: &str,
    ) -> Result<Vec<CategoryWithBillboard>, DomainError> {
        let pairs = CategoryEntity::find()
            .filter(Column::StoreId.eq(store_id))
            .order_by_desc(Column::CreatedAt)
            .find_also_related(BillboardEntity)
            .all(&self.db)
            .await?;
        Ok(join(pairs))
    }

    async fn find_by_id(
        &self,
        store_id: &str,
        id: &str,
    ) -> Result<Option<CategoryWithBillboard>, DomainError> {
        let pairs = CategoryEntity::find_by_id(id)
            .filter(Column::StoreId.eq(store_id))
            .find_also_related(BillboardEntity)
            .all(&self.db)
            .await?;
        Ok(join(pairs).into_iter().next())
    }

    async fn create(&self, store_id: &str, input: CategoryInput) -> Result<Category, DomainError> {
        self.ensure_billboard(store_id, &input.billboard_id).await?;
        let now = now_timestamp();

        let category = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            store_id: Set(store_id.to_string()),
            billboard_id: Set(input.billboard_id),
            name: Set(input.name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        Ok(category.insert(&self.db).await?)
    }

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: CategoryInput,
    ) -> Result<Category, DomainError> {
        let existing = self.find_model(store_id, id).await?;
        self.ensure_billboard(store_id, &input.billboard_id).await?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.billboard_id = Set(input.billboard_id);
        active.updated_at = Set(now_timestamp());

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, store_id: &str, id: &str) -> Result<Category, DomainError> {
        let category = self.find_model(store_id, id).await?;
        category.clone().delete(&self.db).await?;
        Ok(category)
    }
}
