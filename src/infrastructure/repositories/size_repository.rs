//! SeaORM implementation of SizeRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::validation::SizeInput;
use crate::domain::{DomainError, Size, SizeRepository};
use crate::models::size::{ActiveModel, Column, Entity as SizeEntity};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of SizeRepository
pub struct SeaOrmSizeRepository {
    db: DatabaseConnection,
}

impl SeaOrmSizeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SizeRepository for SeaOrmSizeRepository {
    async fn find_by_store(&self, store_id: &str) -> Result<Vec<Size>, DomainError> {
        let rows = SizeEntity::find()
            .filter(Column::StoreId.eq(store_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, store_id: &str, id: &str) -> Result<Option<Size>, DomainError> {
        let row = SizeEntity::find_by_id(id)
            .filter(Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    async fn create(&self, store_id: &str, input: SizeInput) -> Result<Size, DomainError> {
        let now = now_timestamp();

        let row = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            store_id: Set(store_id.to_string()),
            name: Set(input.name),
            value: Set(input.value),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        Ok(row.insert(&self.db).await?)
    }

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: SizeInput,
    ) -> Result<Size, DomainError> {
        let existing = self
            .find_by_id(store_id, id)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.value = Set(input.value);
        active.updated_at = Set(now_timestamp());

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, store_id: &str, id: &str) -> Result<Size, DomainError> {
        let existing = self
            .find_by_id(store_id, id)
            .await?
            .ok_or(DomainError::NotFound)?;

        existing.clone().delete(&self.db).await?;
        Ok(existing)
    }
}
