//! SeaORM implementation of BillboardRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::validation::BillboardInput;
use crate::domain::{Billboard, BillboardRepository, DomainError};
use crate::models::billboard::{ActiveModel, Column, Entity as BillboardEntity};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of BillboardRepository
pub struct SeaOrmBillboardRepository {
    db: DatabaseConnection,
}

impl SeaOrmBillboardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, store_id: &str, id: &str) -> Result<Billboard, DomainError> {
        BillboardEntity::find_by_id(id)
            .filter(Column::StoreId.eq(store_id))
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)
    }
}

#[async_trait]
impl BillboardRepository for SeaOrmBillboardRepository {
    async fn find_by_store(&self, store_id: &str) -> Result<Vec<Billboard>, DomainError> {
        let billboards = BillboardEntity::find()
            .filter(Column::StoreId.eq(store_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(billboards)
    }

    async fn find_by_id(
        &self,
        store_id: &str,
        id: &str,
    ) -> Result<Option<Billboard>, DomainError> {
        match self.find_model(store_id, id).await {
            Ok(billboard) => Ok(Some(billboard)),
            Err(DomainError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(
        &self,
        store_id: &str,
        input: BillboardInput,
    ) -> Result<Billboard, DomainError> {
        let now = now_timestamp();

        let billboard = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            store_id: Set(store_id.to_string()),
            label: Set(input.label),
            image_url: Set(input.image_url),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        Ok(billboard.insert(&self.db).await?)
    }

    async fn update(
        &self,
        store_id: &str,
        id: &str,
        input: BillboardInput,
    ) -> Result<Billboard, DomainError> {
        let mut active: ActiveModel = self.find_model(store_id, id).await?.into();
        active.label = Set(input.label);
        active.image_url = Set(input.image_url);
        active.updated_at = Set(now_timestamp());

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, store_id: &str, id: &str) -> Result<Billboard, DomainError> {
        let billboard = self.find_model(store_id, id).await?;
        billboard.clone().delete(&self.db).await?;
        Ok(billboard)
    }
}
