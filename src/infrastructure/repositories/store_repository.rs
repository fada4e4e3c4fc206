//! SeaORM implementation of StoreRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::validation::StoreInput;
use crate::domain::{DomainError, Store, StoreRepository};
use crate::models::store::{ActiveModel, Column, Entity as StoreEntity};
use crate::models::{billboard, category, color, order, product, size};
use crate::utils::time::now_timestamp;

/// SeaORM-based implementation of StoreRepository
pub struct SeaOrmStoreRepository {
    db: DatabaseConnection,
}

impl SeaOrmStoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoreRepository for SeaOrmStoreRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Store>, DomainError> {
        let stores = StoreEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(stores)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Store>, DomainError> {
        Ok(StoreEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, user_id: &str, input: StoreInput) -> Result<Store, DomainError> {
        let now = now_timestamp();

        let store = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(input.name),
            user_id: Set(user_id.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        Ok(store.insert(&self.db).await?)
    }

    async fn update(&self, id: &str, input: StoreInput) -> Result<Store, DomainError> {
        let existing = StoreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);
        active.updated_at = Set(now_timestamp());

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        // SQLite checks RESTRICT immediately, so children go first, leaves before parents
        let txn = self.db.begin().await?;

        order::Entity::delete_many()
            .filter(order::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        product::Entity::delete_many()
            .filter(product::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        category::Entity::delete_many()
            .filter(category::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        billboard::Entity::delete_many()
            .filter(billboard::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        size::Entity::delete_many()
            .filter(size::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        color::Entity::delete_many()
            .filter(color::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;

        let result = StoreEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        tracing::info!("Store {} deleted with its catalog", id);
        Ok(())
    }
}
