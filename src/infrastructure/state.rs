//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    BillboardRepository, CategoryRepository, ColorRepository, ProductRepository, SizeRepository,
    StoreRepository,
};
use crate::infrastructure::{
    SeaOrmBillboardRepository, SeaOrmCategoryRepository, SeaOrmColorRepository,
    SeaOrmProductRepository, SeaOrmSizeRepository, SeaOrmStoreRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection for the order and overview services
    db: DatabaseConnection,
    pub store_repo: Arc<dyn StoreRepository>,
    pub billboard_repo: Arc<dyn BillboardRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub size_repo: Arc<dyn SizeRepository>,
    pub color_repo: Arc<dyn ColorRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            store_repo: Arc::new(SeaOrmStoreRepository::new(db.clone())),
            billboard_repo: Arc::new(SeaOrmBillboardRepository::new(db.clone())),
            category_repo: Arc::new(SeaOrmCategoryRepository::new(db.clone())),
            size_repo: Arc::new(SeaOrmSizeRepository::new(db.clone())),
            color_repo: Arc::new(SeaOrmColorRepository::new(db.clone())),
            product_repo: Arc::new(SeaOrmProductRepository::new(db.clone())),
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
