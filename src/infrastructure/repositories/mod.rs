//! Repository implementations using SeaORM

pub mod billboard_repository;
pub mod category_repository;
pub mod color_repository;
pub mod product_repository;
pub mod size_repository;
pub mod store_repository;

pub use billboard_repository::SeaOrmBillboardRepository;
pub use category_repository::SeaOrmCategoryRepository;
pub use color_repository::SeaOrmColorRepository;
pub use product_repository::SeaOrmProductRepository;
pub use size_repository::SeaOrmSizeRepository;
pub use store_repository::SeaOrmStoreRepository;
