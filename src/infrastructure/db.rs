use std::str::FromStr;
use std::time::Duration;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlxSqliteConnector, Statement};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stores (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS billboards (
        id TEXT PRIMARY KEY NOT NULL,
        store_id TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        label TEXT NOT NULL,
        image_url TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY NOT NULL,
        store_id TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        billboard_id TEXT NOT NULL REFERENCES billboards(id) ON DELETE RESTRICT,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sizes (
        id TEXT PRIMARY KEY NOT NULL,
        store_id TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        value TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS colors (
        id TEXT PRIMARY KEY NOT NULL,
        store_id TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        value TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY NOT NULL,
        store_id TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        is_featured BOOLEAN NOT NULL DEFAULT 0,
        is_archived BOOLEAN NOT NULL DEFAULT 0,
        size_id TEXT NOT NULL REFERENCES sizes(id) ON DELETE RESTRICT,
        color_id TEXT NOT NULL REFERENCES colors(id) ON DELETE RESTRICT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS images (
        id TEXT PRIMARY KEY NOT NULL,
        product_id TEXT NOT NULL REFERENCES products(id) ON DELETE CASCADE,
        url TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY NOT NULL,
        store_id TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        is_paid BOOLEAN NOT NULL DEFAULT 0,
        phone TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id TEXT PRIMARY KEY NOT NULL,
        order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
        product_id TEXT NOT NULL REFERENCES products(id) ON DELETE RESTRICT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_billboards_store ON billboards(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_categories_store ON categories(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_sizes_store ON sizes(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_colors_store ON colors(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_store ON products(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_store ON orders(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id)",
];

/// Open the SQLite pool with foreign keys enforced and apply the schema.
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DbErr::Custom(format!("Invalid DATABASE_URL: {}", e)))?
        .foreign_keys(true)
        .create_if_missing(true);

    // Each connection to an in-memory database is a separate database
    let in_memory = database_url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| DbErr::Custom(format!("Failed to open database: {}", e)))?;

    let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    for statement in SCHEMA {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            statement.to_string(),
        ))
        .await?;
    }

    tracing::debug!("Schema ready ({} statements)", SCHEMA.len());
    Ok(())
}
