use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storedesk::infrastructure::AppState;
use storedesk::modules::storefront::StorefrontClient;
use storedesk::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storedesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from_env();

    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&AppState::new(db.clone())).await {
            tracing::error!("Failed to seed data: {}", e);
        } else {
            tracing::info!("Demo data seeded successfully.");
        }
    }

    if let Some(storefront) = StorefrontClient::from_config(&config) {
        tracing::info!("Storefront API root: {}", storefront.api_url());
    }

    if let Err(e) = server::serve(db, config.port, &config.cors_allowed_origins).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
