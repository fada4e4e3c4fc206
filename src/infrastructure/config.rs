use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Store-scoped API root the storefront fetch helpers talk to
    pub storefront_api_url: Option<String>,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://storedesk.db?mode=rwc".to_string());

        Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            storefront_api_url: env::var("STOREFRONT_API_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            seed_demo: env::var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
        }
    }
}
