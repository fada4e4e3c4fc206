use serial_test::serial;
use storedesk::config::Config;

// Environment mutation is process-wide; these tests run one at a time.
fn clear_env() {
    for key in [
        "DATABASE_URL",
        "PORT",
        "CORS_ALLOWED_ORIGINS",
        "STOREFRONT_API_URL",
        "SEED_DEMO",
    ] {
        unsafe { std::env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();
    let config = Config::from_env();
    assert_eq!(config.database_url, "sqlite://storedesk.db?mode=rwc");
    assert_eq!(config.port, 8000);
    assert!(config.cors_allowed_origins.is_empty());
    assert!(config.storefront_api_url.is_none());
    assert!(!config.seed_demo);
}

#[test]
#[serial]
fn test_values_from_env() {
    clear_env();
    set("DATABASE_URL", "sqlite::memory:");
    set("PORT", "9090");
    set("CORS_ALLOWED_ORIGINS", "http://localhost:3000, http://localhost:3001");
    set("STOREFRONT_API_URL", "http://localhost:8000/api/store-1");
    set("SEED_DEMO", "true");

    let config = Config::from_env();
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.port, 9090);
    assert_eq!(
        config.cors_allowed_origins,
        vec!["http://localhost:3000", "http://localhost:3001"]
    );
    assert_eq!(
        config.storefront_api_url.as_deref(),
        Some("http://localhost:8000/api/store-1")
    );
    assert!(config.seed_demo);
    clear_env();
}

#[test]
#[serial]
fn test_bad_port_falls_back() {
    clear_env();
    set("PORT", "not-a-port");
    assert_eq!(Config::from_env().port, 8000);
    clear_env();
}
