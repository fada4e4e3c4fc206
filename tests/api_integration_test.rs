use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

use storedesk::domain::DomainError;
use storedesk::infrastructure::AppState;
use storedesk::services::order_service::{self, CheckoutRequest, PaymentDetails};
use storedesk::{db, server};

// Helper to create a test app backed by an in-memory database
async fn setup_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    (server::build_router(db.clone(), &[]), db)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": username, "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn create(app: &Router, token: &str, uri: &str, body: Value) -> Value {
    let (status, value) = send(app, "POST", uri, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{} -> {}", uri, value);
    value
}

struct Catalog {
    store_id: String,
    billboard_id: String,
    category_id: String,
    size_id: String,
    color_id: String,
}

async fn create_catalog(app: &Router, token: &str) -> Catalog {
    let store = create(app, token, "/api/stores", json!({ "name": "ALL GOOD's" })).await;
    let store_id = store["id"].as_str().unwrap().to_string();

    let billboard = create(
        app,
        token,
        &format!("/api/{}/billboards", store_id),
        json!({ "label": "Summer", "imageUrl": "https://img/summer.png" }),
    )
    .await;
    let billboard_id = billboard["id"].as_str().unwrap().to_string();

    let category = create(
        app,
        token,
        &format!("/api/{}/categories", store_id),
        json!({ "name": "Shirts", "billboardId": billboard_id }),
    )
    .await;
    let size = create(
        app,
        token,
        &format!("/api/{}/sizes", store_id),
        json!({ "name": "Medium", "value": "M" }),
    )
    .await;
    let color = create(
        app,
        token,
        &format!("/api/{}/colors", store_id),
        json!({ "name": "Black", "value": "#000000" }),
    )
    .await;

    Catalog {
        store_id,
        billboard_id,
        category_id: category["id"].as_str().unwrap().to_string(),
        size_id: size["id"].as_str().unwrap().to_string(),
        color_id: color["id"].as_str().unwrap().to_string(),
    }
}

fn product_body(catalog: &Catalog, name: &str, price: f64, featured: bool) -> Value {
    json!({
        "name": name,
        "images": [{ "url": format!("https://img/{}.png", name) }],
        "price": price,
        "categoryId": catalog.category_id,
        "colorId": catalog.color_id,
        "sizeId": catalog.size_id,
        "isFeatured": featured,
        "isArchived": false
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_and_login() {
    let (app, _db) = setup_app().await;
    register(&app, "merchant").await;

    // Same username again
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": "merchant", "password": "another pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "merchant", "password": "correct horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "merchant", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutations_require_token_and_ownership() {
    let (app, _db) = setup_app().await;
    let owner = register(&app, "owner").await;
    let intruder = register(&app, "intruder").await;
    let catalog = create_catalog(&app, &owner).await;

    let uri = format!("/api/{}/colors", catalog.store_id);
    let body = json!({ "name": "Red", "value": "#ff0000" });

    let (status, _) = send(&app, "POST", &uri, None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", &uri, Some("garbage"), Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", &uri, Some(&intruder), Some(body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        "/api/no-such-store/colors",
        Some(&owner),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The intruder sees only their own stores
    let (status, stores) = send(&app, "GET", "/api/stores", Some(&intruder), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stores.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_color_crud() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    let base = format!("/api/{}/colors", catalog.store_id);

    // Validation runs server-side too
    let (status, body) = send(
        &app,
        "POST",
        &base,
        Some(&token),
        Some(json!({ "name": "Red", "value": "ff0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "value");
    assert_eq!(body["fields"][0]["message"], "String must be a valid hexcode");

    let red = create(
        &app,
        &token,
        &base,
        json!({ "name": "Red", "value": "#ff0000" }),
    )
    .await;
    let red_id = red["id"].as_str().unwrap();
    assert_eq!(red["storeId"], catalog.store_id.as_str());

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("{}/{}", base, red_id),
        Some(&token),
        Some(json!({ "name": "Crimson", "value": "#dc143c" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Crimson");
    assert_eq!(updated["value"], "#dc143c");

    let (status, listed) = send(&app, "GET", &base, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Crimson", "Black"]);

    let (status, deleted) = send(
        &app,
        "DELETE",
        &format!("{}/{}", base, red_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], red_id);

    let (status, _) = send(&app, "GET", &format!("{}/{}", base, red_id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_in_use_is_a_conflict() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;

    create(
        &app,
        &token,
        &format!("/api/{}/products", catalog.store_id),
        product_body(&catalog, "tee", 25.0, false),
    )
    .await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/{}/colors/{}", catalog.store_id, catalog.color_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/{}/billboards/{}", catalog.store_id, catalog.billboard_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Still there
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/{}/colors/{}", catalog.store_id, catalog.color_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_restricted_deletes_are_conflicts_in_repositories() {
    let (app, db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    create(
        &app,
        &token,
        &format!("/api/{}/products", catalog.store_id),
        product_body(&catalog, "tee", 25.0, false),
    )
    .await;

    let state = AppState::new(db);
    let store_id = catalog.store_id.as_str();

    let err = state
        .size_repo
        .delete(store_id, &catalog.size_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

    let err = state
        .category_repo
        .delete(store_id, &catalog.category_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);

    let err = state
        .billboard_repo
        .delete(store_id, &catalog.billboard_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_ordered_product_cannot_be_deleted() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    let base = format!("/api/{}/products", catalog.store_id);

    let tee = create(&app, &token, &base, product_body(&catalog, "tee", 25.0, false)).await;
    let tee_id = tee["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/{}/checkout", catalog.store_id),
        None,
        Some(json!({ "productIds": [tee_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("{}/{}", base, tee_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "GET", &format!("{}/{}", base, tee_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_concurrent_payments_settle_once() {
    let (app, db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    let tee = create(
        &app,
        &token,
        &format!("/api/{}/products", catalog.store_id),
        product_body(&catalog, "tee", 25.0, false),
    )
    .await;

    let order = order_service::checkout(
        &db,
        &catalog.store_id,
        CheckoutRequest {
            product_ids: vec![tee["id"].as_str().unwrap().to_string()],
        },
    )
    .await
    .expect("Checkout failed");

    let pay = |phone: &str| PaymentDetails {
        phone: phone.to_string(),
        address: "1 Main St".to_string(),
    };
    let (first, second) = tokio::join!(
        order_service::mark_paid(&db, &catalog.store_id, &order.order.id, pay("555-0001")),
        order_service::mark_paid(&db, &catalog.store_id, &order.order.id, pay("555-0002")),
    );

    let outcomes = [first, second];
    let paid: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(paid.len(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(DomainError::Conflict(_))))
    );

    let stored = order_service::get_order(&db, &catalog.store_id, &order.order.id)
        .await
        .unwrap();
    assert!(stored.order.is_paid);
    assert_eq!(stored.order.phone, paid[0].order.phone);
}

#[tokio::test]
async fn test_product_listing_filters() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    let base = format!("/api/{}/products", catalog.store_id);

    create(&app, &token, &base, product_body(&catalog, "plain", 20.0, false)).await;
    let featured = create(&app, &token, &base, product_body(&catalog, "star", 30.0, true)).await;
    assert_eq!(featured["images"].as_array().unwrap().len(), 1);
    assert_eq!(featured["color"]["value"], "#000000");

    let mut archived = product_body(&catalog, "gone", 10.0, true);
    archived["isArchived"] = json!(true);
    create(&app, &token, &base, archived).await;

    let (_, all) = send(&app, "GET", &base, None, None).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["star", "plain"]);

    let (_, only_featured) = send(&app, "GET", &format!("{}?isFeatured=true", base), None, None).await;
    assert_eq!(only_featured.as_array().unwrap().len(), 1);
    assert_eq!(only_featured[0]["name"], "star");

    // false and empty values do not narrow
    let (_, not_narrowed) = send(
        &app,
        "GET",
        &format!("{}?isFeatured=false&colorId=", base),
        None,
        None,
    )
    .await;
    assert_eq!(not_narrowed.as_array().unwrap().len(), 2);

    let (_, by_category) = send(
        &app,
        "GET",
        &format!("{}?categoryId={}", base, catalog.category_id),
        None,
        None,
    )
    .await;
    assert_eq!(by_category.as_array().unwrap().len(), 2);

    let (_, other_size) = send(&app, "GET", &format!("{}?sizeId=nope", base), None, None).await;
    assert_eq!(other_size.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_product_references_must_belong_to_store() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let first = create_catalog(&app, &token).await;
    let second = create_catalog(&app, &token).await;

    // Color from another store
    let mut body = product_body(&first, "tee", 25.0, false);
    body["colorId"] = json!(second.color_id);

    let (status, err) = send(
        &app,
        "POST",
        &format!("/api/{}/products", first.store_id),
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["fields"][0]["field"], "colorId");
}

#[tokio::test]
async fn test_product_update_replaces_images() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    let base = format!("/api/{}/products", catalog.store_id);

    let product = create(&app, &token, &base, product_body(&catalog, "tee", 25.0, false)).await;
    let id = product["id"].as_str().unwrap();

    let mut body = product_body(&catalog, "tee v2", 27.5, true);
    body["images"] = json!([{ "url": "https://img/a.png" }, { "url": "https://img/b.png" }]);

    let (status, updated) = send(&app, "PATCH", &format!("{}/{}", base, id), Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "tee v2");
    assert_eq!(updated["price"], 27.5);
    let urls: Vec<&str> = updated["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["url"].as_str().unwrap())
        .collect();
    assert_eq!(urls.len(), 2);
    assert!(urls.contains(&"https://img/a.png"));
    assert!(urls.contains(&"https://img/b.png"));
}

#[tokio::test]
async fn test_billboard_view_is_newest_first_and_formatted() {
    let (app, db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let store = create(&app, &token, "/api/stores", json!({ "name": "Shop" })).await;
    let store_id = store["id"].as_str().unwrap();

    for (id, label, created_at) in [
        ("b-old", "Spring", "2023-03-01T12:00:00.000000Z"),
        ("b-new", "Summer", "2023-04-02T12:00:00.000000Z"),
    ] {
        storedesk::models::billboard::ActiveModel {
            id: Set(id.to_string()),
            store_id: Set(store_id.to_string()),
            label: Set(label.to_string()),
            image_url: Set("https://img/x.png".to_string()),
            created_at: Set(created_at.to_string()),
            updated_at: Set(created_at.to_string()),
        }
        .insert(&db)
        .await
        .expect("Insert failed");
    }

    let (status, rows) = send(
        &app,
        "GET",
        &format!("/api/{}/views/billboards", store_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rows,
        json!([
            { "id": "b-new", "label": "Summer", "createdAt": "April 2nd, 2023" },
            { "id": "b-old", "label": "Spring", "createdAt": "March 1st, 2023" }
        ])
    );

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/{}/views/unknown", store_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_payment_and_overview() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;
    let base = format!("/api/{}/products", catalog.store_id);

    let tee = create(&app, &token, &base, product_body(&catalog, "Tee", 25.0, false)).await;
    let cap = create(&app, &token, &base, product_body(&catalog, "Cap", 1000.0, false)).await;

    // Unknown product
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/{}/checkout", catalog.store_id),
        None,
        Some(json!({ "productIds": ["missing"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, order) = send(
        &app,
        "POST",
        &format!("/api/{}/checkout", catalog.store_id),
        None,
        Some(json!({ "productIds": [tee["id"], cap["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", order);
    assert_eq!(order["isPaid"], false);
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    let order_id = order["id"].as_str().unwrap();

    let (status, paid) = send(
        &app,
        "POST",
        &format!("/api/{}/orders/{}/pay", catalog.store_id, order_id),
        Some(&token),
        Some(json!({ "phone": "555-0100", "address": "1 Main St" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["isPaid"], true);
    assert_eq!(paid["phone"], "555-0100");

    // Paying twice is refused
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/{}/orders/{}/pay", catalog.store_id, order_id),
        Some(&token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Sold products are archived and gone from the storefront
    let (_, listed) = send(&app, "GET", &base, None, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);

    let (status, overview) = send(
        &app,
        "GET",
        &format!("/api/{}/overview", catalog.store_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["totalRevenue"], 1025.0);
    assert_eq!(overview["salesCount"], 1);
    assert_eq!(overview["stockCount"], 0);
    assert_eq!(overview["graphRevenue"].as_array().unwrap().len(), 12);

    let (status, rows) = send(
        &app,
        "GET",
        &format!("/api/{}/views/orders", catalog.store_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let row = &rows[0];
    assert_eq!(row["phoneno"], "555-0100");
    assert_eq!(row["address"], "1 Main St");
    assert_eq!(row["isPaid"], true);
    assert_eq!(row["totalPrice"], "$1,025.00");
    let products = row["products"].as_str().unwrap();
    assert!(products == "Tee, Cap" || products == "Cap, Tee");
}

#[tokio::test]
async fn test_csv_export() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;

    let req = Request::builder()
        .uri(format!("/api/{}/views/colors.csv", catalog.store_id))
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Name,Color,Date"));
    assert!(lines.next().unwrap().starts_with("Black,#000000,"));
}

#[tokio::test]
async fn test_store_delete_cascades() {
    let (app, _db) = setup_app().await;
    let token = register(&app, "merchant").await;
    let catalog = create_catalog(&app, &token).await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/stores/{}", catalog.store_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, colors) = send(
        &app,
        "GET",
        &format!("/api/{}/colors", catalog.store_id),
        None,
        None,
    )
    .await;
    assert_eq!(colors.as_array().unwrap().len(), 0);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/stores/{}", catalog.store_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_footer_markup() {
    let (app, _db) = setup_app().await;
    let req = Request::builder()
        .uri("/api/storefront/footer")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("All rights reserved."));
}
