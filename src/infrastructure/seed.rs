use sea_orm::*;

use crate::domain::DomainError;
use crate::domain::validation::{
    BillboardInput, CategoryInput, ColorInput, ImageInput, ProductInput, SizeInput, StoreInput,
};
use crate::infrastructure::AppState;
use crate::infrastructure::auth::hash_password;
use crate::models::user;
use crate::utils::time::now_timestamp;

pub const DEMO_USERNAME: &str = "merchant";

/// Insert a demo merchant with one populated store. No-op when the merchant exists.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    let db = state.db();

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(DEMO_USERNAME))
        .one(db)
        .await?;
    if existing.is_some() {
        tracing::info!("Demo merchant already present, skipping seed");
        return Ok(());
    }

    let password_hash = hash_password(DEMO_USERNAME).map_err(DomainError::Internal)?;
    let now = now_timestamp();
    let merchant = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        username: Set(DEMO_USERNAME.to_owned()),
        password_hash: Set(password_hash),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    let store = state
        .store_repo
        .create(
            &merchant.id,
            StoreInput {
                name: "ALL GOOD's".to_owned(),
            },
        )
        .await?;

    let billboard = state
        .billboard_repo
        .create(
            &store.id,
            BillboardInput {
                label: "Explore the summer collection".to_owned(),
                image_url: "https://images.example.com/billboards/summer.jpg".to_owned(),
            },
        )
        .await?;

    let category = state
        .category_repo
        .create(
            &store.id,
            CategoryInput {
                name: "Shirts".to_owned(),
                billboard_id: billboard.id,
            },
        )
        .await?;

    let size = state
        .size_repo
        .create(
            &store.id,
            SizeInput {
                name: "Medium".to_owned(),
                value: "M".to_owned(),
            },
        )
        .await?;

    let mut colors = Vec::new();
    for (name, value) in [("Black", "#000000"), ("White", "#ffffff")] {
        let color = state
            .color_repo
            .create(
                &store.id,
                ColorInput {
                    name: name.to_owned(),
                    value: value.to_owned(),
                },
            )
            .await?;
        colors.push(color);
    }

    for (i, color) in colors.iter().enumerate() {
        state
            .product_repo
            .create(
                &store.id,
                ProductInput {
                    name: format!("{} tee", color.name),
                    images: vec![ImageInput {
                        url: format!("https://images.example.com/products/tee-{}.jpg", i),
                    }],
                    price: 25.0 + i as f64 * 5.0,
                    category_id: category.id.clone(),
                    color_id: color.id.clone(),
                    size_id: size.id.clone(),
                    is_featured: i == 0,
                    is_archived: false,
                },
            )
            .await?;
    }

    tracing::info!("Seeded demo store {} for '{}'", store.id, DEMO_USERNAME);
    Ok(())
}
