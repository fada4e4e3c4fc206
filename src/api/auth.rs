use crate::auth::{create_jwt, hash_password, verify_password};
use crate::domain::DomainError;
use crate::models::user::{self, Entity as User};
use crate::utils::time::now_timestamp;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse, DomainError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(DomainError::invalid("username", "Username is required"));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::invalid(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    let password_hash = hash_password(&payload.password).map_err(DomainError::Internal)?;
    let now = now_timestamp();

    let user = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        username: Set(username),
        password_hash: Set(password_hash),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;

    tracing::info!("Registered user {}", user.username);

    let token = create_jwt(&user.id, &user.username).map_err(DomainError::Internal)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": user })),
    ))
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse, DomainError> {
    tracing::info!("Login attempt for user: {}", payload.username);

    let user = match User::find()
        .filter(user::Column::Username.eq(payload.username.trim()))
        .one(&db)
        .await?
    {
        Some(u) => u,
        None => {
            tracing::warn!("User not found: {}", payload.username);
            return Err(DomainError::Unauthorized);
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {
            let token = create_jwt(&user.id, &user.username).map_err(DomainError::Internal)?;
            Ok((StatusCode::OK, Json(json!({ "token": token }))))
        }
        _ => {
            tracing::warn!("Password verification failed for user: {}", user.username);
            Err(DomainError::Unauthorized)
        }
    }
}
