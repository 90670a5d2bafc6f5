use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::users::{SyncUserRequest, UpdateUserRequest, UserResponse},
    error::{AppError, AppResult},
    models::User,
};

/// Empty strings count as "not provided" for the optional profile fields.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Upsert keyed on supabase_id. Email is overwritten unconditionally; name
/// and profile picture only when provided. A single statement, so concurrent
/// syncs for the same identity resolve to last write wins with no
/// read-modify-write window.
pub async fn sync_user(pool: &DbPool, payload: SyncUserRequest) -> AppResult<UserResponse> {
    let now = Utc::now();
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, supabase_id, email, name, profile_picture, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (supabase_id) DO UPDATE
        SET email = EXCLUDED.email,
            name = COALESCE(EXCLUDED.name, users.name),
            profile_picture = COALESCE(EXCLUDED.profile_picture, users.profile_picture),
            updated_at = EXCLUDED.updated_at
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.supabase_id)
    .bind(payload.email)
    .bind(non_empty(payload.name))
    .bind(non_empty(payload.profile_picture))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(UserResponse {
        success: true,
        user,
    })
}

pub async fn get_user(pool: &DbPool, supabase_id: &str) -> AppResult<UserResponse> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE supabase_id = $1")
        .bind(supabase_id)
        .fetch_optional(pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::NotFound("User not found")),
    };

    Ok(UserResponse {
        success: true,
        user,
    })
}

/// Partial update: name and phone are skipped when absent or empty, addresses
/// when absent (an empty list is a legitimate overwrite). updated_at is
/// refreshed on every hit, even when no field changed.
pub async fn update_user(
    pool: &DbPool,
    supabase_id: &str,
    payload: UpdateUserRequest,
) -> AppResult<UserResponse> {
    let user: Option<User> = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            addresses = COALESCE($4, addresses),
            updated_at = $5
        WHERE supabase_id = $1
        RETURNING *
        "#,
    )
    .bind(supabase_id)
    .bind(non_empty(payload.name))
    .bind(non_empty(payload.phone))
    .bind(payload.addresses.map(Json))
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::NotFound("User not found")),
    };

    Ok(UserResponse {
        success: true,
        user,
    })
}
