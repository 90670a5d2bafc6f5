use axum::{Json, Router, extract::State, routing::post};

use crate::{
    db::DbPool,
    dto::users::{SyncUserRequest, UserResponse},
    error::AppResult,
    services::user_service,
};

pub fn router() -> Router<DbPool> {
    Router::new().route("/sync-user", post(sync_user))
}

#[utoipa::path(
    post,
    path = "/api/auth/sync-user",
    request_body = SyncUserRequest,
    responses(
        (status = 200, description = "User upserted by supabaseId", body = UserResponse)
    ),
    tag = "Auth"
)]
pub async fn sync_user(
    State(pool): State<DbPool>,
    Json(payload): Json<SyncUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let resp = user_service::sync_user(&pool, payload).await?;
    Ok(Json(resp))
}
