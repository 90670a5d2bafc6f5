use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    db::DbPool,
    dto::orders::OrderListResponse,
    dto::users::{UpdateUserRequest, UserResponse},
    error::AppResult,
    services::{order_service, user_service},
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/{supabase_id}", get(get_user))
        .route("/{supabase_id}", put(update_user))
        .route("/{supabase_id}/orders", get(list_user_orders))
}

#[utoipa::path(
    get,
    path = "/api/users/{supabase_id}",
    params(
        ("supabase_id" = String, Path, description = "Identity-provider-issued user id")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(pool): State<DbPool>,
    Path(supabase_id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let resp = user_service::get_user(&pool, &supabase_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/users/{supabase_id}",
    params(
        ("supabase_id" = String, Path, description = "Identity-provider-issued user id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(pool): State<DbPool>,
    Path(supabase_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let resp = user_service::update_user(&pool, &supabase_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{supabase_id}/orders",
    params(
        ("supabase_id" = String, Path, description = "Identity-provider-issued user id")
    ),
    responses(
        (status = 200, description = "Orders for the user, most recent first", body = OrderListResponse),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn list_user_orders(
    State(pool): State<DbPool>,
    Path(supabase_id): Path<String>,
) -> AppResult<Json<OrderListResponse>> {
    let resp = order_service::list_orders_for_user(&pool, &supabase_id).await?;
    Ok(Json(resp))
}
