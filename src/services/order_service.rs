use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::orders::OrderListResponse,
    error::{AppError, AppResult},
    models::Order,
};

/// Orders are joined through the internal user id, not the supabase_id the
/// caller knows, so the user is resolved first.
pub async fn list_orders_for_user(
    pool: &DbPool,
    supabase_id: &str,
) -> AppResult<OrderListResponse> {
    let user: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE supabase_id = $1")
        .bind(supabase_id)
        .fetch_optional(pool)
        .await?;

    let (user_id,) = match user {
        Some(row) => row,
        None => return Err(AppError::NotFound("User not found")),
    };

    let orders: Vec<Order> = sqlx::query_as(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY order_date DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(OrderListResponse {
        success: true,
        orders,
    })
}
