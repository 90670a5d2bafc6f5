use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::products::CreateProductRequest,
    error::AppResult,
    models::Product,
};

pub fn router() -> Router<DbPool> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products, unfiltered and unpaginated", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(pool): State<DbPool>) -> AppResult<Json<Vec<Product>>> {
    // Storage-native order: no ORDER BY, no LIMIT.
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products")
        .fetch_all(&pool)
        .await?;

    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Persisted product including the generated key", body = Product)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(pool): State<DbPool>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (id, catalog_id, name, description, price, discounted_price, image, category, size, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(payload.id)
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.discounted_price)
    .bind(payload.image)
    .bind(payload.category)
    .bind(payload.size.unwrap_or_default())
    .bind(Utc::now())
    .fetch_one(&pool)
    .await?;

    Ok(Json(product))
}
