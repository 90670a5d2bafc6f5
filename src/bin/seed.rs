use chrono::{Duration, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use storefront_api::{
    config::AppConfig,
    db::create_pool,
    models::{OrderLineItem, ShippingAddress},
};

// There is no order-creation endpoint; orders enter the store out of band.
// This seed is that path for local development.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let product_ids = seed_products(&pool).await?;
    let user_id = ensure_demo_user(&pool, "seed-supabase-id", "demo@example.com").await?;
    seed_orders(&pool, user_id, &product_ids).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<Vec<Uuid>> {
    // Products carry no unique constraint, so re-running would duplicate
    // them; skip when anything is already there.
    let existing: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM products")
        .fetch_all(pool)
        .await?;
    if !existing.is_empty() {
        println!("Products already present, skipping");
        return Ok(existing.into_iter().map(|(id,)| id).collect());
    }

    let products = vec![
        (1_i64, "Linen Shirt", "Breathable summer shirt", 49.99, 39.99, "shirts", vec!["S", "M", "L", "XL"]),
        (2, "Denim Jacket", "Classic fit, stonewashed", 89.99, 89.99, "jackets", vec!["M", "L"]),
        (3, "Wool Beanie", "One size fits most", 19.99, 14.99, "accessories", vec!["OS"]),
        (4, "Canvas Sneakers", "Low-top, rubber sole", 64.99, 49.99, "shoes", vec!["40", "41", "42", "43"]),
    ];

    let mut ids = Vec::new();
    for (catalog_id, name, desc, price, discounted, category, sizes) in products {
        let id = Uuid::new_v4();
        let sizes: Vec<String> = sizes.into_iter().map(String::from).collect();
        sqlx::query(
            r#"
            INSERT INTO products (id, catalog_id, name, description, price, discounted_price, image, category, size)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(catalog_id)
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(discounted)
        .bind(format!("/images/{catalog_id}.jpg"))
        .bind(category)
        .bind(sizes)
        .execute(pool)
        .await?;
        ids.push(id);
    }

    println!("Seeded products");
    Ok(ids)
}

async fn ensure_demo_user(
    pool: &sqlx::PgPool,
    supabase_id: &str,
    email: &str,
) -> anyhow::Result<Uuid> {
    let now = Utc::now();
    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, supabase_id, email, name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        ON CONFLICT (supabase_id) DO UPDATE SET email = EXCLUDED.email
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(supabase_id)
    .bind(email)
    .bind("Demo User")
    .bind(now)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} ({supabase_id})");
    Ok(user_id)
}

async fn seed_orders(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    product_ids: &[Uuid],
) -> anyhow::Result<()> {
    let Some(&product_id) = product_ids.first() else {
        return Ok(());
    };

    let shipping = ShippingAddress {
        name: Some("Demo User".into()),
        street: Some("1 Main St".into()),
        city: Some("Springfield".into()),
        state: Some("IL".into()),
        zip: Some("62701".into()),
    };

    // Spread order dates out so the history endpoint has something to sort.
    for (n, days_ago) in [(1_i64, 30_i64), (2, 14), (3, 2)] {
        let items = vec![OrderLineItem {
            product_id,
            quantity: n as i32,
            price: 49.99,
            size: Some("M".into()),
            weight: Some(0.4),
        }];

        sqlx::query(
            r#"
            INSERT INTO orders (id, order_id, user_id, items, total_amount, discount_amount, shipping_address, payment_method, order_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(format!("SEED-{n:04}"))
        .bind(user_id)
        .bind(Json(items))
        .bind(49.99 * n as f64)
        .bind(0.0)
        .bind(Json(shipping.clone()))
        .bind("card")
        .bind(Utc::now() - Duration::days(days_ago))
        .execute(pool)
        .await?;
    }

    println!("Seeded orders");
    Ok(())
}
