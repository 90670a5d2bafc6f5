use axum::{Json, extract::State};
use chrono::{TimeZone, Utc};
use sqlx::types::Json as DbJson;
use uuid::Uuid;

use storefront_api::{
    db::{DbPool, create_pool},
    dto::products::CreateProductRequest,
    dto::users::{SyncUserRequest, UpdateUserRequest},
    error::AppError,
    models::{Address, OrderLineItem, OrderStatus, PaymentStatus},
    routes::products::{create_product, list_products},
    services::{order_service, user_service},
};

// Integration flow: catalog round trip, identity sync, partial profile
// update, and order history sorting, end to end against a real database.
#[tokio::test]
async fn catalog_sync_and_order_history_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let pool = setup_pool(&database_url).await?;

    // --- Product catalog: create then list contains the document ---
    let created = create_product(
        State(pool.clone()),
        Json(CreateProductRequest {
            id: Some(42),
            name: Some("Linen Shirt".into()),
            description: Some("Breathable summer shirt".into()),
            price: Some(49.99),
            discounted_price: Some(39.99),
            image: Some("/images/42.jpg".into()),
            category: Some("shirts".into()),
            size: Some(vec!["S".into(), "M".into()]),
        }),
    )
    .await?
    .0;

    let listed = list_products(State(pool.clone())).await?.0;
    let found = listed
        .iter()
        .find(|p| p.id == created.id)
        .expect("created product should appear in the listing");
    assert_eq!(found.catalog_id, Some(42));
    assert_eq!(found.name.as_deref(), Some("Linen Shirt"));
    assert_eq!(found.size, vec!["S".to_string(), "M".to_string()]);

    // --- Identity sync: create, then idempotent re-sync ---
    let first = user_service::sync_user(
        &pool,
        SyncUserRequest {
            supabase_id: "sb-flow-1".into(),
            email: "flow@example.com".into(),
            name: Some("Flow User".into()),
            profile_picture: None,
        },
    )
    .await?;
    assert!(first.success);
    assert_eq!(first.user.email, "flow@example.com");

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let second = user_service::sync_user(
        &pool,
        SyncUserRequest {
            supabase_id: "sb-flow-1".into(),
            email: "flow@example.com".into(),
            name: Some("Flow User".into()),
            profile_picture: None,
        },
    )
    .await?;
    assert_eq!(second.user.id, first.user.id);
    assert_eq!(second.user.supabase_id, first.user.supabase_id);
    assert_eq!(second.user.email, first.user.email);
    assert!(second.user.updated_at > first.user.updated_at);
    assert_eq!(second.user.created_at, first.user.created_at);

    // Empty name on re-sync must not clear the stored one.
    let third = user_service::sync_user(
        &pool,
        SyncUserRequest {
            supabase_id: "sb-flow-1".into(),
            email: "flow2@example.com".into(),
            name: Some(String::new()),
            profile_picture: None,
        },
    )
    .await?;
    assert_eq!(third.user.email, "flow2@example.com");
    assert_eq!(third.user.name.as_deref(), Some("Flow User"));

    // --- Lookup after sync ---
    let fetched = user_service::get_user(&pool, "sb-flow-1").await?;
    assert!(fetched.success);
    assert_eq!(fetched.user.email, "flow2@example.com");

    // --- Partial update: phone only, name and addresses untouched ---
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let updated = user_service::update_user(
        &pool,
        "sb-flow-1",
        UpdateUserRequest {
            name: None,
            phone: Some("555-0100".into()),
            addresses: None,
        },
    )
    .await?;
    assert_eq!(updated.user.phone.as_deref(), Some("555-0100"));
    assert_eq!(updated.user.name.as_deref(), Some("Flow User"));
    assert!(updated.user.addresses.0.is_empty());
    assert!(updated.user.updated_at > third.user.updated_at);

    // --- Falsy-skip asymmetry: empty-string phone is ignored, but an empty
    // addresses list is a legitimate overwrite and clears the stored one ---
    let with_address = user_service::update_user(
        &pool,
        "sb-flow-1",
        UpdateUserRequest {
            name: None,
            phone: None,
            addresses: Some(vec![Address {
                name: Some("Flow User".into()),
                street: Some("1 Main St".into()),
                city: Some("Springfield".into()),
                state: Some("IL".into()),
                zip: Some("62701".into()),
                is_default: true,
            }]),
        },
    )
    .await?;
    assert_eq!(with_address.user.addresses.0.len(), 1);
    assert_eq!(
        with_address.user.addresses.0[0].street.as_deref(),
        Some("1 Main St")
    );

    let cleared = user_service::update_user(
        &pool,
        "sb-flow-1",
        UpdateUserRequest {
            name: None,
            phone: Some(String::new()),
            addresses: Some(vec![]),
        },
    )
    .await?;
    assert!(cleared.user.addresses.0.is_empty());
    assert_eq!(cleared.user.phone.as_deref(), Some("555-0100"));

    // --- Order history: strictly orderDate descending ---
    let user_id = updated.user.id;
    let dates = [
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
    ];
    for (n, date) in dates.iter().enumerate() {
        insert_order(&pool, user_id, &format!("ORD-{n:04}"), created.id, *date).await?;
    }

    let history = order_service::list_orders_for_user(&pool, "sb-flow-1").await?;
    assert!(history.success);
    let months: Vec<u32> = history
        .orders
        .iter()
        .map(|o| chrono::Datelike::month(&o.order_date))
        .collect();
    assert_eq!(months, vec![3, 2, 1]);
    assert_eq!(history.orders[0].status, OrderStatus::Pending);
    assert_eq!(history.orders[0].payment_status, PaymentStatus::Pending);

    // --- Not found paths never throw, they signal ---
    let missing_user = user_service::get_user(&pool, "sb-missing").await;
    assert!(matches!(missing_user, Err(AppError::NotFound(_))));

    let missing_orders = order_service::list_orders_for_user(&pool, "sb-missing").await;
    assert!(matches!(missing_orders, Err(AppError::NotFound(_))));

    Ok(())
}

async fn setup_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs
    sqlx::query("TRUNCATE TABLE orders, users, products CASCADE")
        .execute(&pool)
        .await?;

    Ok(pool)
}

async fn insert_order(
    pool: &DbPool,
    user_id: Uuid,
    order_id: &str,
    product_id: Uuid,
    order_date: chrono::DateTime<Utc>,
) -> anyhow::Result<()> {
    let items = vec![OrderLineItem {
        product_id,
        quantity: 1,
        price: 49.99,
        size: Some("M".into()),
        weight: None,
    }];

    sqlx::query(
        r#"
        INSERT INTO orders (id, order_id, user_id, items, total_amount, order_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(order_id)
    .bind(user_id)
    .bind(DbJson(items))
    .bind(49.99)
    .bind(order_date)
    .execute(pool)
    .await?;

    Ok(())
}
