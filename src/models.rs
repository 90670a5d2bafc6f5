use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Wire shape note: the storage-assigned key serializes as `_id` and all
/// field names are camelCase, matching what existing clients already parse.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Legacy numeric catalog number carried in the payload; not a key.
    #[serde(rename = "id")]
    pub catalog_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discounted_price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub size: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub supabase_id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    #[schema(value_type = Vec<Address>)]
    pub addresses: Json<Vec<Address>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Same shape as `Address` minus the default flag, embedded in orders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: f64,
    pub size: Option<String>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub order_id: String,
    /// References `users.id`, the internal key, not the supabaseId.
    pub user_id: Uuid,
    #[schema(value_type = Vec<OrderLineItem>)]
    pub items: Json<Vec<OrderLineItem>>,
    pub total_amount: f64,
    pub discount_amount: f64,
    #[schema(value_type = Option<ShippingAddress>)]
    pub shipping_address: Option<Json<ShippingAddress>>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub order_date: DateTime<Utc>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}
