use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::OrderListResponse,
        products::CreateProductRequest,
        users::{SyncUserRequest, UpdateUserRequest, UserResponse},
    },
    models::{Address, Order, OrderLineItem, OrderStatus, PaymentStatus, Product, ShippingAddress, User},
    routes::{auth, health, products, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        auth::sync_user,
        users::get_user,
        users::update_user,
        users::list_user_orders,
    ),
    components(
        schemas(
            Product,
            User,
            Address,
            Order,
            OrderLineItem,
            ShippingAddress,
            OrderStatus,
            PaymentStatus,
            CreateProductRequest,
            SyncUserRequest,
            UpdateUserRequest,
            UserResponse,
            OrderListResponse,
            health::HealthData,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Auth", description = "Supabase identity sync"),
        (name = "Users", description = "User profile and order history endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
