use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}
