use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Address, User};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncUserRequest {
    pub supabase_id: String,
    pub email: String,
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

/// Partial update. Only name, phone and addresses are ever written, and
/// name/phone only when present and non-empty; an empty string is ignored,
/// so these fields can never be cleared through this endpoint.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub addresses: Option<Vec<Address>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}
