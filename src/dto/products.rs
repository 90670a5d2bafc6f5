use serde::Deserialize;
use utoipa::ToSchema;

/// Full product payload, persisted verbatim. Every field is optional: the
/// endpoint does no validation beyond type coercion at deserialization.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Legacy numeric catalog number.
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discounted_price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub size: Option<Vec<String>>,
}
