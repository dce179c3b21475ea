// src/models/device.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i32,
    #[schema(example = "Samsung")]
    pub brand: String,
    #[schema(example = "Galaxy S21")]
    pub model: String,
    pub photo_url: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
