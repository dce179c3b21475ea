// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    #[schema(example = "Maria")]
    pub first_name: String,
    #[schema(example = "da Silva")]
    pub last_name: String,
    /// Nome completo materializado (first_name + last_name).
    pub name: String,
    #[schema(example = "12345678900")]
    pub cpf: String,
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    pub cellphone: Option<String>,
    pub telephone: Option<String>,
    pub created_at: DateTime<Utc>,
}
