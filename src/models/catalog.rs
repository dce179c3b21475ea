// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Entrada do catálogo de serviços da oficina.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    #[schema(example = "Troca de bateria")]
    pub description: String,
    /// Tempo estimado em minutos. NULL é tratado como zero nos cálculos.
    #[schema(example = "45.0")]
    pub estimated_time_cost: Option<Decimal>,
    /// Custo estimado de material, em reais.
    #[schema(example = "80.00")]
    pub estimated_material_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Linha do ranking de serviços mais aplicados em um modelo de aparelho.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopServiceEntry {
    pub id: i32,
    pub description: String,
    pub times_used: i64,
}
