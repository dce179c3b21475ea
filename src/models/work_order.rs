// src/models/work_order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::task::Task;

// --- Enums ---

/// Situação da OS. No banco é o enum `work_order_status`; na API o cliente
/// envia o id numérico (1 = aprovação, 2 = andamento, 3 = finalizado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "work_order_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Aprovacao,
    Andamento,
    Finalizado,
}

impl WorkOrderStatus {
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Self::Aprovacao),
            2 => Some(Self::Andamento),
            3 => Some(Self::Finalizado),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Aprovacao => "Aguardando aprovação",
            Self::Andamento => "Em andamento",
            Self::Finalizado => "Finalizado",
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: Uuid,
    pub client_id: Uuid,
    #[schema(example = "Aparelho não liga, cliente relata queda")]
    pub obs: Option<String>,
    pub status: WorkOrderStatus,
    /// Total derivado. Ver `services::costing`: material + (minutos / 60) * taxa hora.
    #[schema(example = "150.50")]
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub start_date: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// OS completa: cabeçalho + nome do cliente + tarefas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderDetail {
    pub header: WorkOrder,
    pub client_name: Option<String>,
    #[schema(example = "Em andamento")]
    pub status_description: String,
    pub tasks: Vec<Task>,
}
