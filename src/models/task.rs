// src/models/task.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Uma unidade de reparo dentro de uma OS: um aparelho + os serviços aplicados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub work_order_id: Uuid,
    pub device_id: i32,
    #[schema(example = "Troca de tela")]
    pub description: Option<String>,
    /// Soma bruta dos minutos estimados dos serviços anexados, sem conversão
    /// para valor-hora (a conversão acontece só no total da OS).
    pub time_cost: Option<Decimal>,
    /// Soma bruta do custo de material estimado dos serviços anexados.
    pub material_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Vínculo materializado tarefa ↔ serviço do catálogo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskService {
    pub id: i32,
    pub task_id: i32,
    pub service_id: i32,
}
