// src/db/report_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::work_order::WorkOrder};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// OSes abertas na janela `[start, end_exclusive)`, opcionalmente de um
    /// único cliente, mais recentes primeiro. O motor de relatório computa
    /// tudo em memória sobre essas linhas.
    pub async fn find_in_window(
        &self,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
        client_id: Option<Uuid>,
    ) -> Result<Vec<WorkOrder>, AppError> {
        let orders = sqlx::query_as::<_, WorkOrder>(
            r#"
            SELECT * FROM work_orders
            WHERE created_at >= $1
              AND created_at < $2
              AND ($3::uuid IS NULL OR client_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(start)
        .bind(end_exclusive)
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}
