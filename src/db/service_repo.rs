// src/db/service_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::catalog::{Service, TopServiceEntry},
};

/// Repositório do catálogo de serviços.
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        description: &str,
        estimated_time_cost: Option<Decimal>,
        estimated_material_cost: Option<Decimal>,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (description, estimated_time_cost, estimated_material_cost)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(description)
        .bind(estimated_time_cost)
        .bind(estimated_material_cost)
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn find_all(
        &self,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<Service>, AppError> {
        let take = take.unwrap_or(50);
        let offset = page.map(|p| (p.max(1) - 1) * take).unwrap_or(0);

        let services =
            sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id LIMIT $1 OFFSET $2")
                .bind(take)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

        Ok(services)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    /// Busca um lote de serviços pelo id. Usada pelo cálculo de custos; o
    /// chamador confere se todos os ids pedidos voltaram.
    pub async fn find_by_ids<'e, E>(&self, executor: E, ids: &[i32]) -> Result<Vec<Service>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let services =
            sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(executor)
                .await?;

        Ok(services)
    }

    pub async fn update(
        &self,
        id: i32,
        description: Option<&str>,
        estimated_time_cost: Option<Decimal>,
        estimated_material_cost: Option<Decimal>,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET description = COALESCE($2, description),
                estimated_time_cost = COALESCE($3, estimated_time_cost),
                estimated_material_cost = COALESCE($4, estimated_material_cost)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(estimated_time_cost)
        .bind(estimated_material_cost)
        .fetch_optional(&self.pool)
        .await?;

        service.ok_or_else(|| AppError::NotFound(format!("Serviço com id {id} não encontrado.")))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Serviço com id {id} não encontrado.")));
        }

        Ok(())
    }

    /// Ranking dos serviços mais aplicados em um aparelho (SQL cru de
    /// agregação, top-N).
    pub async fn top_by_device(
        &self,
        device_id: i32,
        take: i64,
    ) -> Result<Vec<TopServiceEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopServiceEntry>(
            r#"
            SELECT
                s.id,
                s.description,
                COUNT(*) as times_used
            FROM task_services ts
            JOIN tasks t ON ts.task_id = t.id
            JOIN services s ON ts.service_id = s.id
            WHERE t.device_id = $1
            GROUP BY s.id, s.description
            ORDER BY times_used DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(take)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
