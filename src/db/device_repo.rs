// src/db/device_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::device::Device};

#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// O insert aceita um executor para participar da transação da importação
    /// em lote.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        brand: &str,
        model: &str,
        photo_url: Option<&str>,
        sku: Option<&str>,
        description: Option<&str>,
    ) -> Result<Device, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let device = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (brand, model, photo_url, sku, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(brand)
        .bind(model)
        .bind(photo_url)
        .bind(sku)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(device)
    }

    pub async fn find_all(
        &self,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<Device>, AppError> {
        let take = take.unwrap_or(50);
        let offset = page.map(|p| (p.max(1) - 1) * take).unwrap_or(0);

        let devices =
            sqlx::query_as::<_, Device>("SELECT * FROM devices ORDER BY id LIMIT $1 OFFSET $2")
                .bind(take)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

        Ok(devices)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Device>, AppError> {
        let device = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(device)
    }

    pub async fn update(
        &self,
        id: i32,
        brand: Option<&str>,
        model: Option<&str>,
        photo_url: Option<&str>,
        sku: Option<&str>,
        description: Option<&str>,
    ) -> Result<Device, AppError> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            UPDATE devices
            SET brand = COALESCE($2, brand),
                model = COALESCE($3, model),
                photo_url = COALESCE($4, photo_url),
                sku = COALESCE($5, sku),
                description = COALESCE($6, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(brand)
        .bind(model)
        .bind(photo_url)
        .bind(sku)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        device.ok_or_else(|| AppError::NotFound(format!("Aparelho com id {id} não encontrado.")))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Aparelho com id {id} não encontrado.")));
        }

        Ok(())
    }
}
