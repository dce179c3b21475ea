// src/db/task_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::work_order_repo::map_reference_error,
    models::task::{Task, TaskService},
    services::mutation_plan::TaskPatch,
};

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        work_order_id: Uuid,
        device_id: i32,
        description: Option<&str>,
        time_cost: Decimal,
        material_cost: Decimal,
    ) -> Result<Task, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (work_order_id, device_id, description, time_cost, material_cost)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(work_order_id)
        .bind(device_id)
        .bind(description)
        .bind(time_cost)
        .bind(material_cost)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_reference_error(
                e,
                &format!("OS {work_order_id} ou aparelho {device_id} não encontrado."),
            )
        })?;

        Ok(task)
    }

    pub async fn link_service<'e, E>(
        &self,
        executor: E,
        task_id: i32,
        service_id: i32,
    ) -> Result<TaskService, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let link = sqlx::query_as::<_, TaskService>(
            "INSERT INTO task_services (task_id, service_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(task_id)
        .bind(service_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            map_reference_error(e, &format!("Serviço com id {service_id} não encontrado."))
        })?;

        Ok(link)
    }

    pub async fn find_all(
        &self,
        work_order_id: Option<Uuid>,
        device_id: Option<i32>,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<Task>, AppError> {
        let take = take.unwrap_or(50);
        let offset = page.map(|p| (p.max(1) - 1) * take).unwrap_or(0);

        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE ($1::uuid IS NULL OR work_order_id = $1)
              AND ($2::int IS NULL OR device_id = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(work_order_id)
        .bind(device_id)
        .bind(take)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    pub async fn update<'e, E>(&self, executor: E, patch: &TaskPatch) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET description = COALESCE($2, description),
                device_id = COALESCE($3, device_id)
            WHERE id = $1
            "#,
        )
        .bind(patch.id)
        .bind(patch.description.as_deref())
        .bind(patch.device_id)
        .execute(executor)
        .await
        .map_err(|e| {
            map_reference_error(
                e,
                &format!("Aparelho informado no patch da tarefa {} não encontrado.", patch.id),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Tarefa com id {} não encontrada.",
                patch.id
            )));
        }

        Ok(())
    }

    pub async fn delete_links<'e, E>(&self, executor: E, task_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM task_services WHERE task_id = $1")
            .bind(task_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, task_id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tarefa com id {task_id} não encontrada.")));
        }

        Ok(())
    }
}
