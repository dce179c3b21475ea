// src/db/work_order_repo.rs

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        catalog::Service,
        task::Task,
        work_order::{WorkOrder, WorkOrderDetail},
    },
    services::{
        costing,
        mutation_plan::{MutationOp, MutationPlan},
    },
};

/// Resultado da aplicação de um plano: os ids gerados pelos INSERTs.
#[derive(Debug, Default)]
pub struct PlanOutcome {
    pub work_order_id: Option<Uuid>,
    pub task_ids: Vec<i32>,
}

/// Violação de FK vira NotFound: o id referenciado (cliente, aparelho ou
/// serviço) não existe. Qualquer outro erro segue como DatabaseError.
pub(crate) fn map_reference_error(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::NotFound(message.to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

#[derive(Clone)]
pub struct WorkOrderRepository {
    pool: PgPool,
}

impl WorkOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn find_all(
        &self,
        client_id: Option<Uuid>,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<WorkOrder>, AppError> {
        let take = take.unwrap_or(50);
        let offset = page.map(|p| (p.max(1) - 1) * take).unwrap_or(0);

        let orders = sqlx::query_as::<_, WorkOrder>(
            r#"
            SELECT * FROM work_orders
            WHERE ($1::uuid IS NULL OR client_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(client_id)
        .bind(take)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// OSes abertas hoje (dia corrente do banco), mais recentes primeiro.
    pub async fn find_today(
        &self,
        client_id: Option<Uuid>,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<WorkOrder>, AppError> {
        let take = take.unwrap_or(50);
        let offset = page.map(|p| (p.max(1) - 1) * take).unwrap_or(0);

        let orders = sqlx::query_as::<_, WorkOrder>(
            r#"
            SELECT * FROM work_orders
            WHERE ($1::uuid IS NULL OR client_id = $1)
              AND created_at::date = CURRENT_DATE
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(client_id)
        .bind(take)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkOrder>, AppError> {
        let order = sqlx::query_as::<_, WorkOrder>("SELECT * FROM work_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Cabeçalho + nome do cliente + tarefas.
    pub async fn find_detail(&self, id: Uuid) -> Result<Option<WorkOrderDetail>, AppError> {
        let Some(header) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let client_name =
            sqlx::query_scalar::<_, String>("SELECT name FROM clients WHERE id = $1")
                .bind(header.client_id)
                .fetch_optional(&self.pool)
                .await?;

        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE work_order_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let status_description = header.status.description().to_string();

        Ok(Some(WorkOrderDetail {
            header,
            client_name,
            status_description,
            tasks,
        }))
    }

    // =========================================================================
    //  AGREGADOR DE TOTAL
    // =========================================================================

    /// Recalcula e grava o total da OS: carrega a expansão tarefa →
    /// vínculo → serviço e acumula material + (minutos / 60) * taxa hora
    /// via `costing`. Um serviço aplicado em duas tarefas conta duas vezes.
    ///
    /// O UPDATE confere linhas afetadas; OS inexistente vira NotFound em vez
    /// de no-op silencioso. Roda sempre dentro da transação da mutação que
    /// invalidou o total.
    pub async fn recompute_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        work_order_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let applied_services = sqlx::query_as::<_, Service>(
            r#"
            SELECT s.*
            FROM task_services ts
            JOIN tasks t ON ts.task_id = t.id
            JOIN services s ON ts.service_id = s.id
            WHERE t.work_order_id = $1
            "#,
        )
        .bind(work_order_id)
        .fetch_all(&mut **tx)
        .await?;

        let total = costing::billing_total(&applied_services);

        let result = sqlx::query("UPDATE work_orders SET total_cost = $2 WHERE id = $1")
            .bind(work_order_id)
            .bind(total)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "OS com id {work_order_id} não encontrada."
            )));
        }

        Ok(total)
    }

    // =========================================================================
    //  EXECUTOR DO PLANO DE MUTAÇÃO
    // =========================================================================

    /// Aplica as operações do plano, em ordem, dentro da transação recebida.
    /// Qualquer erro interrompe a aplicação e o chamador descarta a transação
    /// (rollback implícito no drop): nenhum grafo parcial é persistido.
    ///
    /// UPDATEs e DELETEs da OS conferem linhas afetadas e devolvem NotFound
    /// tipado em vez de confiar em checagem prévia.
    pub async fn apply_plan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        plan: &MutationPlan,
    ) -> Result<PlanOutcome, AppError> {
        let mut outcome = PlanOutcome::default();

        for op in plan.ops() {
            match op {
                MutationOp::InsertWorkOrder {
                    id,
                    client_id,
                    obs,
                    status,
                } => {
                    sqlx::query(
                        r#"
                        INSERT INTO work_orders (id, client_id, obs, status)
                        VALUES ($1, $2, $3, $4)
                        "#,
                    )
                    .bind(id)
                    .bind(client_id)
                    .bind(obs)
                    .bind(status)
                    .execute(&mut **tx)
                    .await
                    .map_err(|e| {
                        map_reference_error(e, &format!("Cliente com id {client_id} não encontrado."))
                    })?;

                    outcome.work_order_id = Some(*id);
                }

                MutationOp::InsertTask {
                    task_index,
                    work_order_id,
                    device_id,
                    description,
                    time_cost,
                    material_cost,
                } => {
                    if *task_index != outcome.task_ids.len() {
                        return Err(anyhow::anyhow!(
                            "plano inconsistente: tarefa de índice {task_index} fora de ordem"
                        )
                        .into());
                    }

                    let task_id = sqlx::query_scalar::<_, i32>(
                        r#"
                        INSERT INTO tasks (work_order_id, device_id, description, time_cost, material_cost)
                        VALUES ($1, $2, $3, $4, $5)
                        RETURNING id
                        "#,
                    )
                    .bind(work_order_id)
                    .bind(device_id)
                    .bind(description)
                    .bind(time_cost)
                    .bind(material_cost)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| {
                        map_reference_error(e, &format!("Aparelho com id {device_id} não encontrado."))
                    })?;

                    outcome.task_ids.push(task_id);
                }

                MutationOp::LinkTaskService {
                    task_index,
                    service_id,
                } => {
                    let task_id = *outcome.task_ids.get(*task_index).ok_or_else(|| {
                        anyhow::anyhow!(
                            "plano inconsistente: vínculo referencia tarefa {task_index} não inserida"
                        )
                    })?;

                    sqlx::query("INSERT INTO task_services (task_id, service_id) VALUES ($1, $2)")
                        .bind(task_id)
                        .bind(service_id)
                        .execute(&mut **tx)
                        .await
                        .map_err(|e| {
                            map_reference_error(
                                e,
                                &format!("Serviço com id {service_id} não encontrado."),
                            )
                        })?;
                }

                MutationOp::UpdateWorkOrder { id, patch } => {
                    let result = sqlx::query(
                        r#"
                        UPDATE work_orders
                        SET client_id = COALESCE($2, client_id),
                            obs = COALESCE($3, obs),
                            status = COALESCE($4, status),
                            start_date = COALESCE($5, start_date),
                            finished_at = COALESCE($6, finished_at)
                        WHERE id = $1
                        "#,
                    )
                    .bind(id)
                    .bind(patch.client_id)
                    .bind(patch.obs.as_deref())
                    .bind(patch.status)
                    .bind(patch.start_date)
                    .bind(patch.finished_at)
                    .execute(&mut **tx)
                    .await
                    .map_err(|e| {
                        map_reference_error(
                            e,
                            &format!("Cliente informado no patch da OS {id} não encontrado."),
                        )
                    })?;

                    if result.rows_affected() == 0 {
                        return Err(AppError::NotFound(format!("OS com id {id} não encontrada.")));
                    }
                }

                MutationOp::UpdateTask { patch } => {
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
                    .execute(&mut **tx)
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
                }

                MutationOp::DeleteTaskServicesOfWorkOrder { work_order_id } => {
                    sqlx::query(
                        r#"
                        DELETE FROM task_services
                        WHERE task_id IN (SELECT id FROM tasks WHERE work_order_id = $1)
                        "#,
                    )
                    .bind(work_order_id)
                    .execute(&mut **tx)
                    .await?;
                }

                MutationOp::DeleteTasksOfWorkOrder { work_order_id } => {
                    sqlx::query("DELETE FROM tasks WHERE work_order_id = $1")
                        .bind(work_order_id)
                        .execute(&mut **tx)
                        .await?;
                }

                MutationOp::DeleteWorkOrder { id } => {
                    let result = sqlx::query("DELETE FROM work_orders WHERE id = $1")
                        .bind(id)
                        .execute(&mut **tx)
                        .await?;

                    if result.rows_affected() == 0 {
                        return Err(AppError::NotFound(format!("OS com id {id} não encontrada.")));
                    }
                }
            }
        }

        Ok(outcome)
    }
}
