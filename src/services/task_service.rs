// src/services/task_service.rs

use std::collections::HashMap;

use sqlx::{Acquire, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ServiceRepository, TaskRepository, WorkOrderRepository},
    models::{catalog::Service, task::Task},
    services::{costing, mutation_plan::TaskPatch},
};

#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    work_orders: WorkOrderRepository,
    catalog: ServiceRepository,
}

impl TaskService {
    pub fn new(
        repo: TaskRepository,
        work_orders: WorkOrderRepository,
        catalog: ServiceRepository,
    ) -> Self {
        Self {
            repo,
            work_orders,
            catalog,
        }
    }

    pub async fn list(
        &self,
        work_order_id: Option<Uuid>,
        device_id: Option<i32>,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<Task>, AppError> {
        self.repo.find_all(work_order_id, device_id, take, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Task, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tarefa com id {id} não encontrada.")))
    }

    /// Cria a tarefa com seus vínculos e recalcula o total da OS, tudo na
    /// mesma transação. Os custos da tarefa são as somas brutas dos serviços
    /// anexados (minutos e material, sem conversão de hora).
    pub async fn create<'e, A>(
        &self,
        conn: A,
        work_order_id: Uuid,
        device_id: i32,
        description: Option<String>,
        service_ids: Vec<i32>,
    ) -> Result<Task, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let mut unique_ids = service_ids.clone();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let catalog = self.catalog.find_by_ids(&mut *tx, &unique_ids).await?;
        let by_id: HashMap<i32, Service> = catalog.into_iter().map(|s| (s.id, s)).collect();
        for id in &unique_ids {
            if !by_id.contains_key(id) {
                return Err(AppError::NotFound(format!("Serviço com id {id} não encontrado.")));
            }
        }

        let attached: Vec<Service> = service_ids.iter().map(|id| by_id[id].clone()).collect();
        let (time_cost, material_cost) = costing::task_costs(&attached);

        let task = self
            .repo
            .insert(
                &mut *tx,
                work_order_id,
                device_id,
                description.as_deref(),
                time_cost,
                material_cost,
            )
            .await?;

        for service_id in &service_ids {
            self.repo.link_service(&mut *tx, task.id, *service_id).await?;
        }

        self.work_orders.recompute_total(&mut tx, work_order_id).await?;

        tx.commit().await?;
        Ok(task)
    }

    pub async fn patch<'e, A>(&self, conn: A, patch: TaskPatch) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;
        self.repo.update(&mut *tx, &patch).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Apaga vínculos e tarefa (filhos antes do pai) e recalcula o total da
    /// OS dona, em uma transação só.
    pub async fn delete<'e, A>(&self, conn: A, id: i32) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let task = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tarefa com id {id} não encontrada.")))?;

        let mut tx = conn.begin().await?;

        self.repo.delete_links(&mut *tx, id).await?;
        self.repo.delete(&mut *tx, id).await?;
        self.work_orders.recompute_total(&mut tx, task.work_order_id).await?;

        tx.commit().await?;
        Ok(())
    }
}
