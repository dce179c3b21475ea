// src/services/work_order_service.rs

use std::collections::HashMap;
use std::time::Duration;

use sqlx::{Acquire, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ServiceRepository, WorkOrderRepository},
    models::{
        catalog::Service,
        work_order::{WorkOrder, WorkOrderDetail},
    },
    services::{
        costing,
        mutation_plan::{MutationPlan, PlannedTask, TaskPatch, WorkOrderPatch},
    },
};

/// Tempo máximo de uma transação de escrita. Estourando, o cliente recebe
/// um erro retryável em vez de uma conexão pendurada.
const TX_TIMEOUT: Duration = Duration::from_secs(15);

/// Tarefa recebida no POST de OS, já validada pelo handler.
#[derive(Debug, Clone)]
pub struct NewTaskInput {
    pub device_id: i32,
    pub description: Option<String>,
    pub service_ids: Vec<i32>,
}

#[derive(Clone)]
pub struct WorkOrderService {
    repo: WorkOrderRepository,
    catalog: ServiceRepository,
}

impl WorkOrderService {
    pub fn new(repo: WorkOrderRepository, catalog: ServiceRepository) -> Self {
        Self { repo, catalog }
    }

    // --- CONSULTAS ---

    pub async fn list(
        &self,
        client_id: Option<Uuid>,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<WorkOrder>, AppError> {
        self.repo.find_all(client_id, take, page).await
    }

    pub async fn list_today(
        &self,
        client_id: Option<Uuid>,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<WorkOrder>, AppError> {
        self.repo.find_today(client_id, take, page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<WorkOrderDetail, AppError> {
        self.repo
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("OS com id {id} não encontrada.")))
    }

    // --- ESCRITAS (plano + transação única) ---

    /// Cria a OS com suas tarefas e vínculos em uma transação só, e agrega o
    /// total derivado antes do commit. Qualquer id inexistente (cliente,
    /// aparelho, serviço) aborta tudo: nenhum grafo parcial fica no banco.
    pub async fn create<'e, A>(
        &self,
        conn: A,
        client_id: Uuid,
        obs: Option<String>,
        tasks: Vec<NewTaskInput>,
    ) -> Result<Uuid, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        tokio::time::timeout(TX_TIMEOUT, self.create_inner(conn, client_id, obs, tasks))
            .await
            .map_err(|_| AppError::TransactionTimeout)?
    }

    async fn create_inner<'e, A>(
        &self,
        conn: A,
        client_id: Uuid,
        obs: Option<String>,
        tasks: Vec<NewTaskInput>,
    ) -> Result<Uuid, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        // Busca o catálogo uma vez só e computa os custos de cada tarefa
        // (somas brutas; a conversão de hora fica para o agregador).
        let mut service_ids: Vec<i32> = tasks
            .iter()
            .flat_map(|t| t.service_ids.iter().copied())
            .collect();
        service_ids.sort_unstable();
        service_ids.dedup();

        let catalog = self.catalog.find_by_ids(&mut *tx, &service_ids).await?;
        let by_id: HashMap<i32, Service> = catalog.into_iter().map(|s| (s.id, s)).collect();
        for id in &service_ids {
            if !by_id.contains_key(id) {
                return Err(AppError::NotFound(format!("Serviço com id {id} não encontrado.")));
            }
        }

        let planned: Vec<PlannedTask> = tasks
            .into_iter()
            .map(|task| {
                let services: Vec<Service> = task
                    .service_ids
                    .iter()
                    .map(|id| by_id[id].clone())
                    .collect();
                let (time_cost, material_cost) = costing::task_costs(&services);
                PlannedTask {
                    device_id: task.device_id,
                    description: task.description,
                    time_cost: Some(time_cost),
                    material_cost: Some(material_cost),
                    service_ids: task.service_ids,
                }
            })
            .collect();

        let id = Uuid::new_v4();
        let plan = MutationPlan::create_work_order(id, client_id, obs, planned);
        let outcome = self.repo.apply_plan(&mut tx, &plan).await?;
        let created_id = outcome
            .work_order_id
            .ok_or_else(|| anyhow::anyhow!("plano de criação não inseriu a OS"))?;

        // agrega o total derivado ainda dentro da transação
        self.repo.recompute_total(&mut tx, created_id).await?;

        tx.commit().await?;
        Ok(created_id)
    }

    pub async fn patch<'e, A>(
        &self,
        conn: A,
        id: Uuid,
        patch: WorkOrderPatch,
        task_patches: Vec<TaskPatch>,
    ) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        tokio::time::timeout(TX_TIMEOUT, self.patch_inner(conn, id, patch, task_patches))
            .await
            .map_err(|_| AppError::TransactionTimeout)?
    }

    async fn patch_inner<'e, A>(
        &self,
        conn: A,
        id: Uuid,
        patch: WorkOrderPatch,
        task_patches: Vec<TaskPatch>,
    ) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let plan = MutationPlan::patch_work_order(id, patch, task_patches);
        self.repo.apply_plan(&mut tx, &plan).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Exclusão em cascata: vínculos → tarefas → OS, tudo ou nada.
    pub async fn delete<'e, A>(&self, conn: A, id: Uuid) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        tokio::time::timeout(TX_TIMEOUT, self.delete_inner(conn, id))
            .await
            .map_err(|_| AppError::TransactionTimeout)?
    }

    async fn delete_inner<'e, A>(&self, conn: A, id: Uuid) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let plan = MutationPlan::delete_work_order(id);
        self.repo.apply_plan(&mut tx, &plan).await?;

        tx.commit().await?;
        Ok(())
    }
}
