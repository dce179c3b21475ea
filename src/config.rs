// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        ClientRepository, DeviceRepository, ReportRepository, ServiceRepository, TaskRepository,
        WorkOrderRepository,
    },
    services::{
        CatalogService, ClientService, DeviceService, ReportService, TaskService, WorkOrderService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
// A pool é construída uma vez aqui e injetada em cada serviço: nada de
// singleton global de conexão.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub client_service: ClientService,
    pub device_service: DeviceService,
    pub catalog_service: CatalogService,
    pub task_service: TaskService,
    pub work_order_service: WorkOrderService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let client_repo = ClientRepository::new(db_pool.clone());
        let device_repo = DeviceRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let task_repo = TaskRepository::new(db_pool.clone());
        let work_order_repo = WorkOrderRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let client_service = ClientService::new(client_repo);
        let device_service = DeviceService::new(device_repo);
        let catalog_service = CatalogService::new(service_repo.clone());
        let task_service = TaskService::new(
            task_repo,
            work_order_repo.clone(),
            service_repo.clone(),
        );
        let work_order_service = WorkOrderService::new(work_order_repo, service_repo);
        let report_service = ReportService::new(report_repo);

        Ok(Self {
            db_pool,
            client_service,
            device_service,
            catalog_service,
            task_service,
            work_order_service,
            report_service,
        })
    }
}
