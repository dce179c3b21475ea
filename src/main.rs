//src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let client_routes = Router::new()
        .route("/"
               ,post(handlers::client::post_client)
               .get(handlers::client::get_clients)
        )
        .route("/{id}"
               ,get(handlers::client::get_client_by_id)
               .patch(handlers::client::patch_client)
               .delete(handlers::client::delete_client)
        );

    let device_routes = Router::new()
        .route("/"
               ,post(handlers::device::post_device)
               .get(handlers::device::get_devices)
        )
        .route("/import"
               ,post(handlers::device::import_devices)
        )
        .route("/{id}"
               ,get(handlers::device::get_device_by_id)
               .patch(handlers::device::patch_device)
               .delete(handlers::device::delete_device)
        );

    let service_routes = Router::new()
        .route("/"
               ,post(handlers::service::post_service)
               .get(handlers::service::get_services)
        )
        .route("/top"
               ,get(handlers::service::get_top_services)
        )
        .route("/{id}"
               ,get(handlers::service::get_service_by_id)
               .patch(handlers::service::patch_service)
               .delete(handlers::service::delete_service)
        );

    let task_routes = Router::new()
        .route("/"
               ,post(handlers::task::post_task)
               .get(handlers::task::get_tasks)
        )
        .route("/{id}"
               ,get(handlers::task::get_task_by_id)
               .patch(handlers::task::patch_task)
               .delete(handlers::task::delete_task)
        );

    let work_order_routes = Router::new()
        .route("/"
               ,post(handlers::work_order::post_work_order)
               .get(handlers::work_order::get_work_orders)
        )
        .route("/today"
               ,get(handlers::work_order::get_work_orders_today)
        )
        .route("/report"
               ,get(handlers::report::get_report)
        )
        .route("/report/by-day"
               ,get(handlers::report::get_report_by_day)
        )
        .route("/forecast"
               ,get(handlers::report::get_forecast)
        )
        .route("/{id}"
               ,get(handlers::work_order::get_work_order_by_id)
               .patch(handlers::work_order::patch_work_order)
               .delete(handlers::work_order::delete_work_order)
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/clients", client_routes)
        .nest("/api/devices", device_routes)
        .nest("/api/services", service_routes)
        .nest("/api/tasks", task_routes)
        .nest("/api/work-orders", work_order_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
