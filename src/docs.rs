// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clients ---
        handlers::client::get_clients,
        handlers::client::get_client_by_id,
        handlers::client::post_client,
        handlers::client::patch_client,
        handlers::client::delete_client,

        // --- Devices ---
        handlers::device::get_devices,
        handlers::device::get_device_by_id,
        handlers::device::post_device,
        handlers::device::import_devices,
        handlers::device::patch_device,
        handlers::device::delete_device,

        // --- Services ---
        handlers::service::get_services,
        handlers::service::get_top_services,
        handlers::service::get_service_by_id,
        handlers::service::post_service,
        handlers::service::patch_service,
        handlers::service::delete_service,

        // --- Tasks ---
        handlers::task::get_tasks,
        handlers::task::get_task_by_id,
        handlers::task::post_task,
        handlers::task::patch_task,
        handlers::task::delete_task,

        // --- WorkOrders ---
        handlers::work_order::get_work_orders,
        handlers::work_order::get_work_orders_today,
        handlers::work_order::get_work_order_by_id,
        handlers::work_order::post_work_order,
        handlers::work_order::patch_work_order,
        handlers::work_order::delete_work_order,

        // --- Reports ---
        handlers::report::get_report,
        handlers::report::get_report_by_day,
        handlers::report::get_forecast,
    ),
    components(
        schemas(
            models::client::Client,
            models::device::Device,
            models::catalog::Service,
            models::catalog::TopServiceEntry,
            models::task::Task,
            models::work_order::WorkOrder,
            models::work_order::WorkOrderDetail,
            models::work_order::WorkOrderStatus,
            models::report::ReportSummary,
            models::report::DayGroup,
            models::report::Forecast,

            handlers::client::CreateClientPayload,
            handlers::client::PatchClientPayload,
            handlers::device::CreateDevicePayload,
            handlers::device::PatchDevicePayload,
            handlers::service::CreateServicePayload,
            handlers::service::PatchServicePayload,
            handlers::task::CreateTaskPayload,
            handlers::task::PatchTaskPayload,
            handlers::work_order::CreateWorkOrderPayload,
            handlers::work_order::PatchWorkOrderPayload,
            handlers::work_order::TaskInsertPayload,
            handlers::work_order::TaskPatchPayload,
            handlers::work_order::ServiceRef,
            handlers::work_order::StatusRef,
        )
    ),
    tags(
        (name = "Clients", description = "Cadastro de clientes"),
        (name = "Devices", description = "Cadastro de aparelhos"),
        (name = "Services", description = "Catálogo de serviços"),
        (name = "Tasks", description = "Tarefas de reparo"),
        (name = "WorkOrders", description = "Ordens de serviço"),
        (name = "Reports", description = "Relatórios e projeção de faturamento"),
    )
)]
pub struct ApiDoc;
