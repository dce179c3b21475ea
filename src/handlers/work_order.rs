// src/handlers/work_order.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::work_order::{WorkOrder, WorkOrderDetail, WorkOrderStatus},
    services::{
        mutation_plan::{TaskPatch, WorkOrderPatch},
        work_order_service::NewTaskInput,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrdersQuery {
    /// Filtra as OSes de um único cliente.
    pub client_id: Option<Uuid>,
    pub take: Option<i64>,
    pub page: Option<i64>,
}

/// Referência a um serviço do catálogo dentro de uma tarefa.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceRef {
    pub id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskInsertPayload {
    #[schema(example = 1)]
    pub device_id: i32,
    #[schema(example = "Troca de tela")]
    pub description: Option<String>,
    pub services: Vec<ServiceRef>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrderPayload {
    pub client_id: Uuid,
    #[schema(example = "Aparelho não liga")]
    pub obs: Option<String>,
    pub tasks: Option<Vec<TaskInsertPayload>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRef {
    /// 1 = aprovação, 2 = andamento, 3 = finalizado.
    #[schema(example = 2)]
    pub id: i16,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatchPayload {
    pub id: i32,
    pub description: Option<String>,
    pub device_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchWorkOrderPayload {
    pub client_id: Option<Uuid>,
    pub obs: Option<String>,
    pub work_order_status: Option<StatusRef>,
    pub start_date: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub tasks: Option<Vec<TaskPatchPayload>>,
}

// GET /api/work-orders
#[utoipa::path(
    get,
    path = "/api/work-orders",
    tag = "WorkOrders",
    params(WorkOrdersQuery),
    responses(
        (status = 200, description = "Lista de OSes", body = Vec<WorkOrder>)
    )
)]
pub async fn get_work_orders(
    State(app_state): State<AppState>,
    Query(params): Query<WorkOrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .work_order_service
        .list(params.client_id, params.take, params.page)
        .await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/work-orders/today
#[utoipa::path(
    get,
    path = "/api/work-orders/today",
    tag = "WorkOrders",
    params(WorkOrdersQuery),
    responses(
        (status = 200, description = "OSes abertas hoje", body = Vec<WorkOrder>)
    )
)]
pub async fn get_work_orders_today(
    State(app_state): State<AppState>,
    Query(params): Query<WorkOrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .work_order_service
        .list_today(params.client_id, params.take, params.page)
        .await?;

    Ok((StatusCode::OK, Json(json!({
        "count": orders.len(),
        "workOrders": orders,
    }))))
}

// GET /api/work-orders/{id}
#[utoipa::path(
    get,
    path = "/api/work-orders/{id}",
    tag = "WorkOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 200, description = "OS completa", body = WorkOrderDetail),
        (status = 404, description = "OS não encontrada")
    )
)]
pub async fn get_work_order_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.work_order_service.get(id).await?;

    Ok((StatusCode::OK, Json(detail)))
}

// POST /api/work-orders
#[utoipa::path(
    post,
    path = "/api/work-orders",
    tag = "WorkOrders",
    request_body = CreateWorkOrderPayload,
    responses(
        (status = 201, description = "OS criada, devolve o id gerado"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente, aparelho ou serviço inexistente")
    )
)]
pub async fn post_work_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateWorkOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tasks: Vec<NewTaskInput> = payload
        .tasks
        .unwrap_or_default()
        .into_iter()
        .map(|task| NewTaskInput {
            device_id: task.device_id,
            description: task.description,
            service_ids: task.services.into_iter().map(|s| s.id).collect(),
        })
        .collect();

    let id = app_state
        .work_order_service
        .create(&app_state.db_pool, payload.client_id, payload.obs, tasks)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// PATCH /api/work-orders/{id}
#[utoipa::path(
    patch,
    path = "/api/work-orders/{id}",
    tag = "WorkOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    request_body = PatchWorkOrderPayload,
    responses(
        (status = 200, description = "OS atualizada"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "OS ou tarefa não encontrada")
    )
)]
pub async fn patch_work_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchWorkOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // o id numérico do status vem do cliente; qualquer valor fora do enum é 400
    let status = payload
        .work_order_status
        .map(|s| WorkOrderStatus::from_id(s.id).ok_or(AppError::InvalidStatus(s.id)))
        .transpose()?;

    let patch = WorkOrderPatch {
        client_id: payload.client_id,
        obs: payload.obs,
        status,
        start_date: payload.start_date,
        finished_at: payload.finished_at,
    };

    let task_patches: Vec<TaskPatch> = payload
        .tasks
        .unwrap_or_default()
        .into_iter()
        .map(|task| TaskPatch {
            id: task.id,
            description: task.description,
            device_id: task.device_id,
        })
        .collect();

    app_state
        .work_order_service
        .patch(&app_state.db_pool, id, patch, task_patches)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "id": id }))))
}

// DELETE /api/work-orders/{id}
#[utoipa::path(
    delete,
    path = "/api/work-orders/{id}",
    tag = "WorkOrders",
    params(("id" = Uuid, Path, description = "ID da OS")),
    responses(
        (status = 200, description = "OS e dependentes removidos"),
        (status = 404, description = "OS não encontrada")
    )
)]
pub async fn delete_work_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .work_order_service
        .delete(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "message": "OS removida com sucesso." }))))
}
