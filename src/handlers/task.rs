// src/handlers/task.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::work_order::ServiceRef,
    models::task::Task,
    services::mutation_plan::TaskPatch,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    pub work_order_id: Option<Uuid>,
    pub device_id: Option<i32>,
    pub take: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub work_order_id: Uuid,
    #[schema(example = 1)]
    pub device_id: i32,
    #[schema(example = "Limpeza interna")]
    pub description: Option<String>,
    pub services: Option<Vec<ServiceRef>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchTaskPayload {
    pub description: Option<String>,
    pub device_id: Option<i32>,
    /// Trocar os serviços de uma tarefa existente não é suportado: apague e
    /// recrie a tarefa.
    pub services: Option<Vec<ServiceRef>>,
}

// GET /api/tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    params(TasksQuery),
    responses(
        (status = 200, description = "Lista de tarefas", body = Vec<Task>)
    )
)]
pub async fn get_tasks(
    State(app_state): State<AppState>,
    Query(params): Query<TasksQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state
        .task_service
        .list(params.work_order_id, params.device_id, params.take, params.page)
        .await?;

    Ok((StatusCode::OK, Json(tasks)))
}

// GET /api/tasks/{id}
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn get_task_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state.task_service.get(id).await?;

    Ok((StatusCode::OK, Json(task)))
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = Task),
        (status = 404, description = "OS, aparelho ou serviço inexistente")
    )
)]
pub async fn post_task(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service_ids: Vec<i32> = payload
        .services
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.id)
        .collect();

    let task = app_state
        .task_service
        .create(
            &app_state.db_pool,
            payload.work_order_id,
            payload.device_id,
            payload.description,
            service_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

// PATCH /api/tasks/{id}
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "ID da tarefa")),
    request_body = PatchTaskPayload,
    responses(
        (status = 200, description = "Tarefa atualizada"),
        (status = 400, description = "Dados inválidos ou troca de serviços solicitada"),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn patch_task(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PatchTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.services.is_some() {
        return Err(AppError::UnsupportedOperation);
    }

    app_state
        .task_service
        .patch(
            &app_state.db_pool,
            TaskPatch {
                id,
                description: payload.description,
                device_id: payload.device_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(json!({ "id": id }))))
}

// DELETE /api/tasks/{id}
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "ID da tarefa")),
    responses(
        (status = 200, description = "Tarefa e vínculos removidos"),
        (status = 404, description = "Tarefa não encontrada")
    )
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_service.delete(&app_state.db_pool, id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Tarefa removida com sucesso." }))))
}
