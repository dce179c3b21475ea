// src/handlers/client.rs

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

use crate::{common::error::AppError, config::AppState, models::client::Client};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ClientsQuery {
    pub take: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria")]
    pub first_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "da Silva")]
    pub last_name: String,

    #[validate(length(min = 11, max = 14, message = "invalid_cpf"))]
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    #[schema(example = "11987654321")]
    pub cellphone: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchClientPayload {
    #[validate(length(min = 1, message = "required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub last_name: Option<String>,
    #[validate(length(min = 11, max = 14, message = "invalid_cpf"))]
    pub cpf: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub cellphone: Option<String>,
    pub telephone: Option<String>,
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ClientsQuery),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Client>)
    )
)]
pub async fn get_clients(
    State(app_state): State<AppState>,
    Query(params): Query<ClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list(params.take, params.page).await?;

    Ok((StatusCode::OK, Json(clients)))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_client_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.get(id).await?;

    Ok((StatusCode::OK, Json(client)))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn post_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .create(
            &payload.first_name,
            &payload.last_name,
            &payload.cpf,
            payload.email.as_deref(),
            payload.cellphone.as_deref(),
            payload.telephone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PATCH /api/clients/{id}
#[utoipa::path(
    patch,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = PatchClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn patch_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .client_service
        .patch(
            id,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.cpf.as_deref(),
            payload.email.as_deref(),
            payload.cellphone.as_deref(),
            payload.telephone.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Cliente removido com sucesso." }))))
}
