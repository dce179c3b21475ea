// src/handlers/device.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::device::Device,
    services::device_service::NewDeviceInput,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DevicesQuery {
    pub take: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDevicePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Samsung")]
    pub brand: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Galaxy S21")]
    pub model: String,

    pub photo_url: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchDevicePayload {
    #[validate(length(min = 1, message = "required"))]
    pub brand: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    pub model: Option<String>,
    pub photo_url: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
}

impl From<CreateDevicePayload> for NewDeviceInput {
    fn from(payload: CreateDevicePayload) -> Self {
        Self {
            brand: payload.brand,
            model: payload.model,
            photo_url: payload.photo_url,
            sku: payload.sku,
            description: payload.description,
        }
    }
}

// GET /api/devices
#[utoipa::path(
    get,
    path = "/api/devices",
    tag = "Devices",
    params(DevicesQuery),
    responses(
        (status = 200, description = "Lista de aparelhos", body = Vec<Device>)
    )
)]
pub async fn get_devices(
    State(app_state): State<AppState>,
    Query(params): Query<DevicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let devices = app_state.device_service.list(params.take, params.page).await?;

    Ok((StatusCode::OK, Json(devices)))
}

// GET /api/devices/{id}
#[utoipa::path(
    get,
    path = "/api/devices/{id}",
    tag = "Devices",
    params(("id" = i32, Path, description = "ID do aparelho")),
    responses(
        (status = 200, description = "Aparelho", body = Device),
        (status = 404, description = "Aparelho não encontrado")
    )
)]
pub async fn get_device_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let device = app_state.device_service.get(id).await?;

    Ok((StatusCode::OK, Json(device)))
}

// POST /api/devices
#[utoipa::path(
    post,
    path = "/api/devices",
    tag = "Devices",
    request_body = CreateDevicePayload,
    responses(
        (status = 201, description = "Aparelho criado", body = Device),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn post_device(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDevicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let device = app_state
        .device_service
        .create(&app_state.db_pool, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(device)))
}

// POST /api/devices/import
#[utoipa::path(
    post,
    path = "/api/devices/import",
    tag = "Devices",
    request_body = Vec<CreateDevicePayload>,
    responses(
        (status = 201, description = "Lote de aparelhos importado"),
        (status = 400, description = "Algum registro do lote é inválido")
    )
)]
pub async fn import_devices(
    State(app_state): State<AppState>,
    Json(payloads): Json<Vec<CreateDevicePayload>>,
) -> Result<impl IntoResponse, AppError> {
    for payload in &payloads {
        payload.validate()?;
    }

    let inputs: Vec<NewDeviceInput> = payloads.into_iter().map(Into::into).collect();
    let count = app_state
        .device_service
        .import(&app_state.db_pool, inputs)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "count": count }))))
}

// PATCH /api/devices/{id}
#[utoipa::path(
    patch,
    path = "/api/devices/{id}",
    tag = "Devices",
    params(("id" = i32, Path, description = "ID do aparelho")),
    request_body = PatchDevicePayload,
    responses(
        (status = 200, description = "Aparelho atualizado", body = Device),
        (status = 404, description = "Aparelho não encontrado")
    )
)]
pub async fn patch_device(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PatchDevicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let device = app_state
        .device_service
        .patch(
            id,
            payload.brand.as_deref(),
            payload.model.as_deref(),
            payload.photo_url.as_deref(),
            payload.sku.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(device)))
}

// DELETE /api/devices/{id}
#[utoipa::path(
    delete,
    path = "/api/devices/{id}",
    tag = "Devices",
    params(("id" = i32, Path, description = "ID do aparelho")),
    responses(
        (status = 200, description = "Aparelho removido"),
        (status = 404, description = "Aparelho não encontrado")
    )
)]
pub async fn delete_device(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.device_service.delete(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Aparelho removido com sucesso." }))))
}
