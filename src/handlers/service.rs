// src/handlers/service.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{Service, TopServiceEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ServicesQuery {
    pub take: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TopServicesQuery {
    pub device_id: i32,
    pub take: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Troca de bateria")]
    pub description: String,
    /// Minutos estimados de mão de obra.
    #[schema(example = "45.0")]
    pub estimated_time_cost: Option<Decimal>,
    #[schema(example = "80.00")]
    pub estimated_material_cost: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchServicePayload {
    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,
    pub estimated_time_cost: Option<Decimal>,
    pub estimated_material_cost: Option<Decimal>,
}

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Services",
    params(ServicesQuery),
    responses(
        (status = 200, description = "Catálogo de serviços", body = Vec<Service>)
    )
)]
pub async fn get_services(
    State(app_state): State<AppState>,
    Query(params): Query<ServicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state.catalog_service.list(params.take, params.page).await?;

    Ok((StatusCode::OK, Json(services)))
}

// GET /api/services/top
#[utoipa::path(
    get,
    path = "/api/services/top",
    tag = "Services",
    params(TopServicesQuery),
    responses(
        (status = 200, description = "Serviços mais aplicados no aparelho", body = Vec<TopServiceEntry>)
    )
)]
pub async fn get_top_services(
    State(app_state): State<AppState>,
    Query(params): Query<TopServicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .catalog_service
        .top_by_device(params.device_id, params.take)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço", body = Service),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn get_service_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state.catalog_service.get(id).await?;

    Ok((StatusCode::OK, Json(service)))
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Services",
    request_body = CreateServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = Service),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn post_service(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .create(
            &payload.description,
            payload.estimated_time_cost,
            payload.estimated_material_cost,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// PATCH /api/services/{id}
#[utoipa::path(
    patch,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "ID do serviço")),
    request_body = PatchServicePayload,
    responses(
        (status = 200, description = "Serviço atualizado", body = Service),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn patch_service(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PatchServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .patch(
            id,
            payload.description.as_deref(),
            payload.estimated_time_cost,
            payload.estimated_material_cost,
        )
        .await?;

    Ok((StatusCode::OK, Json(service)))
}

// DELETE /api/services/{id}
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = i32, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço removido"),
        (status = 404, description = "Serviço não encontrado")
    )
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Serviço removido com sucesso." }))))
}
