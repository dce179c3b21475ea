// src/handlers/report.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::report::{DayGroup, Forecast, ReportSummary},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Primeiro dia do intervalo (inclusivo), formato YYYY-MM-DD.
    pub start_date: NaiveDate,
    /// Último dia do intervalo (inclusivo).
    pub end_date: NaiveDate,
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ForecastQuery {
    /// Início do período retroativo; padrão: 30 dias atrás.
    pub lookback_start: Option<DateTime<Utc>>,
    /// Fim da janela projetada; padrão: 180 dias à frente.
    pub lookforward_end: Option<DateTime<Utc>>,
}

// GET /api/work-orders/report
#[utoipa::path(
    get,
    path = "/api/work-orders/report",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Resumo de faturamento do intervalo", body = ReportSummary),
        (status = 400, description = "Intervalo inválido")
    )
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .report_service
        .report(params.start_date, params.end_date, params.client_id)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/work-orders/report/by-day
#[utoipa::path(
    get,
    path = "/api/work-orders/report/by-day",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "OSes do intervalo agrupadas por dia", body = Vec<DayGroup>),
        (status = 400, description = "Intervalo inválido")
    )
)]
pub async fn get_report_by_day(
    State(app_state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let groups = app_state
        .report_service
        .report_by_day(params.start_date, params.end_date, params.client_id)
        .await?;

    Ok((StatusCode::OK, Json(groups)))
}

// GET /api/work-orders/forecast
#[utoipa::path(
    get,
    path = "/api/work-orders/forecast",
    tag = "Reports",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Projeção linear de faturamento", body = Forecast),
        (status = 400, description = "Janela inválida")
    )
)]
pub async fn get_forecast(
    State(app_state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<impl IntoResponse, AppError> {
    let forecast = app_state
        .report_service
        .forecast(params.lookback_start, params.lookforward_end)
        .await?;

    Ok((StatusCode::OK, Json(forecast)))
}
