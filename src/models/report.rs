// src/models/report.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::work_order::WorkOrder;

/// Resumo de faturamento de um intervalo de datas.
/// As médias viram `null` quando não há dados no intervalo (nunca NaN).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub count: i64,
    #[schema(example = "600.00")]
    pub revenue: Decimal,
    #[schema(example = "200.00")]
    pub average_revenue: Option<Decimal>,
    /// OSes abertas por dia corrido do intervalo.
    pub average_attendances: Decimal,
    /// Média, em dias, entre abertura e finalização (só OSes finalizadas).
    pub average_time_to_complete: Option<f64>,
}

/// Um dia do intervalo com as OSes abertas nele.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub day: NaiveDate,
    pub work_orders: Vec<WorkOrder>,
    pub count: i64,
}

/// Projeção linear ingênua de faturamento: extrapola a taxa diária do período
/// retroativo sobre a janela futura, com bandas de ±10%. Não é um modelo
/// estatístico.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// OSes abertas no período retroativo.
    pub count: i64,
    #[schema(example = "16200.00")]
    pub low_forecast: Decimal,
    #[schema(example = "18000.00")]
    pub average_forecast: Decimal,
    #[schema(example = "19800.00")]
    pub high_forecast: Decimal,
}
