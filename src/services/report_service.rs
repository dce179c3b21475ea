// src/services/report_service.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::{
        report::{DayGroup, Forecast, ReportSummary},
        work_order::WorkOrder,
    },
};

/// Janela retroativa padrão da projeção, em dias.
const DEFAULT_LOOKBACK_DAYS: i64 = 30;
/// Janela futura padrão da projeção, em dias.
const DEFAULT_LOOKFORWARD_DAYS: i64 = 180;

#[derive(Clone)]
pub struct ReportService {
    repo: ReportRepository,
}

impl ReportService {
    pub fn new(repo: ReportRepository) -> Self {
        Self { repo }
    }

    /// Resumo de faturamento do intervalo `[start, end]` (dias inclusivos).
    pub async fn report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        client_id: Option<Uuid>,
    ) -> Result<ReportSummary, AppError> {
        if end < start {
            return Err(AppError::InvalidDateRange);
        }

        let orders = self
            .repo
            .find_in_window(day_start(start), day_start(end) + Duration::days(1), client_id)
            .await?;

        Ok(summarize(&orders, start, end))
    }

    /// As OSes do intervalo agrupadas pelo dia de abertura, dia mais recente
    /// primeiro.
    pub async fn report_by_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        client_id: Option<Uuid>,
    ) -> Result<Vec<DayGroup>, AppError> {
        if end < start {
            return Err(AppError::InvalidDateRange);
        }

        let orders = self
            .repo
            .find_in_window(day_start(start), day_start(end) + Duration::days(1), client_id)
            .await?;

        Ok(group_by_day(orders))
    }

    /// Projeção linear de faturamento. Sem parâmetros, olha 30 dias para trás
    /// e projeta 180 para frente.
    pub async fn forecast(
        &self,
        lookback_start: Option<DateTime<Utc>>,
        lookforward_end: Option<DateTime<Utc>>,
    ) -> Result<Forecast, AppError> {
        let now = Utc::now();
        let lookback_start = lookback_start.unwrap_or(now - Duration::days(DEFAULT_LOOKBACK_DAYS));
        let lookforward_end =
            lookforward_end.unwrap_or(now + Duration::days(DEFAULT_LOOKFORWARD_DAYS));

        if lookback_start >= now || lookforward_end <= now {
            return Err(AppError::InvalidDateRange);
        }

        let orders = self.repo.find_in_window(lookback_start, now, None).await?;
        let revenue: Decimal = orders.iter().map(|o| o.total_cost).sum();

        let lookback_days = (now - lookback_start).num_days().max(1);
        let forward_days = (lookforward_end - now).num_days();

        Ok(forecast_linear(
            revenue,
            orders.len() as i64,
            lookback_days,
            forward_days,
        ))
    }
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Resumo sobre as OSes já filtradas pela janela. Médias sem dados viram
/// `None` (`null` no JSON) em vez de NaN.
pub fn summarize(orders: &[WorkOrder], start: NaiveDate, end: NaiveDate) -> ReportSummary {
    let count = orders.len() as i64;
    let revenue: Decimal = orders.iter().map(|o| o.total_cost).sum();

    let average_revenue = (count > 0).then(|| revenue / Decimal::from(count));

    // dias corridos do intervalo, inclusivo nas duas pontas
    let days_in_interval = (end - start).num_days() + 1;
    let average_attendances = Decimal::from(count) / Decimal::from(days_in_interval);

    let completion_days: Vec<f64> = orders
        .iter()
        .filter_map(|o| {
            o.finished_at
                .map(|finished| (finished - o.created_at).num_seconds() as f64 / 86_400.0)
        })
        .collect();
    let average_time_to_complete = (!completion_days.is_empty())
        .then(|| completion_days.iter().sum::<f64>() / completion_days.len() as f64);

    ReportSummary {
        count,
        revenue,
        average_revenue,
        average_attendances,
        average_time_to_complete,
    }
}

/// Agrupa pelo dia de abertura. Espera a entrada já ordenada por
/// `created_at` decrescente (como o repositório devolve); os grupos saem na
/// mesma ordem, preservando as OSes de cada dia.
pub fn group_by_day(orders: Vec<WorkOrder>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for order in orders {
        let day = order.created_at.date_naive();
        match groups.last_mut() {
            Some(group) if group.day == day => {
                group.work_orders.push(order);
                group.count += 1;
            }
            _ => groups.push(DayGroup {
                day,
                work_orders: vec![order],
                count: 1,
            }),
        }
    }

    groups
}

/// Extrapolação linear: taxa diária do período retroativo aplicada à janela
/// futura, com bandas de ±10%.
pub fn forecast_linear(
    revenue: Decimal,
    count: i64,
    lookback_days: i64,
    forward_days: i64,
) -> Forecast {
    let lookback_days = lookback_days.max(1);
    let daily_rate = revenue / Decimal::from(lookback_days);
    let average_forecast = daily_rate * Decimal::from(forward_days);
    let band = average_forecast / Decimal::from(10);

    Forecast {
        count,
        low_forecast: average_forecast - band,
        average_forecast,
        high_forecast: average_forecast + band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::work_order::WorkOrderStatus;
    use chrono::TimeZone;

    fn order(total: i64, created: DateTime<Utc>, finished: Option<DateTime<Utc>>) -> WorkOrder {
        WorkOrder {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            obs: None,
            status: WorkOrderStatus::Aprovacao,
            total_cost: Decimal::from(total),
            created_at: created,
            start_date: None,
            finished_at: finished,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn resumo_soma_e_tira_medias() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let orders = vec![
            order(100, at(2024, 1, 1, 9), None),
            order(200, at(2024, 1, 2, 9), None),
            order(300, at(2024, 1, 3, 9), None),
        ];

        let summary = summarize(&orders, start, end);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.revenue, Decimal::from(600));
        assert_eq!(summary.average_revenue, Some(Decimal::from(200)));
        // 3 OSes em 3 dias corridos
        assert_eq!(summary.average_attendances, Decimal::from(1));
        assert_eq!(summary.average_time_to_complete, None);
    }

    #[test]
    fn resumo_sem_dados_devolve_null_em_vez_de_nan() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        let summary = summarize(&[], start, end);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.average_revenue, None);
        assert_eq!(summary.average_attendances, Decimal::ZERO);
        assert_eq!(summary.average_time_to_complete, None);
    }

    #[test]
    fn resumo_tempo_medio_considera_so_finalizadas() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let orders = vec![
            // finalizada em exatamente 2 dias
            order(100, at(2024, 1, 1, 8), Some(at(2024, 1, 3, 8))),
            // ainda aberta
            order(200, at(2024, 1, 1, 10), None),
        ];

        let summary = summarize(&orders, start, end);
        assert_eq!(summary.average_time_to_complete, Some(2.0));
    }

    #[test]
    fn agrupamento_por_dia_preserva_ordem_e_contagens() {
        // entrada na ordem do repositório: created_at decrescente
        let orders = vec![
            order(50, at(2024, 1, 2, 15), None),
            order(30, at(2024, 1, 1, 16), None),
            order(20, at(2024, 1, 1, 9), None),
        ];

        let groups = group_by_day(orders);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(groups[0].count, 1);
        assert_eq!(groups[1].day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(groups[1].count, 2);
        assert_eq!(groups[1].work_orders.len(), 2);
    }

    #[test]
    fn projecao_escala_a_taxa_diaria() {
        // 3000 em 30 dias → 100/dia → 18000 em 180 dias, bandas de ±10%
        let forecast = forecast_linear(Decimal::from(3000), 25, 30, 180);
        assert_eq!(forecast.count, 25);
        assert_eq!(forecast.average_forecast, Decimal::from(18000));
        assert_eq!(forecast.low_forecast, Decimal::from(16200));
        assert_eq!(forecast.high_forecast, Decimal::from(19800));
    }

    #[test]
    fn projecao_sem_faturamento_zera_as_bandas() {
        let forecast = forecast_linear(Decimal::ZERO, 0, 30, 180);
        assert_eq!(forecast.average_forecast, Decimal::ZERO);
        assert_eq!(forecast.low_forecast, Decimal::ZERO);
        assert_eq!(forecast.high_forecast, Decimal::ZERO);
    }
}
