// src/services/costing.rs

use rust_decimal::Decimal;

use crate::models::catalog::Service;

/// Taxa de mão de obra: R$ 14,50 por hora trabalhada.
pub fn hourly_rate() -> Decimal {
    Decimal::new(145, 1)
}

/// Custos de uma tarefa a partir dos serviços anexados: `(tempo, material)`.
///
/// As somas são brutas: o tempo fica em minutos e NÃO passa pela conversão
/// de valor-hora. A conversão acontece só na agregação do total da OS
/// ([`service_billing_cost`]); a tarefa guarda os valores crus para permitir
/// relatórios de tempo. Colunas NULL contam como zero.
pub fn task_costs(services: &[Service]) -> (Decimal, Decimal) {
    let mut time_cost = Decimal::ZERO;
    let mut material_cost = Decimal::ZERO;
    for service in services {
        time_cost += service.estimated_time_cost.unwrap_or(Decimal::ZERO);
        material_cost += service.estimated_material_cost.unwrap_or(Decimal::ZERO);
    }
    (time_cost, material_cost)
}

/// Valor cobrado por um serviço aplicado:
/// material + (minutos estimados / 60) * taxa hora.
pub fn service_billing_cost(service: &Service) -> Decimal {
    let time = service.estimated_time_cost.unwrap_or(Decimal::ZERO);
    let material = service.estimated_material_cost.unwrap_or(Decimal::ZERO);
    material + (time / Decimal::from(60)) * hourly_rate()
}

/// Total de uma OS: soma de [`service_billing_cost`] sobre todos os vínculos
/// tarefa-serviço. Um serviço aplicado em duas tarefas conta duas vezes.
pub fn billing_total<'a>(services: impl IntoIterator<Item = &'a Service>) -> Decimal {
    services.into_iter().map(service_billing_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn service(id: i32, time: Option<i64>, material: Option<i64>) -> Service {
        Service {
            id,
            description: format!("servico {id}"),
            estimated_time_cost: time.map(Decimal::from),
            estimated_material_cost: material.map(Decimal::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn task_costs_soma_bruta_sem_conversao() {
        let services = vec![service(1, Some(30), Some(50)), service(2, Some(90), Some(20))];
        let (time, material) = task_costs(&services);
        // minutos continuam minutos: 30 + 90, nada de /60
        assert_eq!(time, Decimal::from(120));
        assert_eq!(material, Decimal::from(70));
    }

    #[test]
    fn task_costs_lista_vazia_zera() {
        let (time, material) = task_costs(&[]);
        assert_eq!(time, Decimal::ZERO);
        assert_eq!(material, Decimal::ZERO);
    }

    #[test]
    fn task_costs_trata_null_como_zero() {
        let services = vec![service(1, None, None), service(2, Some(60), None)];
        let (time, material) = task_costs(&services);
        assert_eq!(time, Decimal::from(60));
        assert_eq!(material, Decimal::ZERO);
    }

    #[test]
    fn billing_converte_minutos_em_valor_hora() {
        // 60 min a R$ 14,50/h + R$ 80 de material
        let s = service(1, Some(60), Some(80));
        assert_eq!(service_billing_cost(&s), Decimal::new(945, 1));
    }

    #[test]
    fn billing_total_acumula_todos_os_vinculos() {
        // 30 min = 7.25; 90 min = 21.75; materiais 50 + 20
        let services = vec![service(1, Some(30), Some(50)), service(2, Some(90), Some(20))];
        assert_eq!(billing_total(&services), Decimal::from(99));
    }

    #[test]
    fn billing_total_e_deterministico() {
        // recomputar sem mudar os vínculos devolve o mesmo total
        let services = vec![service(1, Some(45), Some(10)), service(2, None, Some(5))];
        let first = billing_total(&services);
        let second = billing_total(&services);
        assert_eq!(first, second);
    }
}
