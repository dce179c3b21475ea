// src/services/mutation_plan.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::work_order::WorkOrderStatus;

/// Tarefa ainda não persistida de um plano de criação de OS.
/// Os custos já chegam computados (ver `costing::task_costs`).
#[derive(Debug, Clone)]
pub struct PlannedTask {
    pub device_id: i32,
    pub description: Option<String>,
    pub time_cost: Option<Decimal>,
    pub material_cost: Option<Decimal>,
    pub service_ids: Vec<i32>,
}

/// Campos parciais de atualização de uma OS. `None` = não mexer.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderPatch {
    pub client_id: Option<Uuid>,
    pub obs: Option<String>,
    pub status: Option<WorkOrderStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Atualização parcial de uma tarefa dentro de um patch de OS.
#[derive(Debug, Clone)]
pub struct TaskPatch {
    pub id: i32,
    pub description: Option<String>,
    pub device_id: Option<i32>,
}

/// Uma operação de escrita tipada. O executor (`work_order_repo::apply_plan`)
/// roda a lista inteira dentro de uma única transação, na ordem em que ela
/// foi montada.
///
/// Inserções de tarefa carregam um índice local ao plano; os vínculos
/// referenciam a tarefa por esse índice, já que o id real só existe depois
/// do INSERT.
#[derive(Debug, Clone)]
pub enum MutationOp {
    InsertWorkOrder {
        id: Uuid,
        client_id: Uuid,
        obs: Option<String>,
        status: WorkOrderStatus,
    },
    InsertTask {
        task_index: usize,
        work_order_id: Uuid,
        device_id: i32,
        description: Option<String>,
        time_cost: Option<Decimal>,
        material_cost: Option<Decimal>,
    },
    LinkTaskService {
        task_index: usize,
        service_id: i32,
    },
    UpdateWorkOrder {
        id: Uuid,
        patch: WorkOrderPatch,
    },
    UpdateTask {
        patch: TaskPatch,
    },
    DeleteTaskServicesOfWorkOrder {
        work_order_id: Uuid,
    },
    DeleteTasksOfWorkOrder {
        work_order_id: Uuid,
    },
    DeleteWorkOrder {
        id: Uuid,
    },
}

/// Lista ordenada de operações dependentes, respeitando as FKs:
/// criação pai → filhos, exclusão filhos → pai. Tudo ou nada.
#[derive(Debug, Clone)]
pub struct MutationPlan {
    ops: Vec<MutationOp>,
}

impl MutationPlan {
    /// OS nova: a própria OS primeiro, depois cada tarefa, depois os vínculos
    /// daquela tarefa. Nasce em aprovação; o total é recalculado em seguida
    /// pelo agregador.
    pub fn create_work_order(
        id: Uuid,
        client_id: Uuid,
        obs: Option<String>,
        tasks: Vec<PlannedTask>,
    ) -> Self {
        let mut ops = vec![MutationOp::InsertWorkOrder {
            id,
            client_id,
            obs,
            status: WorkOrderStatus::Aprovacao,
        }];

        for (task_index, task) in tasks.into_iter().enumerate() {
            ops.push(MutationOp::InsertTask {
                task_index,
                work_order_id: id,
                device_id: task.device_id,
                description: task.description,
                time_cost: task.time_cost,
                material_cost: task.material_cost,
            });
            for service_id in task.service_ids {
                ops.push(MutationOp::LinkTaskService {
                    task_index,
                    service_id,
                });
            }
        }

        Self { ops }
    }

    /// Atualizações parciais independentes: cada tarefa, depois a OS.
    pub fn patch_work_order(id: Uuid, patch: WorkOrderPatch, task_patches: Vec<TaskPatch>) -> Self {
        let mut ops: Vec<MutationOp> = task_patches
            .into_iter()
            .map(|patch| MutationOp::UpdateTask { patch })
            .collect();
        ops.push(MutationOp::UpdateWorkOrder { id, patch });
        Self { ops }
    }

    /// Exclusão em cascata, filhos antes dos pais: vínculos tarefa-serviço,
    /// depois as tarefas, depois a OS. Uma OS sem tarefas continua válida
    /// (os DELETEs filhos afetam zero linhas).
    pub fn delete_work_order(id: Uuid) -> Self {
        Self {
            ops: vec![
                MutationOp::DeleteTaskServicesOfWorkOrder { work_order_id: id },
                MutationOp::DeleteTasksOfWorkOrder { work_order_id: id },
                MutationOp::DeleteWorkOrder { id },
            ],
        }
    }

    pub fn ops(&self) -> &[MutationOp] {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned_task(device_id: i32, service_ids: Vec<i32>) -> PlannedTask {
        PlannedTask {
            device_id,
            description: None,
            time_cost: None,
            material_cost: None,
            service_ids,
        }
    }

    #[test]
    fn criacao_respeita_ordem_de_dependencia() {
        let id = Uuid::new_v4();
        let client = Uuid::new_v4();
        let plan = MutationPlan::create_work_order(
            id,
            client,
            Some("obs".into()),
            vec![planned_task(1, vec![10, 11]), planned_task(2, vec![12])],
        );

        let ops = plan.ops();
        assert_eq!(ops.len(), 6);

        // a OS vem antes de tudo, e nasce em aprovação
        match &ops[0] {
            MutationOp::InsertWorkOrder { status, .. } => {
                assert_eq!(*status, WorkOrderStatus::Aprovacao);
            }
            other => panic!("esperava InsertWorkOrder, veio {other:?}"),
        }

        // todo vínculo aparece depois do INSERT da tarefa que ele referencia
        for (pos, op) in ops.iter().enumerate() {
            if let MutationOp::LinkTaskService { task_index, .. } = op {
                let inserted_before = ops[..pos].iter().any(|earlier| {
                    matches!(earlier, MutationOp::InsertTask { task_index: t, .. } if t == task_index)
                });
                assert!(inserted_before, "vínculo na posição {pos} antes da tarefa");
            }
        }
    }

    #[test]
    fn exclusao_apaga_filhos_antes_dos_pais() {
        let id = Uuid::new_v4();
        let plan = MutationPlan::delete_work_order(id);
        let ops = plan.ops();

        assert_eq!(ops.len(), 3);
        assert!(matches!(
            ops[0],
            MutationOp::DeleteTaskServicesOfWorkOrder { work_order_id } if work_order_id == id
        ));
        assert!(matches!(ops[1], MutationOp::DeleteTasksOfWorkOrder { work_order_id } if work_order_id == id));
        assert!(matches!(ops[2], MutationOp::DeleteWorkOrder { id: wo } if wo == id));
    }

    #[test]
    fn criacao_sem_tarefas_gera_um_unico_insert() {
        let plan = MutationPlan::create_work_order(Uuid::new_v4(), Uuid::new_v4(), None, vec![]);
        assert_eq!(plan.ops().len(), 1);
    }

    #[test]
    fn patch_atualiza_tarefas_e_depois_a_os() {
        let id = Uuid::new_v4();
        let plan = MutationPlan::patch_work_order(
            id,
            WorkOrderPatch {
                obs: Some("atualizada".into()),
                ..Default::default()
            },
            vec![TaskPatch {
                id: 7,
                description: Some("nova descrição".into()),
                device_id: None,
            }],
        );

        let ops = plan.ops();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], MutationOp::UpdateTask { patch } if patch.id == 7));
        assert!(matches!(&ops[1], MutationOp::UpdateWorkOrder { id: wo, .. } if *wo == id));
    }
}
