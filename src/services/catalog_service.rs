// src/services/catalog_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::ServiceRepository,
    models::catalog::{Service, TopServiceEntry},
};

/// Quantos serviços o ranking devolve quando o chamador não pede um N.
const DEFAULT_TOP_N: i64 = 5;

#[derive(Clone)]
pub struct CatalogService {
    repo: ServiceRepository,
}

impl CatalogService {
    pub fn new(repo: ServiceRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        description: &str,
        estimated_time_cost: Option<Decimal>,
        estimated_material_cost: Option<Decimal>,
    ) -> Result<Service, AppError> {
        self.repo
            .create(description, estimated_time_cost, estimated_material_cost)
            .await
    }

    pub async fn list(&self, take: Option<i64>, page: Option<i64>) -> Result<Vec<Service>, AppError> {
        self.repo.find_all(take, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Service, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Serviço com id {id} não encontrado.")))
    }

    pub async fn patch(
        &self,
        id: i32,
        description: Option<&str>,
        estimated_time_cost: Option<Decimal>,
        estimated_material_cost: Option<Decimal>,
    ) -> Result<Service, AppError> {
        self.repo
            .update(id, description, estimated_time_cost, estimated_material_cost)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    /// Serviços mais aplicados em um aparelho.
    pub async fn top_by_device(
        &self,
        device_id: i32,
        take: Option<i64>,
    ) -> Result<Vec<TopServiceEntry>, AppError> {
        self.repo
            .top_by_device(device_id, take.unwrap_or(DEFAULT_TOP_N))
            .await
    }
}
