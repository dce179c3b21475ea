// src/services/client_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::ClientRepository, models::client::Client};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(repo: ClientRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        cpf: &str,
        email: Option<&str>,
        cellphone: Option<&str>,
        telephone: Option<&str>,
    ) -> Result<Client, AppError> {
        let id = Uuid::new_v4();
        self.repo
            .create(id, first_name, last_name, cpf, email, cellphone, telephone)
            .await
    }

    pub async fn list(&self, take: Option<i64>, page: Option<i64>) -> Result<Vec<Client>, AppError> {
        self.repo.find_all(take, page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cliente com id {id} não encontrado.")))
    }

    pub async fn patch(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        cpf: Option<&str>,
        email: Option<&str>,
        cellphone: Option<&str>,
        telephone: Option<&str>,
    ) -> Result<Client, AppError> {
        self.repo
            .update(id, first_name, last_name, cpf, email, cellphone, telephone)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}
