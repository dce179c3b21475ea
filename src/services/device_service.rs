// src/services/device_service.rs

use sqlx::{Acquire, Postgres};

use crate::{common::error::AppError, db::DeviceRepository, models::device::Device};

/// Aparelho recebido na importação em lote (corpo JSON já desserializado;
/// o parsing de arquivo fica fora deste núcleo).
#[derive(Debug, Clone)]
pub struct NewDeviceInput {
    pub brand: String,
    pub model: String,
    pub photo_url: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct DeviceService {
    repo: DeviceRepository,
}

impl DeviceService {
    pub fn new(repo: DeviceRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'e, A>(&self, conn: A, input: NewDeviceInput) -> Result<Device, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;
        let device = self
            .repo
            .insert(
                &mut *tx,
                &input.brand,
                &input.model,
                input.photo_url.as_deref(),
                input.sku.as_deref(),
                input.description.as_deref(),
            )
            .await?;
        tx.commit().await?;
        Ok(device)
    }

    /// Importação em lote: insere um por um, aguardando cada INSERT, dentro
    /// de uma única transação. Um registro inválido descarta o lote inteiro.
    pub async fn import<'e, A>(
        &self,
        conn: A,
        inputs: Vec<NewDeviceInput>,
    ) -> Result<u64, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let mut count = 0u64;
        for input in &inputs {
            self.repo
                .insert(
                    &mut *tx,
                    &input.brand,
                    &input.model,
                    input.photo_url.as_deref(),
                    input.sku.as_deref(),
                    input.description.as_deref(),
                )
                .await?;
            count += 1;
        }

        tx.commit().await?;
        Ok(count)
    }

    pub async fn list(&self, take: Option<i64>, page: Option<i64>) -> Result<Vec<Device>, AppError> {
        self.repo.find_all(take, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Device, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Aparelho com id {id} não encontrado.")))
    }

    pub async fn patch(
        &self,
        id: i32,
        brand: Option<&str>,
        model: Option<&str>,
        photo_url: Option<&str>,
        sku: Option<&str>,
        description: Option<&str>,
    ) -> Result<Device, AppError> {
        self.repo
            .update(id, brand, model, photo_url, sku, description)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo.delete(id).await
    }
}
