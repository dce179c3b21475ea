// src/db/client_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::client::Client};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        cpf: &str,
        email: Option<&str>,
        cellphone: Option<&str>,
        telephone: Option<&str>,
    ) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, first_name, last_name, name, cpf, email, cellphone, telephone)
            VALUES ($1, $2, $3, $2 || ' ' || $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(cpf)
        .bind(email)
        .bind(cellphone)
        .bind(telephone)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn find_all(
        &self,
        take: Option<i64>,
        page: Option<i64>,
    ) -> Result<Vec<Client>, AppError> {
        let take = take.unwrap_or(50);
        let offset = page.map(|p| (p.max(1) - 1) * take).unwrap_or(0);

        let clients =
            sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name LIMIT $1 OFFSET $2")
                .bind(take)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Atualização parcial; o nome materializado acompanha first/last name.
    pub async fn update(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        cpf: Option<&str>,
        email: Option<&str>,
        cellphone: Option<&str>,
        telephone: Option<&str>,
    ) -> Result<Client, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                name = COALESCE($2, first_name) || ' ' || COALESCE($3, last_name),
                cpf = COALESCE($4, cpf),
                email = COALESCE($5, email),
                cellphone = COALESCE($6, cellphone),
                telephone = COALESCE($7, telephone)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(cpf)
        .bind(email)
        .bind(cellphone)
        .bind(telephone)
        .fetch_optional(&self.pool)
        .await?;

        client.ok_or_else(|| AppError::NotFound(format!("Cliente com id {id} não encontrado.")))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Cliente com id {id} não encontrado.")));
        }

        Ok(())
    }
}
