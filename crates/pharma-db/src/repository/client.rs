//! # Client Repository
//!
//! Database operations for the client directory. Clients are optional
//! invoice references; deleting one clears the reference on past
//! invoices (walk-in state) and leaves them otherwise untouched.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharma_core::Client;

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Lists all clients ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, phone, email FROM clients ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let client =
            sqlx::query_as::<_, Client>("SELECT id, name, phone, email FROM clients WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(client)
    }

    /// Finds clients whose name contains the given fragment.
    pub async fn find_by_name(&self, fragment: &str) -> DbResult<Vec<Client>> {
        let pattern = format!("%{fragment}%");

        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, phone, email FROM clients WHERE name LIKE ?1 ORDER BY name ASC",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Inserts a new client.
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, name = %client.name, "Inserting client");

        sqlx::query("INSERT INTO clients (id, name, phone, email) VALUES (?1, ?2, ?3, ?4)")
            .bind(&client.id)
            .bind(&client.name)
            .bind(&client.phone)
            .bind(&client.email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Updates an existing client.
    pub async fn update(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, "Updating client");

        let result =
            sqlx::query("UPDATE clients SET name = ?2, phone = ?3, email = ?4 WHERE id = ?1")
                .bind(&client.id)
                .bind(&client.name)
                .bind(&client.phone)
                .bind(&client.email)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", &client.id));
        }

        Ok(())
    }

    /// Deletes a client.
    ///
    /// Invoices that referenced the client survive with the reference
    /// cleared; totals and lines are unaffected.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Helper to generate a new client ID.
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}
