use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{RepositoryError, Result};
use crate::models::{Client, Phone, SearchRow};

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Client and phone storage over a single owned SQLite connection.
///
/// Every operation runs in its own transaction. The transaction is committed
/// when the operation succeeds and rolled back when it is dropped on an error
/// path, so no call ever leaves a partial write behind.
pub struct ClientRepository {
    conn: SqliteConnection,
}

impl ClientRepository {
    /// Open a connection to `database_url`, creating the database file if needed.
    ///
    /// Any failure while establishing the connection is reported as
    /// [`RepositoryError::Connection`].
    pub async fn connect(database_url: &str) -> Result<Self> {
        let conn = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Connection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .connect()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        debug!("Connected to {}", database_url);
        Ok(Self { conn })
    }

    /// Close the underlying connection
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    /// Create the `clients` and `phones` tables if they do not exist yet
    pub async fn ensure_schema(&mut self) -> Result<()> {
        let mut tx = self.conn.begin().await?;

        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(&mut *tx).await?;
            }
        }

        tx.commit().await?;

        debug!("Schema ensured");
        Ok(())
    }

    // Client operations
    pub async fn add_client(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> Result<i64> {
        validate_names(first_name, last_name)?;

        let mut tx = self.conn.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO clients (first_name, last_name, email)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Client {} added", id);
        Ok(id)
    }

    /// Overwrite the name and email of a client.
    ///
    /// Returns the number of rows affected; `0` means no client has that id,
    /// which is not treated as an error.
    pub async fn update_client(
        &mut self,
        client_id: i64,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> Result<u64> {
        validate_names(first_name, last_name)?;

        let mut tx = self.conn.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET first_name = ?1, last_name = ?2, email = ?3
            WHERE id = ?4
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(client_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let affected = result.rows_affected();
        if affected == 0 {
            warn!("Update matched no client with id {}", client_id);
        } else {
            info!("Client {} updated", client_id);
        }
        Ok(affected)
    }

    /// Delete a client; its phones go with it through `ON DELETE CASCADE`
    pub async fn delete_client(&mut self, client_id: i64) -> Result<u64> {
        let mut tx = self.conn.begin().await?;

        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let affected = result.rows_affected();
        if affected == 0 {
            warn!("Delete matched no client with id {}", client_id);
        } else {
            info!("Client {} deleted", client_id);
        }
        Ok(affected)
    }

    pub async fn get_client(&mut self, client_id: i64) -> Result<Client> {
        let mut tx = self.conn.begin().await?;

        let client = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM clients WHERE id = ?1",
        )
        .bind(client_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        client.ok_or_else(|| RepositoryError::NotFound(format!("client {}", client_id)))
    }

    // Phone operations

    /// Attach a phone number to an existing client and return the phone id
    pub async fn add_phone(&mut self, client_id: i64, phone_number: Option<&str>) -> Result<i64> {
        let mut tx = self.conn.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO phones (client_id, phone_number)
            VALUES (?1, ?2)
            RETURNING id
            "#,
        )
        .bind(client_id)
        .bind(phone_number)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Phone {} added for client {}", id, client_id);
        Ok(id)
    }

    pub async fn delete_phone(&mut self, phone_id: i64) -> Result<u64> {
        let mut tx = self.conn.begin().await?;

        let result = sqlx::query("DELETE FROM phones WHERE id = ?1")
            .bind(phone_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let affected = result.rows_affected();
        if affected == 0 {
            warn!("Delete matched no phone with id {}", phone_id);
        } else {
            info!("Phone {} deleted", phone_id);
        }
        Ok(affected)
    }

    pub async fn list_phones(&mut self, client_id: i64) -> Result<Vec<Phone>> {
        let mut tx = self.conn.begin().await?;

        let phones = sqlx::query_as::<_, Phone>(
            "SELECT id, client_id, phone_number FROM phones WHERE client_id = ?1 ORDER BY id ASC",
        )
        .bind(client_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(phones)
    }

    // Search

    /// Case-insensitive substring search over names, email and phone numbers.
    ///
    /// Clients are left-joined against their phones, so a client with several
    /// phones yields one row per phone and a client with none yields a single
    /// row without a phone number. Case folding is Unicode-aware, so matching
    /// happens on the fetched rows rather than with SQLite `LIKE`, which only
    /// folds ASCII.
    pub async fn find_clients(&mut self, keyword: &str) -> Result<Vec<SearchRow>> {
        let needle = keyword.to_lowercase();

        let mut tx = self.conn.begin().await?;

        let rows = sqlx::query_as::<_, SearchRow>(
            r#"
            SELECT c.id AS client_id, c.first_name, c.last_name, c.email, p.phone_number
            FROM clients c
            LEFT JOIN phones p ON c.id = p.client_id
            ORDER BY c.id ASC, p.id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let rows: Vec<SearchRow> = rows
            .into_iter()
            .filter(|row| row.matches(&needle))
            .collect();

        debug!("Search for {:?} returned {} rows", keyword, rows.len());
        Ok(rows)
    }
}

fn validate_names(first_name: &str, last_name: &str) -> Result<()> {
    if first_name.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "first_name must not be empty".into(),
        ));
    }
    if last_name.trim().is_empty() {
        return Err(RepositoryError::Validation(
            "last_name must not be empty".into(),
        ));
    }
    Ok(())
}

/// Open the repository described by the configuration
pub async fn init(config: &Config) -> Result<ClientRepository> {
    ClientRepository::connect(config.database_url()).await
}
