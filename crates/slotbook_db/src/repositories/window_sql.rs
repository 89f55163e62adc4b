//! SQL implementation of the booking-window repository

use crate::error::DbError;
use crate::repositories::window::BookingWindowRepository;
use crate::DbClient;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the booking-window repository
#[derive(Debug, Clone)]
pub struct SqlBookingWindowRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingWindowRepository {
    /// Create a new SQL booking-window repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl BookingWindowRepository for SqlBookingWindowRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking_window schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS booking_window (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                max_date TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        Ok(())
    }

    async fn get(&self) -> Result<Option<String>, DbError> {
        let row = sqlx::query("SELECT max_date FROM booking_window WHERE id = 1")
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to read booking window: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(row.map(|r| r.try_get("max_date").unwrap_or_default()))
    }

    async fn set(&self, max_date: &str) -> Result<String, DbError> {
        let query = r#"
            INSERT INTO booking_window (id, max_date) VALUES (1, $1)
            ON CONFLICT(id) DO UPDATE SET max_date = excluded.max_date
        "#;

        sqlx::query(query)
            .bind(max_date)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to write booking window: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(max_date.to_string())
    }
}
