//! Factory for creating database clients and repositories

use crate::client::DbClient;
use crate::error::DbError;
use crate::repositories::{
    BookingRepository, BookingWindowRepository, DayRepository, SqlBookingRepository,
    SqlBookingWindowRepository, SqlDayRepository,
};
use slotbook_config::{AppConfig, DatabaseConfig};
use std::sync::Arc;
use tracing::debug;

/// Factory for creating database clients
#[derive(Debug, Clone)]
pub struct DbClientFactory;

impl DbClientFactory {
    /// Create a new database client factory
    pub fn new() -> Self {
        Self
    }

    /// Create a new database client from an application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the database configuration is missing or the
    /// connection fails.
    pub async fn from_app_config(&self, config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");

        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        self.from_db_config(db_config).await
    }

    /// Create a new database client from a database configuration
    pub async fn from_db_config(&self, db_config: &DatabaseConfig) -> Result<DbClient, DbError> {
        DbClient::from_config(db_config).await
    }

    /// Create a new database client from a database URL
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        DbClient::from_url(db_url).await
    }
}

impl Default for DbClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// The full set of SQL repositories over one client.
///
/// Feature crates take this as one handle so the backend wires persistence
/// exactly once.
#[derive(Debug, Clone)]
pub struct SqlStores {
    pub bookings: SqlBookingRepository,
    pub days: SqlDayRepository,
    pub window: SqlBookingWindowRepository,
}

impl SqlStores {
    /// Build the repositories over a shared client.
    pub fn new(db_client: DbClient) -> Self {
        Self {
            bookings: SqlBookingRepository::new(db_client.clone()),
            days: SqlDayRepository::new(db_client.clone()),
            window: SqlBookingWindowRepository::new(db_client),
        }
    }

    /// Create any missing tables.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        self.bookings.init_schema().await?;
        self.days.init_schema().await?;
        self.window.init_schema().await?;
        Ok(())
    }
}
