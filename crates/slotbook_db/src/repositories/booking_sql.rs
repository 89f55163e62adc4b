//! SQL implementation of the booking repository

use crate::error::DbError;
use crate::repositories::booking::{Booking, BookingChanges, BookingRepository};
use crate::DbClient;
use slotbook_common::models::{BookingStatus, PaymentMethod, PaymentStatus};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingRepository {
    /// Create a new SQL booking repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn booking_from_row(row: &AnyRow) -> Booking {
    Booking {
        id: row.try_get("id").unwrap_or_default(),
        name: row.try_get("name").unwrap_or_default(),
        email: row.try_get("email").unwrap_or_default(),
        phone_number: row.try_get("phone_number").unwrap_or_default(),
        message: row.try_get("message").unwrap_or(None),
        how_did_you_hear: row.try_get("how_did_you_hear").unwrap_or(None),
        date: row.try_get("date").unwrap_or_default(),
        hours: row.try_get("hours").unwrap_or_default(),
        status: row
            .try_get::<String, _>("status")
            .ok()
            .and_then(|s| BookingStatus::parse(&s))
            .unwrap_or(BookingStatus::Unconfirmed),
        payment_status: row
            .try_get::<String, _>("payment_status")
            .ok()
            .and_then(|s| PaymentStatus::parse(&s))
            .unwrap_or(PaymentStatus::Unpaid),
        payment_method: row
            .try_get::<String, _>("payment_method")
            .ok()
            .and_then(|s| PaymentMethod::parse(&s))
            .unwrap_or(PaymentMethod::None),
    }
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing bookings schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                message TEXT,
                how_did_you_hear TEXT,
                date TEXT NOT NULL,
                hours TEXT NOT NULL,
                status TEXT NOT NULL,
                payment_status TEXT NOT NULL,
                payment_method TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        Ok(())
    }

    async fn create(&self, booking: Booking) -> Result<Booking, DbError> {
        debug!("Creating booking for {} on {}", booking.email, booking.date);

        let query = r#"
            INSERT INTO bookings
                (id, name, email, phone_number, message, how_did_you_hear,
                 date, hours, status, payment_status, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#;

        sqlx::query(query)
            .bind(&booking.id)
            .bind(&booking.name)
            .bind(&booking.email)
            .bind(&booking.phone_number)
            .bind(&booking.message)
            .bind(&booking.how_did_you_hear)
            .bind(&booking.date)
            .bind(&booking.hours)
            .bind(booking.status.as_str())
            .bind(booking.payment_status.as_str())
            .bind(booking.payment_method.as_str())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(booking)
    }

    async fn find_all(&self) -> Result<Vec<Booking>, DbError> {
        let query = r#"
            SELECT id, name, email, phone_number, message, how_did_you_hear,
                   date, hours, status, payment_status, payment_method
            FROM bookings
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list bookings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(booking_from_row).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DbError> {
        let query = r#"
            SELECT id, name, email, phone_number, message, how_did_you_hear,
                   date, hours, status, payment_status, payment_method
            FROM bookings
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find booking {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(row.as_ref().map(booking_from_row))
    }

    async fn update_fields(
        &self,
        id: &str,
        changes: BookingChanges,
    ) -> Result<Option<Booking>, DbError> {
        // Read-modify-write keeps the SQL static; bookings are atomic at the
        // single-record level so this mirrors the store contract.
        let Some(mut booking) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(status) = changes.status {
            booking.status = status;
        }
        if let Some(payment_status) = changes.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(payment_method) = changes.payment_method {
            booking.payment_method = payment_method;
        }

        let query = r#"
            UPDATE bookings
            SET status = $1, payment_status = $2, payment_method = $3
            WHERE id = $4
        "#;

        let result = sqlx::query(query)
            .bind(booking.status.as_str())
            .bind(booking.payment_status.as_str())
            .bind(booking.payment_method.as_str())
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update booking {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(booking))
    }

    async fn update_date_hours(
        &self,
        id: &str,
        date: &str,
        hours: &str,
    ) -> Result<Option<Booking>, DbError> {
        let Some(mut booking) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let query = r#"
            UPDATE bookings
            SET date = $1, hours = $2
            WHERE id = $3
        "#;

        sqlx::query(query)
            .bind(date)
            .bind(hours)
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to reschedule booking {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        booking.date = date.to_string();
        booking.hours = hours.to_string();
        Ok(Some(booking))
    }

    async fn delete(&self, id: &str) -> Result<bool, DbError> {
        debug!("Deleting booking {}", id);

        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete booking {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
