//! SQL implementation of the day repository
//!
//! The hour list is stored as a JSON document in a TEXT column, so a day is
//! written and read as one unit, keeping the single-document atomicity the
//! rest of the system assumes.

use crate::error::DbError;
use crate::repositories::day::{Day, DayRepository};
use crate::DbClient;
use slotbook_common::models::HourBlock;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, warn};

/// SQL implementation of the day repository
#[derive(Debug, Clone)]
pub struct SqlDayRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlDayRepository {
    /// Create a new SQL day repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn day_from_row(row: &AnyRow) -> Day {
    let hours_json: String = row.try_get("hours").unwrap_or_default();
    let hours: Vec<HourBlock> = serde_json::from_str(&hours_json).unwrap_or_else(|e| {
        warn!("Discarding undecodable hours column: {}", e);
        Vec::new()
    });

    Day {
        date: row.try_get("date").unwrap_or_default(),
        disabled: row.try_get::<i64, _>("disabled").unwrap_or(0) != 0,
        hours,
        version: row.try_get("version").unwrap_or(0),
    }
}

fn encode_hours(hours: &[HourBlock]) -> Result<String, DbError> {
    serde_json::to_string(hours).map_err(|e| DbError::SerializationError(e.to_string()))
}

impl DayRepository for SqlDayRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing days schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS days (
                date TEXT PRIMARY KEY,
                disabled INTEGER NOT NULL DEFAULT 0,
                hours TEXT NOT NULL DEFAULT '[]',
                version INTEGER NOT NULL DEFAULT 0
            )
        "#;

        self.db_client.execute(query).await?;

        Ok(())
    }

    async fn create(&self, day: Day) -> Result<Day, DbError> {
        debug!("Creating day record for {}", day.date);

        let hours_json = encode_hours(&day.hours)?;

        sqlx::query("INSERT INTO days (date, disabled, hours, version) VALUES ($1, $2, $3, 0)")
            .bind(&day.date)
            .bind(day.disabled as i64)
            .bind(&hours_json)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert day {}: {}", day.date, e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(Day {
            version: 0,
            ..day
        })
    }

    async fn find_by_date(&self, date: &str) -> Result<Option<Day>, DbError> {
        let row = sqlx::query("SELECT date, disabled, hours, version FROM days WHERE date = $1")
            .bind(date)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find day {}: {}", date, e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(row.as_ref().map(day_from_row))
    }

    async fn find_all(&self) -> Result<Vec<Day>, DbError> {
        let rows = sqlx::query("SELECT date, disabled, hours, version FROM days ORDER BY date")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list days: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(day_from_row).collect())
    }

    async fn find_disabled(&self) -> Result<Vec<Day>, DbError> {
        let rows = sqlx::query(
            "SELECT date, disabled, hours, version FROM days WHERE disabled <> 0 ORDER BY date",
        )
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to list blackout days: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(rows.iter().map(day_from_row).collect())
    }

    async fn exists(&self, date: &str) -> Result<bool, DbError> {
        let row = sqlx::query("SELECT 1 AS present FROM days WHERE date = $1")
            .bind(date)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed existence check for day {}: {}", date, e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(row.is_some())
    }

    async fn save(&self, day: Day) -> Result<Day, DbError> {
        let hours_json = encode_hours(&day.hours)?;

        let result = sqlx::query(
            "UPDATE days SET disabled = $1, hours = $2, version = version + 1 WHERE date = $3",
        )
        .bind(day.disabled as i64)
        .bind(&hours_json)
        .bind(&day.date)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to save day {}: {}", day.date, e);
            DbError::QueryError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::QueryError(format!(
                "day {} does not exist",
                day.date
            )));
        }

        Ok(Day {
            version: day.version + 1,
            ..day
        })
    }

    async fn save_guarded(&self, day: &Day) -> Result<bool, DbError> {
        let hours_json = encode_hours(&day.hours)?;

        let result = sqlx::query(
            r#"
            UPDATE days
            SET disabled = $1, hours = $2, version = version + 1
            WHERE date = $3 AND version = $4
            "#,
        )
        .bind(day.disabled as i64)
        .bind(&hours_json)
        .bind(&day.date)
        .bind(day.version)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed guarded save for day {}: {}", day.date, e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> SqlDayRepository {
        let client = DbClient::from_url("sqlite::memory:").await.unwrap();
        let repo = SqlDayRepository::new(client);
        repo.init_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn create_and_find_round_trip() {
        let repo = test_repo().await;
        repo.create(Day::empty("2025-06-01")).await.unwrap();

        let day = repo.find_by_date("2025-06-01").await.unwrap().unwrap();
        assert_eq!(day.date, "2025-06-01");
        assert!(!day.disabled);
        assert!(day.hours.is_empty());
        assert_eq!(day.version, 0);
    }

    #[tokio::test]
    async fn save_persists_hours_and_bumps_version() {
        let repo = test_repo().await;
        let mut day = repo.create(Day::empty("2025-06-01")).await.unwrap();

        day.hours.push(HourBlock::available("2 Hours/$70"));
        let saved = repo.save(day).await.unwrap();
        assert_eq!(saved.version, 1);

        let reloaded = repo.find_by_date("2025-06-01").await.unwrap().unwrap();
        assert_eq!(reloaded.version, 1);
        assert_eq!(reloaded.hours.len(), 1);
        assert_eq!(reloaded.hours[0].hour, "2 Hours/$70");
        assert!(reloaded.hours[0].enabled);
    }

    #[tokio::test]
    async fn guarded_save_detects_stale_version() {
        let repo = test_repo().await;
        repo.create(Day::empty("2025-06-01")).await.unwrap();

        let snapshot_a = repo.find_by_date("2025-06-01").await.unwrap().unwrap();
        let mut snapshot_b = snapshot_a.clone();

        // First writer wins
        let mut first = snapshot_a.clone();
        first.hours.push(HourBlock::available("2 Hours/$70"));
        assert!(repo.save_guarded(&first).await.unwrap());

        // Second writer holds a stale snapshot and must be refused
        snapshot_b.hours.push(HourBlock::available("4 Hours/$130"));
        assert!(!repo.save_guarded(&snapshot_b).await.unwrap());

        let reloaded = repo.find_by_date("2025-06-01").await.unwrap().unwrap();
        assert_eq!(reloaded.hours.len(), 1);
        assert_eq!(reloaded.hours[0].hour, "2 Hours/$70");
    }

    #[tokio::test]
    async fn find_disabled_lists_only_blackout_days() {
        let repo = test_repo().await;
        repo.create(Day::empty("2025-06-01")).await.unwrap();
        let mut blackout = Day::empty("2025-06-02");
        blackout.disabled = true;
        repo.create(blackout).await.unwrap();

        let disabled = repo.find_disabled().await.unwrap();
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].date, "2025-06-02");
    }

    #[tokio::test]
    async fn exists_reflects_presence() {
        let repo = test_repo().await;
        assert!(!repo.exists("2025-06-01").await.unwrap());
        repo.create(Day::empty("2025-06-01")).await.unwrap();
        assert!(repo.exists("2025-06-01").await.unwrap());
    }
}
