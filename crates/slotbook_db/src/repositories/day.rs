//! Repository contract for per-date availability records
//!
//! `Day` writes come in two flavors: `save` is an unconditional
//! last-writer-wins write, and `save_guarded` is the optimistic variant the
//! reconciliation engine prefers, applying only while the record's version
//! counter has not moved since the day was loaded.

use crate::error::DbError;

// Re-export the entity from slotbook_common for convenience
pub use slotbook_common::models::{Day, HourBlock};

/// Repository for day availability records
pub trait DayRepository {
    /// Create the days table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new day record. Fails if the date already exists.
    fn create(&self, day: Day) -> impl std::future::Future<Output = Result<Day, DbError>> + Send;

    /// Look a day up by its date key.
    fn find_by_date(
        &self,
        date: &str,
    ) -> impl std::future::Future<Output = Result<Option<Day>, DbError>> + Send;

    /// All day records.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<Day>, DbError>> + Send;

    /// All blacked-out days.
    fn find_disabled(&self)
        -> impl std::future::Future<Output = Result<Vec<Day>, DbError>> + Send;

    /// Whether a record exists for the date.
    fn exists(&self, date: &str)
        -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Unconditional write of the day's disabled flag and hour list.
    ///
    /// # Returns
    ///
    /// The stored day with its version counter advanced.
    fn save(&self, day: Day) -> impl std::future::Future<Output = Result<Day, DbError>> + Send;

    /// Conditional write: applies only if the stored version still matches
    /// `day.version`, and advances the counter when it does.
    ///
    /// # Returns
    ///
    /// `true` if the write applied, `false` on a version conflict or a
    /// missing record.
    fn save_guarded(
        &self,
        day: &Day,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
